use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation. Paths are collected from the routers.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Registration and login"),
        (name = "Bookings", description = "Reservations and their orders"),
        (name = "Tables", description = "Dining tables, table types and availability"),
        (name = "Menu", description = "Menu items, menu sets and set contents"),
        (name = "Users", description = "Account administration"),
        (name = "Dashboard", description = "Sales and booking reports"),
    ),
    info(
        title = "Restaurant Reservation API",
        version = "1.0.0",
        description = "Table bookings, menu catalog and reporting",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
