use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, EnumString};
use uuid::Uuid;

#[cfg(feature = "database")]
use sea_orm::DeriveActiveEnum;

/// Account role. Roles form a total order: `Admin > Manager > User`
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    EnumIter,
)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "database", derive(DeriveActiveEnum))]
#[cfg_attr(feature = "database", sea_orm(rs_type = "String", db_type = "Text"))]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[cfg_attr(feature = "database", sea_orm(string_value = "user"))]
    User,
    #[cfg_attr(feature = "database", sea_orm(string_value = "manager"))]
    Manager,
    #[cfg_attr(feature = "database", sea_orm(string_value = "admin"))]
    Admin,
}

impl Role {
    pub fn level(self) -> u8 {
        match self {
            Self::User => 1,
            Self::Manager => 2,
            Self::Admin => 3,
        }
    }

    /// Whether this role may call an endpoint that lists `required` roles.
    ///
    /// The caller passes if its level reaches the lowest level among
    /// `required`; an empty list admits nobody.
    pub fn satisfies(self, required: &[Role]) -> bool {
        required
            .iter()
            .map(|role| role.level())
            .min()
            .is_some_and(|min| self.level() >= min)
    }
}

/// Public view of an account; never carries the password hash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_role_levels_are_ordered() {
        assert!(Role::Admin.level() > Role::Manager.level());
        assert!(Role::Manager.level() > Role::User.level());
    }

    #[test]
    fn test_role_satisfies() {
        assert!(Role::Admin.satisfies(&[Role::Manager]));
        assert!(Role::Manager.satisfies(&[Role::Manager]));
        assert!(!Role::User.satisfies(&[Role::Manager]));

        // The lowest listed role decides
        assert!(Role::User.satisfies(&[Role::Admin, Role::User]));
        assert!(!Role::Manager.satisfies(&[Role::Admin]));

        assert!(!Role::Admin.satisfies(&[]));
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!(Role::from_str("admin").unwrap(), Role::Admin);
        assert_eq!(Role::from_str("manager").unwrap(), Role::Manager);
        assert_eq!(Role::from_str("user").unwrap(), Role::User);
        assert!(Role::from_str("owner").is_err());
    }
}
