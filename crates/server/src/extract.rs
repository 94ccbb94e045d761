//! Body, query and path extractors that reject through [`ApiError`], so
//! malformed input is answered with a 400 and a JSON error body.

use crate::error::ApiError;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

/// JSON request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Query string parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// Path segments
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dtos::table::AvailabilityQuery;
    use axum::{
        body::{Body, to_bytes},
        http::{StatusCode, header::CONTENT_TYPE},
        response::IntoResponse,
    };
    use models::booking::BookingRequest;

    async fn error_body(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .uri("/bookings")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request_with_json_error() {
        let request = json_request(r#"{"table_ids":["not-a-uuid"]}"#);

        let err = ApiJson::<BookingRequest>::from_request(request, &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, ApiError::InvalidArgument(_)), "{err:?}");

        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    #[tokio::test]
    async fn test_syntax_error_and_missing_content_type_are_bad_request() {
        let err = ApiJson::<BookingRequest>::from_request(json_request("{"), &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let request = Request::builder()
            .method("POST")
            .uri("/bookings")
            .body(Body::from("{}"))
            .unwrap();
        let err = ApiJson::<BookingRequest>::from_request(request, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_query_parameter_is_bad_request_with_json_error() {
        let (mut parts, _) = Request::builder()
            .uri("/tables/available")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let err = ApiQuery::<AvailabilityQuery>::from_request_parts(&mut parts, &())
            .await
            .err()
            .unwrap();

        let (status, body) = error_body(err).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().is_some_and(|msg| msg.contains("date")));
    }

    #[tokio::test]
    async fn test_query_parameter_is_extracted() {
        let (mut parts, _) = Request::builder()
            .uri("/tables/available?date=2025-06-01")
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let ApiQuery(query) = ApiQuery::<AvailabilityQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(query.date, "2025-06-01");
    }
}
