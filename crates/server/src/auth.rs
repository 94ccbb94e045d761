//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs signed with the configured secret and carry the
//! username, role and expiry of the account that logged in.

use crate::{error::ApiError, state::AppState};
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use log::warn;
use models::user::{Role, User};
use serde::{Deserialize, Serialize};

/// Lifetime of an issued token
pub const TOKEN_TTL_HOURS: i64 = 72;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub username: String,
    pub role: Role,
    pub exp: i64,
}

/// Signing and verification keys derived from the shared secret
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn create_token(&self, user: &User) -> Result<String, ApiError> {
        let claims = Claims {
            username: user.username.clone(),
            role: user.role,
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> Result<String, ApiError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::Unauthenticated("token expired".into()),
                _ => {
                    warn!("Rejected token: {e}");
                    ApiError::Unauthenticated("invalid token".into())
                }
            })
    }
}

/// The caller of an authenticated endpoint
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn from_headers(headers: &HeaderMap, keys: &JwtKeys) -> Result<Self, ApiError> {
        let header = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthenticated("missing authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthenticated("expected a bearer token".into()))?;

        keys.verify(token).map(Self)
    }

    /// Passes when the caller's role reaches the lowest of `roles`
    pub fn require(&self, roles: &[Role]) -> Result<(), ApiError> {
        if self.0.role.satisfies(roles) {
            return Ok(());
        }

        warn!(
            "{} ({}) denied, needs one of {:?}",
            self.0.username,
            self.0.role.as_ref(),
            roles
        );
        Err(ApiError::Forbidden("insufficient role".into()))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Self::from_headers(&parts.headers, &state.jwt)
    }
}
