use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Error taxonomy shared by every service
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input, bad id format or a missing required field
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("not found: {0}")]
    NotFound(String),
    /// A uniqueness rule was violated
    #[error("already exists: {0}")]
    AlreadyExists(String),
    /// Credentials were missing or did not match
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),
    #[error("internal error: {0}")]
    Internal(String),
    #[error("database error: {0}")]
    Db(DbErr),
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => Self::AlreadyExists(detail),
            Some(SqlErr::ForeignKeyConstraintViolation(detail)) => Self::InvalidArgument(detail),
            _ => Self::Db(err),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Parses an id received as text; blank or malformed ids are invalid arguments
pub fn parse_id(raw: &str) -> ServiceResult<uuid::Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ServiceError::InvalidArgument("id is required".to_string()));
    }
    uuid::Uuid::parse_str(raw)
        .map_err(|_| ServiceError::InvalidArgument(format!("invalid id: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        let id = uuid::Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_id(&format!(" {id} ")).unwrap(), id);

        assert!(matches!(parse_id(""), Err(ServiceError::InvalidArgument(_))));
        assert!(matches!(parse_id("   "), Err(ServiceError::InvalidArgument(_))));
        assert!(matches!(
            parse_id("not-a-uuid"),
            Err(ServiceError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_plain_db_errors_stay_db_errors() {
        let err: ServiceError = DbErr::Custom("connection reset".to_string()).into();
        assert!(matches!(err, ServiceError::Db(_)));

        let err: ServiceError = DbErr::RecordNotFound("booking".to_string()).into();
        assert!(matches!(err, ServiceError::Db(_)));
    }
}
