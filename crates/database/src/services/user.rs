use crate::{
    entities::user,
    error::{ServiceError, ServiceResult},
};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::Utc;
use log::{info, warn};
use models::{
    time_slot::to_canonical,
    user::{Role, User},
};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

/// Shortest password accepted on register and password change
pub const MIN_PASSWORD_LEN: usize = 8;

pub struct UserService;

impl UserService {
    /// Creates an account with the `user` role
    pub async fn register(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> ServiceResult<User> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "username and password must be provided".to_string(),
            ));
        }
        Self::validate_password(password)?;

        let id = Uuid::new_v4();
        let model = user::ActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            password_hash: Set(hash_password(password)?),
            role: Set(Role::User),
            created_at: Set(to_canonical(Utc::now())),
        };

        user::Entity::insert(model)
            .exec_without_returning(db)
            .await
            .map_err(|err| match ServiceError::from(err) {
                ServiceError::AlreadyExists(_) => {
                    ServiceError::AlreadyExists(format!("username {username} already exists"))
                }
                other => other,
            })?;

        info!("Registered user {username}");
        Ok(User {
            id,
            username: username.to_string(),
            role: Role::User,
        })
    }

    /// Checks a username/password pair and returns the matching account
    pub async fn authenticate(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> ServiceResult<User> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "username and password must be provided".to_string(),
            ));
        }

        let model = user::Entity::find()
            .filter(user::Column::Username.eq(username.trim()))
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {username}")))?;

        if !verify_password(password, &model.password_hash) {
            warn!("Invalid credentials for {username}");
            return Err(ServiceError::Unauthenticated(
                "invalid credentials".to_string(),
            ));
        }

        Ok(model.into())
    }

    pub async fn get_all_users(db: &DatabaseConnection) -> ServiceResult<Vec<User>> {
        Ok(user::Entity::find()
            .order_by_asc(user::Column::Username)
            .all(db)
            .await?
            .into_iter()
            .map(User::from)
            .collect())
    }

    /// Looks a user up by id or, failing that, by username
    pub async fn get_user(db: &DatabaseConnection, identifier: &str) -> ServiceResult<User> {
        Ok(Self::find_by_identifier(db, identifier).await?.into())
    }

    pub async fn update_user_role(
        db: &DatabaseConnection,
        identifier: &str,
        role: Role,
    ) -> ServiceResult<User> {
        let existing = Self::find_by_identifier(db, identifier).await?;

        user::Entity::update_many()
            .set(user::ActiveModel {
                role: Set(role),
                ..Default::default()
            })
            .filter(user::Column::Id.eq(existing.id))
            .exec(db)
            .await?;

        info!("User {} is now {}", existing.username, role.as_ref());
        let mut user: User = existing.into();
        user.role = role;
        Ok(user)
    }

    pub async fn update_user_password(
        db: &DatabaseConnection,
        identifier: &str,
        password: &str,
    ) -> ServiceResult<User> {
        Self::validate_password(password)?;
        let existing = Self::find_by_identifier(db, identifier).await?;

        user::Entity::update_many()
            .set(user::ActiveModel {
                password_hash: Set(hash_password(password)?),
                ..Default::default()
            })
            .filter(user::Column::Id.eq(existing.id))
            .exec(db)
            .await?;

        info!("Changed password of {}", existing.username);
        Ok(existing.into())
    }

    pub async fn delete_user(db: &DatabaseConnection, identifier: &str) -> ServiceResult<()> {
        let deleted = user::Entity::delete_many()
            .filter(Self::identifier_condition(identifier)?)
            .exec(db)
            .await?;
        if deleted.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("user {identifier}")));
        }

        info!("Deleted user {identifier}");
        Ok(())
    }

    async fn find_by_identifier(
        db: &DatabaseConnection,
        identifier: &str,
    ) -> ServiceResult<user::Model> {
        user::Entity::find()
            .filter(Self::identifier_condition(identifier)?)
            .one(db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("user {identifier}")))
    }

    fn identifier_condition(identifier: &str) -> ServiceResult<Condition> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ServiceError::InvalidArgument(
                "user identifier is required".to_string(),
            ));
        }

        let condition = match Uuid::parse_str(identifier) {
            Ok(id) => Condition::any()
                .add(user::Column::Id.eq(id))
                .add(user::Column::Username.eq(identifier)),
            Err(_) => Condition::all().add(user::Column::Username.eq(identifier)),
        };
        Ok(condition)
    }

    fn validate_password(password: &str) -> ServiceResult<()> {
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::InvalidArgument(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        Ok(())
    }
}

fn hash_password(password: &str) -> ServiceResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ServiceError::Internal(format!("failed to hash password: {e}")))
}

fn verify_password(password: &str, hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn account(password: &str, role: Role) -> user::Model {
        user::Model {
            id: Uuid::new_v4(),
            username: "manager1".to_string(),
            password_hash: hash_password(password).unwrap(),
            role,
            created_at: to_canonical(Utc::now()),
        }
    }

    #[test]
    fn test_password_hash_round_trip() {
        let hash = hash_password("correct horse").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not a hash"));
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = UserService::register(&db, "", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));

        let err = UserService::register(&db, "alice", "short")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn test_register_creates_plain_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let user = UserService::register(&db, " alice ", "password123")
            .await
            .unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_authenticate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![account("password123", Role::Manager)]])
            .append_query_results([vec![account("password123", Role::Manager)]])
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection();

        let user = UserService::authenticate(&db, "manager1", "password123")
            .await
            .unwrap();
        assert_eq!(user.role, Role::Manager);

        let err = UserService::authenticate(&db, "manager1", "password124")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated(_)));

        let err = UserService::authenticate(&db, "ghost", "password123")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_user_role_returns_new_role() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![account("password123", Role::User)]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let user = UserService::update_user_role(&db, "manager1", Role::Admin)
            .await
            .unwrap();
        assert_eq!(user.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_delete_unknown_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let err = UserService::delete_user(&db, "ghost").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = UserService::delete_user(&db, " ").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidArgument(_)));
    }
}
