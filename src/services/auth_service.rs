//! Authentication service - accounts, bearer tokens and profile changes.
//!
//! Password hashing lives in the `Password` value object; repository access
//! goes through the Unit of Work.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::{Config, SECONDS_PER_DAY, TOKEN_TYPE_BEARER};
use crate::domain::{Password, ProfileUpdate, User, UserChanges, UserResponse};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    /// Numeric user id carried in `sub`.
    pub fn user_id(&self) -> AppResult<i32> {
        self.sub.parse().map_err(|_| AppError::Unauthorized)
    }
}

/// Returned after a successful login
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub access_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 2592000)]
    pub expires_in: i64,
    pub user: UserResponse,
}

#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account; no token is issued
    async fn register(&self, email: String, password: String, name: String) -> AppResult<User>;

    /// Check credentials and issue a bearer token
    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;

    /// Apply a password-gated profile change in one transaction
    async fn update_profile(&self, user_id: i32, update: ProfileUpdate) -> AppResult<UserResponse>;
}

fn generate_token(user: &User, config: &Config) -> AppResult<LoginResponse> {
    let now = Utc::now();
    let expires_at = now + Duration::days(config.jwt_expiration_days);

    let claims = Claims {
        sub: user.id.to_string(),
        iat: now.timestamp(),
        exp: expires_at.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret_bytes()),
    )?;

    Ok(LoginResponse {
        access_token: token,
        token_type: TOKEN_TYPE_BEARER.to_string(),
        expires_in: config.jwt_expiration_days * SECONDS_PER_DAY,
        user: UserResponse::from(user.clone()),
    })
}

fn verify_token_internal(token: &str, config: &Config) -> AppResult<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    config: Config,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: Config) -> Self {
        Self { uow, config }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, email: String, password: String, name: String) -> AppResult<User> {
        if email.is_empty() || password.is_empty() || name.is_empty() {
            return Err(AppError::validation("Email, password and name are required"));
        }

        if self.uow.users().find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(&password)?.into_string();
        let user = self.uow.users().create(email, password_hash, name).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginResponse> {
        let user = self.uow.users().find_by_email(&email).await?;

        // Verify against a real hash either way so unknown emails cost the same.
        let stored = match &user {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::dummy(),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(user) if password_valid => generate_token(&user, &self.config),
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        verify_token_internal(token, &self.config)
    }

    async fn update_profile(&self, user_id: i32, update: ProfileUpdate) -> AppResult<UserResponse> {
        let update = update.normalized();

        let user = self
            .uow
            .transaction(move |ctx| {
                Box::pin(async move {
                    let users = ctx.users();
                    let user = users.find_by_id(user_id).await?.ok_or_not_found("User")?;

                    let current = update.current_password.as_deref().unwrap_or_default();
                    if current.is_empty()
                        || !Password::from_hash(user.password_hash.clone()).verify(current)
                    {
                        return Err(AppError::IncorrectPassword);
                    }

                    if let Some(email) = update.email.as_deref() {
                        if let Some(owner) = users.find_by_email(email).await? {
                            if owner.id != user_id {
                                return Err(AppError::conflict("Email"));
                            }
                        }
                    }

                    let password_hash = match update.new_password.as_deref() {
                        Some(plain) => Some(Password::new(plain)?.into_string()),
                        None => None,
                    };

                    users
                        .update(
                            user_id,
                            UserChanges {
                                name: update.name,
                                email: update.email,
                                password_hash,
                            },
                        )
                        .await
                })
            })
            .await?;

        tracing::info!(user_id, "Profile updated");
        Ok(UserResponse::from(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::{
        MenuRepository, MockMenuRepository, MockOrderRepository, MockUserRepository,
        OrderRepository, TransactionContext, TxFuture, UserRepository,
    };
    use mockall::predicate::eq;

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    /// UnitOfWork over a mocked user repository; transactions are not available.
    struct TestUnitOfWork {
        users: Arc<MockUserRepository>,
    }

    #[async_trait]
    impl UnitOfWork for TestUnitOfWork {
        fn users(&self) -> Arc<dyn UserRepository> {
            self.users.clone()
        }

        fn menu(&self) -> Arc<dyn MenuRepository> {
            Arc::new(MockMenuRepository::new())
        }

        fn orders(&self) -> Arc<dyn OrderRepository> {
            Arc::new(MockOrderRepository::new())
        }

        async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
        where
            F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
            T: Send,
        {
            Err(AppError::internal("Transactions not supported in test mock"))
        }
    }

    fn config() -> Config {
        Config::builder(SECRET).build().unwrap()
    }

    fn service(repo: MockUserRepository) -> Authenticator<TestUnitOfWork> {
        let uow = TestUnitOfWork {
            users: Arc::new(repo),
        };
        Authenticator::new(Arc::new(uow), config())
    }

    fn stored_user(id: i32, email: &str, password: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            name: "Alice".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create()
            .withf(|email, hash, name| email == "a@x.com" && hash.starts_with("$argon2") && name == "Alice")
            .returning(|email, hash, name| {
                Ok(User {
                    id: 1,
                    email,
                    password_hash: hash,
                    name,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let user = service(repo)
            .register("a@x.com".into(), "pw".into(), "Alice".into())
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_ne!(user.password_hash, "pw");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(|email| Ok(Some(stored_user(1, email, "pw"))));
        repo.expect_create().never();

        let result = service(repo)
            .register("a@x.com".into(), "pw".into(), "Alice".into())
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_empty_password_is_invalid_even_for_taken_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().never();
        repo.expect_create().never();

        let result = service(repo)
            .register("a@x.com".into(), "".into(), "Alice".into())
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_empty_fields() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_create().never();
        let service = service(repo);

        let empty_name = service.register("a@x.com".into(), "pw".into(), "".into()).await;
        let empty_password = service.register("a@x.com".into(), "".into(), "Alice".into()).await;

        assert!(matches!(empty_name, Err(AppError::Validation(_))));
        assert!(matches!(empty_password, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_issues_token_for_user() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|email| Ok(Some(stored_user(7, email, "pw"))));
        let service = service(repo);

        let response = service.login("a@x.com".into(), "pw".into()).await.unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 30 * SECONDS_PER_DAY);
        assert_eq!(response.user.id, 7);

        let claims = service.verify_token(&response.access_token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.user_id().unwrap(), 7);
        assert_eq!(claims.exp - claims.iat, 30 * SECONDS_PER_DAY);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(|email| Ok(Some(stored_user(1, email, "pw"))));
        repo.expect_find_by_email()
            .with(eq("nobody@x.com"))
            .returning(|_| Ok(None));
        let service = service(repo);

        let wrong_password = service.login("a@x.com".into(), "nope".into()).await.unwrap_err();
        let unknown_email = service.login("nobody@x.com".into(), "pw".into()).await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[test]
    fn test_verify_token_rejects_garbage_and_foreign_secret() {
        let service = service(MockUserRepository::new());
        assert!(matches!(service.verify_token("not-a-jwt"), Err(AppError::Jwt(_))));

        let other = Config::builder("another-secret-key-that-is-32-chars-long")
            .build()
            .unwrap();
        let user = stored_user(1, "a@x.com", "pw");
        let foreign = generate_token(&user, &other).unwrap();
        assert!(service.verify_token(&foreign.access_token).is_err());
    }

    #[test]
    fn test_verify_token_rejects_expired() {
        let service = service(MockUserRepository::new());
        let past = Utc::now() - Duration::days(31);
        let claims = Claims {
            sub: "1".to_string(),
            iat: past.timestamp(),
            exp: (past + Duration::days(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(service.verify_token(&token).is_err());
    }

    #[test]
    fn test_claims_with_non_numeric_subject_are_unauthorized() {
        let claims = Claims {
            sub: "alice".to_string(),
            iat: 0,
            exp: 0,
        };
        assert!(matches!(claims.user_id(), Err(AppError::Unauthorized)));
    }
}
