//! Credential manager - registration, login and user lookup.
//!
//! Owns password hashing and verification and asks the token issuer for a
//! session token. Holds no mutable state; all durable state lives in the
//! user store.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::DUMMY_PASSWORD_HASH;
use crate::domain::{AuthSession, Credentials, NewUser, Password, Profile, PublicUser};
use crate::errors::{AppError, AppResult};
use crate::infra::{StoreError, UserStore};
use crate::services::TokenIssuer;

/// Credential operations trait for dependency injection.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Hash the password and persist a new user.
    async fn register(&self, credentials: Credentials, profile: Profile) -> AppResult<PublicUser>;

    /// Register, then issue a token for the new user.
    async fn register_and_issue(
        &self,
        credentials: Credentials,
        profile: Profile,
    ) -> AppResult<AuthSession>;

    /// Verify credentials and issue a token.
    async fn login(&self, credentials: Credentials) -> AppResult<AuthSession>;

    /// Look up a user by id.
    async fn find_by_id(&self, id: Uuid) -> AppResult<PublicUser>;
}

/// Concrete implementation of CredentialService over a user store and a
/// token issuer.
pub struct CredentialManager {
    store: Arc<dyn UserStore>,
    issuer: Arc<dyn TokenIssuer>,
}

impl CredentialManager {
    pub fn new(store: Arc<dyn UserStore>, issuer: Arc<dyn TokenIssuer>) -> Self {
        Self { store, issuer }
    }

    fn session(&self, user: PublicUser) -> AppResult<AuthSession> {
        let token = self.issuer.issue(user.id)?;
        Ok(AuthSession { user, token })
    }
}

#[async_trait]
impl CredentialService for CredentialManager {
    async fn register(&self, credentials: Credentials, profile: Profile) -> AppResult<PublicUser> {
        let Credentials { email, password } = credentials;

        let password_hash = Password::new(&password)?.into_string();
        drop(password);

        let record = self
            .store
            .insert(NewUser::new(email, password_hash, profile))
            .await
            .map_err(|err| match err {
                StoreError::Conflict { value, .. } => AppError::duplicate(value),
                StoreError::Unavailable(detail) => AppError::storage(detail),
            })?;

        tracing::info!(user_id = %record.id, "User registered");
        Ok(PublicUser::from(record))
    }

    async fn register_and_issue(
        &self,
        credentials: Credentials,
        profile: Profile,
    ) -> AppResult<AuthSession> {
        let user = self.register(credentials, profile).await?;
        self.session(user)
    }

    async fn login(&self, credentials: Credentials) -> AppResult<AuthSession> {
        let user = self.store.find_by_email(&credentials.email).await?;

        // Verify against a dummy hash when the user is missing so both
        // failure paths cost the same.
        let stored = Password::from_hash(
            user.as_ref()
                .map_or(DUMMY_PASSWORD_HASH, |user| user.password_hash.as_str()),
        );
        let password_valid = stored.verify(&credentials.password);

        let user = match user {
            Some(user) if password_valid => user,
            _ => {
                tracing::warn!("Rejected login attempt");
                return Err(AppError::InvalidCredentials);
            }
        };

        tracing::info!(user_id = %user.id, "User logged in");
        self.session(PublicUser::from(user))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<PublicUser> {
        self.store
            .find_by_id(id)
            .await?
            .map(PublicUser::from)
            .ok_or(AppError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use mockall::predicate::eq;

    use super::*;
    use crate::domain::UserRecord;
    use crate::infra::MockUserStore;
    use crate::services::{JwtIssuer, MockTokenIssuer, TokenConfig};

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn issuer() -> Arc<JwtIssuer> {
        Arc::new(JwtIssuer::new(TokenConfig::new(SECRET, 1)))
    }

    fn failing_issuer() -> Arc<MockTokenIssuer> {
        let mut issuer = MockTokenIssuer::new();
        issuer
            .expect_issue()
            .times(1)
            .returning(|_| Err(AppError::internal("signing key rejected")));
        Arc::new(issuer)
    }

    fn record(id: Uuid, password_hash: String) -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id,
            email: "a@x.com".to_string(),
            password_hash,
            name: "Ana".to_string(),
            roles: vec!["user".to_string()],
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_register_persists_hash_not_password() {
        let mut store = MockUserStore::new();
        store
            .expect_insert()
            .withf(|user| {
                user.email == "a@x.com"
                    && user.password_hash != "secret1"
                    && Password::from_hash(user.password_hash.as_str()).verify("secret1")
            })
            .times(1)
            .returning(|user| Ok(record(Uuid::new_v4(), user.password_hash)));

        let manager = CredentialManager::new(Arc::new(store), issuer());
        let user = manager
            .register(Credentials::new("a@x.com", "secret1"), Profile::named("Ana"))
            .await
            .unwrap();

        assert_eq!(user.email, "a@x.com");
    }

    #[tokio::test]
    async fn test_register_conflict_maps_to_duplicate() {
        let mut store = MockUserStore::new();
        store.expect_insert().returning(|user| {
            Err(StoreError::Conflict {
                field: "email",
                value: user.email,
            })
        });

        let manager = CredentialManager::new(Arc::new(store), issuer());
        let err = manager
            .register(Credentials::new("a@x.com", "secret1"), Profile::named("Ana"))
            .await
            .unwrap_err();

        assert!(matches!(&err, AppError::DuplicateIdentifier(email) if email == "a@x.com"));
        assert_eq!(err.user_message(), "a@x.com already exists");
    }

    #[tokio::test]
    async fn test_register_store_failure_is_generic() {
        let mut store = MockUserStore::new();
        store
            .expect_insert()
            .returning(|_| Err(StoreError::unavailable("pool timed out after 30s")));

        let manager = CredentialManager::new(Arc::new(store), issuer());
        let err = manager
            .register(Credentials::new("a@x.com", "secret1"), Profile::named("Ana"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::StorageUnavailable(_)));
        assert!(!err.user_message().contains("pool"));
    }

    #[tokio::test]
    async fn test_register_empty_password_skips_store() {
        let mut store = MockUserStore::new();
        store.expect_insert().never();

        let manager = CredentialManager::new(Arc::new(store), issuer());
        let result = manager
            .register(Credentials::new("a@x.com", ""), Profile::named("Ana"))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_login_success_issues_token_for_subject() {
        let user_id = Uuid::new_v4();
        let hash = Password::new("secret1").unwrap().into_string();

        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .times(1)
            .returning(move |_| Ok(Some(record(user_id, hash.clone()))));
        store.expect_insert().never();

        let issuer = issuer();
        let manager = CredentialManager::new(Arc::new(store), issuer.clone());
        let session = manager
            .login(Credentials::new("a@x.com", "secret1"))
            .await
            .unwrap();

        assert_eq!(session.user.id, user_id);
        assert_eq!(issuer.verify(&session.token).unwrap().sub, user_id);
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let hash = Password::new("secret1").unwrap().into_string();

        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .returning(move |_| Ok(Some(record(Uuid::new_v4(), hash.clone()))));
        store
            .expect_find_by_email()
            .with(eq("ghost@x.com"))
            .returning(|_| Ok(None));

        let manager = CredentialManager::new(Arc::new(store), issuer());
        let wrong_password = manager
            .login(Credentials::new("a@x.com", "wrong"))
            .await
            .unwrap_err();
        let unknown_email = manager
            .login(Credentials::new("ghost@x.com", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.user_message(), unknown_email.user_message());
    }

    #[tokio::test]
    async fn test_login_store_failure_is_storage_unavailable() {
        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .returning(|_| Err(StoreError::unavailable("connection refused")));

        let manager = CredentialManager::new(Arc::new(store), issuer());
        let result = manager.login(Credentials::new("a@x.com", "secret1")).await;

        assert!(matches!(result, Err(AppError::StorageUnavailable(_))));
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_not_found() {
        let mut store = MockUserStore::new();
        store.expect_find_by_id().returning(|_| Ok(None));

        let manager = CredentialManager::new(Arc::new(store), issuer());
        let result = manager.find_by_id(Uuid::new_v4()).await;

        assert!(matches!(result, Err(AppError::NotFound)));
    }

    #[tokio::test]
    async fn test_find_by_id_returns_public_view() {
        let user_id = Uuid::new_v4();
        let mut store = MockUserStore::new();
        store
            .expect_find_by_id()
            .with(eq(user_id))
            .returning(|id| Ok(Some(record(id, "stored-hash".to_string()))));

        let manager = CredentialManager::new(Arc::new(store), issuer());
        let user = manager.find_by_id(user_id).await.unwrap();
        let json = serde_json::to_string(&user).unwrap();

        assert_eq!(user.id, user_id);
        assert!(!json.contains("stored-hash"));
    }

    #[tokio::test]
    async fn test_register_and_issue_propagates_issuer_failure() {
        let mut store = MockUserStore::new();
        store
            .expect_insert()
            .times(1)
            .returning(|user| Ok(record(Uuid::new_v4(), user.password_hash)));

        let manager = CredentialManager::new(Arc::new(store), failing_issuer());
        let err = manager
            .register_and_issue(Credentials::new("a@x.com", "secret1"), Profile::named("Ana"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.user_message(), "An internal error occurred");
    }

    #[tokio::test]
    async fn test_login_propagates_issuer_failure() {
        let hash = Password::new("secret1").unwrap().into_string();

        let mut store = MockUserStore::new();
        store
            .expect_find_by_email()
            .returning(move |_| Ok(Some(record(Uuid::new_v4(), hash.clone()))));

        let manager = CredentialManager::new(Arc::new(store), failing_issuer());
        let err = manager
            .login(Credentials::new("a@x.com", "secret1"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal(_)));
        assert_eq!(err.user_message(), "An internal error occurred");
    }
}
