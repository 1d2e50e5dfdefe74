//! Registration, login and session token handling.

use crate::config::{AuthConfig, ConfigStore};
use crate::entities::UserRole;
use crate::entities::user::{InsertUser, User};
use crate::store::{StoreError, TicketStore};
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use evtix_sdk::token::SessionToken;
use std::sync::Arc;
use thiserror::Error;
use tokio::task;
use tracing::{debug, info};
use uuid::Uuid;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0}")]
    Validation(String),

    #[error("email is already registered")]
    EmailTaken,

    #[error("invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, expired or forged token, or a token for a user
    /// that no longer exists.
    #[error("not authenticated")]
    Unauthenticated,

    #[error("password hashing failed: {0}")]
    Hash(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for CredentialError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict("email") => CredentialError::EmailTaken,
            other => CredentialError::Store(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    /// Defaults to [`UserRole::User`].
    pub role: Option<UserRole>,
}

/// A user together with a freshly signed session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Argon2 is CPU-bound, so both helpers run on the blocking pool.
async fn hash_password(plaintext: String) -> Result<String, CredentialError> {
    task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Hash(e.to_string()))
    })
    .await
    .map_err(|e| CredentialError::Hash(e.to_string()))?
}

async fn verify_password(plaintext: String, hash: String) -> Result<bool, CredentialError> {
    task::spawn_blocking(move || {
        let Ok(parsed_hash) = PasswordHash::new(&hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    })
    .await
    .map_err(|e| CredentialError::Hash(e.to_string()))
}

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn TicketStore>,
    auth: ConfigStore<AuthConfig>,
}

impl AccountService {
    pub fn new(store: Arc<dyn TicketStore>, auth: ConfigStore<AuthConfig>) -> Self {
        Self { store, auth }
    }

    pub async fn register(&self, registration: Registration) -> Result<Session, CredentialError> {
        let role = registration.role.unwrap_or(UserRole::User);
        if role == UserRole::Admin {
            return Err(CredentialError::Validation(
                "admin accounts cannot be self-registered".to_string(),
            ));
        }
        let name = registration.name.trim().to_string();
        if name.is_empty() {
            return Err(CredentialError::Validation("name must not be empty".to_string()));
        }
        let email = normalize_email(&registration.email);
        if !email.contains('@') {
            return Err(CredentialError::Validation("email is not valid".to_string()));
        }
        if registration.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(CredentialError::Validation(format!(
                "password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }

        let password_hash = hash_password(registration.password).await?;
        let user = self
            .store
            .insert_user(InsertUser {
                name,
                email,
                password_hash,
                role,
            })
            .await?;
        info!(user_id = %user.id, role = %user.role, "User registered");
        self.issue(user).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, CredentialError> {
        let user = self
            .store
            .get_user_by_email(&normalize_email(email))
            .await?
            .ok_or(CredentialError::InvalidCredentials)?;
        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            debug!(user_id = %user.id, "Password mismatch");
            return Err(CredentialError::InvalidCredentials);
        }
        self.issue(user).await
    }

    /// Resolve a bearer token to the current user record.
    ///
    /// The user is re-read on every call so role changes apply at once.
    pub async fn authenticate(&self, token: &str) -> Result<User, CredentialError> {
        let session = {
            let auth = self.auth.read().await;
            SessionToken::verify(token, auth.secret_bytes())
        };
        let session = session.map_err(|e| {
            debug!(error = %e, "Rejected session token");
            CredentialError::Unauthenticated
        })?;
        self.current_user(session.user_id).await
    }

    pub async fn current_user(&self, id: Uuid) -> Result<User, CredentialError> {
        self.store
            .get_user(id)
            .await?
            .ok_or(CredentialError::Unauthenticated)
    }

    /// Sign a token for `user` with the current auth settings.
    pub async fn issue(&self, user: User) -> Result<Session, CredentialError> {
        let auth = self.auth.read().await;
        let token = SessionToken::new(user.id, auth.token_ttl_secs).sign(auth.secret_bytes());
        Ok(Session { token, user })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTicketStore;

    fn service() -> AccountService {
        AccountService::new(
            Arc::new(MemoryTicketStore::new()),
            ConfigStore::new(AuthConfig::new(b"test-secret".to_vec(), 3600)),
        )
    }

    fn registration(email: &str, role: Option<UserRole>) -> Registration {
        Registration {
            name: "Dana".to_string(),
            email: email.to_string(),
            password: "hunter22".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_then_login_and_authenticate() {
        let accounts = service();
        let registered = accounts
            .register(registration("Dana@Example.com", None))
            .await
            .unwrap();
        assert_eq!(registered.user.email, "dana@example.com");
        assert_eq!(registered.user.role, UserRole::User);
        assert_ne!(registered.user.password_hash, "hunter22");

        let session = accounts.login("DANA@example.com", "hunter22").await.unwrap();
        assert_eq!(session.user.id, registered.user.id);

        let user = accounts.authenticate(&session.token).await.unwrap();
        assert_eq!(user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_password_hashing_on_blocking_pool() {
        let hash = hash_password("hunter22".to_string()).await.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("hunter22".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("hunter23".to_string(), hash).await.unwrap());
        assert!(!verify_password("hunter22".to_string(), "not-a-hash".to_string())
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email() {
        let accounts = service();
        accounts
            .register(registration("dana@example.com", None))
            .await
            .unwrap();
        assert!(matches!(
            accounts.login("dana@example.com", "wrong-pass").await,
            Err(CredentialError::InvalidCredentials)
        ));
        assert!(matches!(
            accounts.login("nobody@example.com", "hunter22").await,
            Err(CredentialError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_registration_rules() {
        let accounts = service();
        assert!(matches!(
            accounts
                .register(registration("root@example.com", Some(UserRole::Admin)))
                .await,
            Err(CredentialError::Validation(_))
        ));

        let mut short = registration("short@example.com", None);
        short.password = "12345".to_string();
        assert!(matches!(
            accounts.register(short).await,
            Err(CredentialError::Validation(_))
        ));

        let organizer = accounts
            .register(registration("org@example.com", Some(UserRole::Organizer)))
            .await
            .unwrap();
        assert_eq!(organizer.user.role, UserRole::Organizer);
        assert!(matches!(
            accounts
                .register(registration("ORG@example.com", None))
                .await,
            Err(CredentialError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn test_foreign_token_rejected() {
        let accounts = service();
        let forged = SessionToken::new(Uuid::now_v7(), 3600).sign(b"other-secret");
        assert!(matches!(
            accounts.authenticate(&forged).await,
            Err(CredentialError::Unauthenticated)
        ));
        let unknown_user = SessionToken::new(Uuid::now_v7(), 3600).sign(b"test-secret");
        assert!(matches!(
            accounts.authenticate(&unknown_user).await,
            Err(CredentialError::Unauthenticated)
        ));
    }
}
