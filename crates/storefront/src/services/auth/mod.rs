//! Account service.
//!
//! Password registration and login against the `users` collection. The
//! caller's session is passed into every call; a successful registration or
//! login binds the user's first name to it.

mod error;
mod password;

pub use error::{AuthError, RegistrationFailure};
pub use password::{Argon2Hasher, PasswordHasher};

use royal_bike_core::Email;

use crate::db::{DocumentStore, RepositoryError};
use crate::models::{NewUser, User, UserField};
use crate::services::session::SessionStore;

/// Oldest age accepted on the registration form.
const MAX_AGE: u8 = 150;

/// Raw registration form input.
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub age: String,
}

/// Account service.
///
/// Handles user registration, login and the session display name.
pub struct AccountService<'a> {
    users: &'a dyn DocumentStore<User>,
    hasher: &'a dyn PasswordHasher,
}

impl<'a> AccountService<'a> {
    /// Create a new account service.
    #[must_use]
    pub const fn new(users: &'a dyn DocumentStore<User>, hasher: &'a dyn PasswordHasher) -> Self {
        Self { users, hasher }
    }

    /// Register a new user and bind their first name to the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::RegistrationFailed` if the input is invalid, the
    /// email is taken, or hashing or persistence fails.
    pub async fn register<S>(
        &self,
        session: &S,
        registration: Registration,
    ) -> Result<User, AuthError>
    where
        S: SessionStore + ?Sized,
    {
        let draft = self.validate(registration)?;

        let user = self.users.insert(draft).await.map_err(|e| match e {
            RepositoryError::Conflict(_) => RegistrationFailure::EmailTaken,
            other => RegistrationFailure::Repository(other),
        })?;

        tracing::info!(user_id = %user.id, "User registered");

        // The account exists from here on; a lost session write only costs
        // the user a login.
        if let Err(e) = session.bind_display_name(&user.first_name).await {
            tracing::warn!(user_id = %user.id, "Registered but session not bound: {}", e);
        }

        Ok(user)
    }

    /// Login with email and password, binding the first name to the session.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email is unknown or the
    /// password is wrong (including a malformed email).
    /// Returns `AuthError::StoreUnavailable` if the user lookup fails.
    pub async fn login<S>(&self, session: &S, email: &str, password: &str) -> Result<User, AuthError>
    where
        S: SessionStore + ?Sized,
    {
        let email = Email::parse(email).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .find_one(UserField::Email, email.as_str())
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        session.bind_display_name(&user.first_name).await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(user)
    }

    /// The display name bound to the session, if the client is logged in.
    ///
    /// A session read failure is logged and treated as logged out.
    pub async fn current_display_name<S>(session: &S) -> Option<String>
    where
        S: SessionStore + ?Sized,
    {
        match session.display_name().await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!("Failed to read session display name: {}", e);
                None
            }
        }
    }

    /// Validate the form and hash the password.
    fn validate(&self, registration: Registration) -> Result<NewUser, RegistrationFailure> {
        let first_name = required(registration.first_name, "first name")?;
        let last_name = registration.last_name.trim().to_owned();
        let email = Email::parse(&registration.email)?;

        if registration.password.is_empty() {
            return Err(RegistrationFailure::MissingField("password"));
        }

        let age = parse_age(&registration.age)?;
        let password_hash = self.hasher.hash(&registration.password)?;

        Ok(NewUser {
            first_name,
            last_name,
            email,
            password_hash,
            phone: registration.phone.trim().to_owned(),
            age,
        })
    }
}

fn required(value: String, field: &'static str) -> Result<String, RegistrationFailure> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RegistrationFailure::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

fn parse_age(input: &str) -> Result<u8, RegistrationFailure> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|age| *age <= MAX_AGE)
        .ok_or_else(|| RegistrationFailure::InvalidAge(input.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::{MemoryStore as SessionMemoryStore, Session};

    use super::*;
    use crate::db::MemoryStore;
    use crate::services::session::SessionError;

    fn session() -> Session {
        Session::new(None, Arc::new(SessionMemoryStore::default()), None)
    }

    fn ann() -> Registration {
        Registration {
            first_name: "Ann".to_string(),
            last_name: "Rider".to_string(),
            email: "Ann@Example.com".to_string(),
            password: "pedal-power".to_string(),
            phone: "555-0100".to_string(),
            age: "31".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hashed_password() {
        let users = MemoryStore::<User>::new();
        let hasher = Argon2Hasher::new();
        let accounts = AccountService::new(&users, &hasher);
        let session = session();

        let user = accounts.register(&session, ann()).await.unwrap();

        assert_eq!(users.len().await, 1);
        let stored = users.find_by_id(user.id).await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "pedal-power");
        assert!(hasher.verify("pedal-power", &stored.password_hash));
        assert_eq!(stored.email.as_str(), "ann@example.com");
        assert_eq!(stored.age, 31);
    }

    #[tokio::test]
    async fn test_register_binds_session_name() {
        let users = MemoryStore::<User>::new();
        let hasher = Argon2Hasher::new();
        let accounts = AccountService::new(&users, &hasher);
        let session = session();

        accounts.register(&session, ann()).await.unwrap();

        assert_eq!(
            AccountService::current_display_name(&session).await.as_deref(),
            Some("Ann")
        );
    }

    /// A session backend that rejects every write.
    struct ReadOnlySession;

    #[async_trait::async_trait]
    impl SessionStore for ReadOnlySession {
        async fn display_name(&self) -> Result<Option<String>, SessionError> {
            Ok(None)
        }

        async fn bind_display_name(&self, _name: &str) -> Result<(), SessionError> {
            Err(SessionError::new("backend is read-only"))
        }
    }

    #[tokio::test]
    async fn test_register_survives_session_write_failure() {
        let users = MemoryStore::<User>::new();
        let hasher = Argon2Hasher::new();
        let accounts = AccountService::new(&users, &hasher);

        let user = accounts.register(&ReadOnlySession, ann()).await.unwrap();
        assert_eq!(users.len().await, 1);

        // The stored account is usable straight away
        let logged_in = accounts
            .login(&session(), "ann@example.com", "pedal-power")
            .await
            .unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let users = MemoryStore::<User>::new();
        let hasher = Argon2Hasher::new();
        let accounts = AccountService::new(&users, &hasher);

        accounts.register(&session(), ann()).await.unwrap();
        let err = accounts
            .register(
                &session(),
                Registration {
                    email: "ann@example.com".to_string(),
                    ..ann()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AuthError::RegistrationFailed(RegistrationFailure::EmailTaken)
        ));
        assert_eq!(users.len().await, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let users = MemoryStore::<User>::new();
        let hasher = Argon2Hasher::new();
        let accounts = AccountService::new(&users, &hasher);

        let cases = [
            Registration {
                first_name: "  ".to_string(),
                ..ann()
            },
            Registration {
                email: "not-an-email".to_string(),
                ..ann()
            },
            Registration {
                password: String::new(),
                ..ann()
            },
            Registration {
                age: "thirty".to_string(),
                ..ann()
            },
            Registration {
                age: "200".to_string(),
                ..ann()
            },
        ];

        for registration in cases {
            let session = session();
            let err = accounts.register(&session, registration).await.unwrap_err();
            assert!(matches!(err, AuthError::RegistrationFailed(_)));
            assert_eq!(AccountService::current_display_name(&session).await, None);
        }
        assert!(users.is_empty().await);
    }

    #[tokio::test]
    async fn test_login_binds_registered_name() {
        let users = MemoryStore::<User>::new();
        let hasher = Argon2Hasher::new();
        let accounts = AccountService::new(&users, &hasher);
        accounts.register(&session(), ann()).await.unwrap();

        let login_session = session();
        let user = accounts
            .login(&login_session, "ann@example.com", "pedal-power")
            .await
            .unwrap();

        assert_eq!(user.first_name, "Ann");
        assert_eq!(
            AccountService::current_display_name(&login_session)
                .await
                .as_deref(),
            Some("Ann")
        );
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let users = MemoryStore::<User>::new();
        let hasher = Argon2Hasher::new();
        let accounts = AccountService::new(&users, &hasher);
        accounts.register(&session(), ann()).await.unwrap();

        let wrong_password = accounts
            .login(&session(), "ann@example.com", "wrong")
            .await
            .unwrap_err();
        let unknown_email = accounts
            .login(&session(), "nobody@example.com", "pedal-power")
            .await
            .unwrap_err();
        let malformed_email = accounts
            .login(&session(), "nobody", "pedal-power")
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert!(matches!(malformed_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_unbound() {
        let users = MemoryStore::<User>::new();
        let hasher = Argon2Hasher::new();
        let accounts = AccountService::new(&users, &hasher);
        accounts.register(&session(), ann()).await.unwrap();

        let session = session();
        let _ = accounts.login(&session, "ann@example.com", "wrong").await;

        assert_eq!(AccountService::current_display_name(&session).await, None);
    }
}
