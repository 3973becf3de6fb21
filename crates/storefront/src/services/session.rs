//! Session capability.
//!
//! Services never reach for an ambient session; handlers pass the
//! request's session in explicitly. In production that is the
//! `tower_sessions::Session` extracted by axum.

use async_trait::async_trait;
use thiserror::Error;
use tower_sessions::Session;

use crate::models::session_keys;

/// The session backend failed to read or write the bag.
#[derive(Debug, Error)]
#[error("session error: {0}")]
pub struct SessionError(String);

impl SessionError {
    /// Wrap a backend failure message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<tower_sessions::session::Error> for SessionError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self(err.to_string())
    }
}

/// Per-client session bag holding the authenticated display name.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The bound display name, if any.
    async fn display_name(&self) -> Result<Option<String>, SessionError>;

    /// Bind the display name for subsequent requests from this client.
    async fn bind_display_name(&self, name: &str) -> Result<(), SessionError>;
}

#[async_trait]
impl SessionStore for Session {
    async fn display_name(&self) -> Result<Option<String>, SessionError> {
        Ok(self.get::<String>(session_keys::USER_NAME).await?)
    }

    async fn bind_display_name(&self, name: &str) -> Result<(), SessionError> {
        self.insert(session_keys::USER_NAME, name).await?;
        Ok(())
    }
}
