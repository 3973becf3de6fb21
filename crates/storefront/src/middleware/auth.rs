//! Session-aware extractors.
//!
//! No page on the site is access-gated; handlers only use the bound display
//! name to personalize what they render.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::services::AccountService;

/// Extractor for the logged-in user's display name, if any.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CurrentUserName(name): CurrentUserName) -> impl IntoResponse {
///     match name {
///         Some(n) => format!("Hello, {n}!"),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
pub struct CurrentUserName(pub Option<String>);

impl<S> FromRequestParts<S> for CurrentUserName
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Set by SessionManagerLayer; absent when the router runs without one
        let name = match parts.extensions.get::<Session>() {
            Some(session) => AccountService::current_display_name(session).await,
            None => None,
        };

        Ok(Self(name))
    }
}
