//! Authentication route handlers.
//!
//! Handles password registration and login. Both bind the user's first name
//! to the session and land on the welcome page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::services::{AuthError, Registration};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Registration form data.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateUserForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
    pub age: String,
}

impl From<CreateUserForm> for Registration {
    fn from(form: CreateUserForm) -> Self {
        Self {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
            password: form.password,
            phone: form.phone,
            age: form.age,
        }
    }
}

/// Query parameters for error display.
#[derive(Debug, Deserialize)]
pub struct MessageQuery {
    pub error: Option<String>,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

/// Register page template.
#[derive(Template, WebTemplate)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub error: Option<&'static str>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the registration page.
pub async fn register_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    RegisterTemplate {
        error: query
            .error
            .map(|_| "We couldn't create your account. Please check your details and try again."),
    }
}

/// Handle registration form submission.
pub async fn create_user(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CreateUserForm>,
) -> Redirect {
    match state.accounts().register(&session, form.into()).await {
        Ok(user) => Redirect::to(&welcome_url(&user.first_name)),
        Err(e) => {
            tracing::warn!("Registration failed: {}", e);
            Redirect::to("/register?error=failed")
        }
    }
}

/// Display the login page.
pub async fn login_page(Query(query): Query<MessageQuery>) -> impl IntoResponse {
    LoginTemplate {
        error: query.error.map(|_| "Invalid email or password."),
    }
}

/// Handle login form submission.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Redirect {
    match state
        .accounts()
        .login(&session, &form.email, &form.password)
        .await
    {
        Ok(user) => Redirect::to(&welcome_url(&user.first_name)),
        Err(AuthError::InvalidCredentials) => {
            tracing::info!("Login rejected: invalid credentials");
            Redirect::to("/login?error=credentials")
        }
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(sentry_event_id = %event_id, "Login failed: {}", e);
            Redirect::to("/login?error=credentials")
        }
    }
}

fn welcome_url(first_name: &str) -> String {
    format!("/welcome?name={}", urlencoding::encode(first_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_welcome_url_encodes_name() {
        assert_eq!(welcome_url("Ann"), "/welcome?name=Ann");
        assert_eq!(welcome_url("Mary Ann"), "/welcome?name=Mary%20Ann");
        assert_eq!(welcome_url("A&B"), "/welcome?name=A%26B");
    }
}
