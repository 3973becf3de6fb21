//! Home and welcome pages.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Query, response::IntoResponse};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::middleware::CurrentUserName;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct HomeTemplate {
    pub user_name: Option<String>,
}

/// Welcome page template.
#[derive(Template, WebTemplate)]
#[template(path = "welcome.html")]
pub struct WelcomeTemplate {
    pub user_name: Option<String>,
}

/// Query parameters for the welcome page.
#[derive(Debug, Deserialize)]
pub struct WelcomeQuery {
    pub name: Option<String>,
}

/// Display the home page.
#[instrument(skip_all)]
pub async fn home(CurrentUserName(user_name): CurrentUserName) -> impl IntoResponse {
    HomeTemplate { user_name }
}

/// Display the welcome page.
///
/// Greets `?name=` when given, otherwise the name bound to the session.
#[instrument(skip(session_name))]
pub async fn welcome(
    Query(query): Query<WelcomeQuery>,
    CurrentUserName(session_name): CurrentUserName,
) -> impl IntoResponse {
    let user_name = query
        .name
        .map(|n| n.trim().to_owned())
        .filter(|n| !n.is_empty())
        .or(session_name);

    WelcomeTemplate { user_name }
}
