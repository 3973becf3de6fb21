//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                          - Home page
//! GET  /health                    - Liveness check
//! GET  /health/ready              - Readiness check (store ping)
//!
//! # Accounts
//! GET  /register                  - Registration form
//! POST /create-user               - Register, then redirect to /welcome
//! GET  /login                     - Login form
//! POST /login                     - Login, then redirect to /welcome
//! GET  /welcome                   - Landing page after auth
//!
//! # Purchase
//! GET  /shop                      - Bike listing
//! GET  /buy-now/{id}              - Purchase detail (redirects to /shop if missing)
//! GET  /payment?bikeId=           - Purchase payment form
//! POST /process-purchase          - Purchase confirmation
//!
//! # Rental
//! GET  /rent                      - Bike listing for rental
//! GET  /rent-now                  - Bike listing for rental
//! GET  /rent-now/{id}             - Rental detail
//! POST /rent-now/{id}/checkout    - Checkout with quote
//! GET  /checkout/{id}?days=       - Checkout with quote (days defaults to 1)
//! POST /process-rental            - Payment page with quote
//! POST /rent-payment              - Rental payment form
//! POST /complete-rent             - Rental confirmation
//! ```

pub mod auth;
pub mod home;
pub mod rent;
pub mod shop;

use axum::{
    Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::from_fn,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::error::{AppError, Result};
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Static assets, relative to the workspace root.
const STATIC_DIR: &str = "crates/storefront/static";

/// Create the account routes.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", get(auth::register_page))
        .route("/create-user", post(auth::create_user))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/welcome", get(home::welcome))
}

/// Create the purchase routes.
pub fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/shop", get(shop::index))
        .route("/buy-now/{id}", get(shop::buy_now))
        .route("/payment", get(shop::payment))
        .route("/process-purchase", post(shop::process_purchase))
}

/// Create the rental routes.
pub fn rent_routes() -> Router<AppState> {
    Router::new()
        .route("/rent", get(rent::index))
        .route("/rent-now", get(rent::rent_now))
        .route("/rent-now/{id}", get(rent::details))
        .route("/rent-now/{id}/checkout", post(rent::checkout))
        .route("/checkout/{id}", get(rent::checkout_page))
        .route("/process-rental", post(rent::process_rental))
        .route("/rent-payment", post(rent::rent_payment))
        .route("/complete-rent", post(rent::complete_rent))
}

/// Create all page routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .merge(auth_routes())
        .merge(shop_routes())
        .merge(rent_routes())
}

/// Build the application router.
///
/// Pages need a `tower_sessions` layer on top; the binary adds the
/// `PostgreSQL`-backed one and tests add an in-memory one.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if either collection is unreachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let users = state.users().ping().await;
    let bikes = state.bikes().ping().await;

    match users.and(bikes) {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// The `bikeId` a form or query must carry.
fn required_bike_id(raw: Option<&str>) -> Result<&str> {
    raw.map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("Bike ID is required".to_string()))
}
