//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, outermost)
//! 2. Session layer (tower-sessions with `PostgreSQL` store)
//! 3. `TraceLayer` (request tracing)
//! 4. Request ID (add unique ID to each request)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::CurrentUserName;
pub use request_id::request_id_middleware;
pub use session::{create_session_layer, session_layer};
