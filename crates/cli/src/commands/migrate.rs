//! Database migration commands.
//!
//! # Usage
//!
//! ```bash
//! rbc-cli migrate
//! ```
//!
//! Migrations live in `crates/storefront/migrations/` and create the
//! `users` and `bikes` collections plus the session table.

use super::{CliError, connect};

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns an error if the database is unreachable or a migration fails.
pub async fn storefront() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running storefront migrations...");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
