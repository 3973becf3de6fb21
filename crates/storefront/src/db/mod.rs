//! Document storage for the storefront.
//!
//! # Collections
//!
//! - `users` - Registered customers (unique `email`)
//! - `bikes` - The bike catalog, seeded out of band by `rbc-cli`
//! - `tower_sessions.session` - Session bags (managed by tower-sessions)
//!
//! Handlers and services only see the [`DocumentStore`] capability. The
//! production implementations are [`UserRepository`] and [`BikeRepository`]
//! on `PostgreSQL`; [`MemoryStore`] backs tests and local tooling.
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p royal-bike-cli -- migrate
//! ```

pub mod bikes;
pub mod memory;
pub mod users;

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use bikes::BikeRepository;
pub use memory::MemoryStore;
pub use users::UserRepository;

/// Errors raised by a document store.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the store is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A record type that lives in a collection.
pub trait Document: Clone + Send + Sync + 'static {
    /// Store-assigned identifier.
    type Id: Copy + Eq + fmt::Display + Send + Sync + 'static;
    /// The record before the store has assigned it an identity.
    type Draft: Send + 'static;
    /// Fields that support exact-match lookup.
    type Field: Copy + Eq + fmt::Debug + Send + Sync + 'static;

    /// Collection name, used in logs.
    const COLLECTION: &'static str;

    /// Fields whose values must be unique within the collection.
    const UNIQUE_FIELDS: &'static [Self::Field] = &[];

    fn id(&self) -> Self::Id;

    fn new_id() -> Self::Id;

    /// Current value of a lookup field.
    fn field_value(&self, field: Self::Field) -> &str;

    /// Combine a draft with its assigned identity.
    fn materialize(id: Self::Id, draft: Self::Draft, created_at: DateTime<Utc>) -> Self;
}

/// Capability interface over one collection.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// Persist a new record and return it with its assigned identity.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a unique field is already taken.
    async fn insert(&self, draft: T::Draft) -> Result<T, RepositoryError>;

    /// Fetch a record by id. `Ok(None)` means no such record.
    async fn find_by_id(&self, id: T::Id) -> Result<Option<T>, RepositoryError>;

    /// Every record in the collection's natural (creation) order.
    async fn find_all(&self) -> Result<Vec<T>, RepositoryError>;

    /// First record whose `field` equals `value`.
    async fn find_one(&self, field: T::Field, value: &str)
    -> Result<Option<T>, RepositoryError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Map a sqlx error to `Conflict` when it is a unique violation.
pub(crate) fn conflict_or_database(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Check database connectivity.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn ping(pool: &PgPool) -> Result<(), RepositoryError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
