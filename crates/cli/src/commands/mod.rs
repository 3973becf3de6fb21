//! CLI command implementations.

pub mod bikes;
pub mod migrate;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

use royal_bike_storefront::config::{ConfigError, ShopConfig};
use royal_bike_storefront::db::{self, RepositoryError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A collection operation failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Seed file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// Seed file is not valid YAML for a catalog.
    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Seed file parsed but contains bad entries.
    #[error("Invalid bike #{index} ({name:?}): {reason}")]
    InvalidBike {
        index: usize,
        name: String,
        reason: &'static str,
    },
}

/// Load configuration and connect to the storefront database.
async fn connect() -> Result<PgPool, CliError> {
    let config = ShopConfig::from_env()?;

    tracing::info!("Connecting to storefront database...");
    Ok(db::create_pool(&config.database_url).await?)
}
