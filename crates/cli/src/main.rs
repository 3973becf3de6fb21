//! Royal Bike Club CLI - Database migrations and catalog management.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! rbc-cli migrate
//!
//! # Load the bike catalog from YAML (optionally replacing what is there)
//! rbc-cli seed bikes crates/cli/seed/bikes.yaml --clear
//!
//! # Show the catalog
//! rbc-cli bikes list
//! ```
//!
//! # Environment Variables
//!
//! - `ROYAL_BIKE_DATABASE_URL` - `PostgreSQL` connection string (falls back to `DATABASE_URL`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "rbc-cli")]
#[command(author, version, about = "Royal Bike Club CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run storefront database migrations
    Migrate,
    /// Seed the database
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Inspect the bike catalog
    Bikes {
        #[command(subcommand)]
        action: BikesAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Load bikes from a YAML file
    Bikes {
        /// Path to the YAML catalog
        file: String,

        /// Delete existing bikes first
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum BikesAction {
    /// List every bike in catalog order
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Bikes { file, clear } => commands::seed::bikes(&file, clear).await?,
        },
        Commands::Bikes { action } => match action {
            BikesAction::List => commands::bikes::list().await?,
        },
    }
    Ok(())
}
