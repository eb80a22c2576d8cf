//! CLI subcommands.

pub mod migrate;
pub mod reconcile;
pub mod seed;

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

use stockroom_admin::db::{self, RepositoryError};
use stockroom_admin::services::LedgerError;
use stockroom_core::ValidationError;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration failed.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Seed data failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Repository query failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Ledger write failed.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Seed data refers to a category that does not exist.
    #[error("Seed category not found: {0}")]
    MissingCategory(&'static str),

    /// `current_stock` disagrees with the ledger for some products.
    #[error("{0} product(s) out of step with the stock ledger")]
    Drift(usize),
}

/// Connect using `STOCKROOM_DATABASE_URL`, falling back to `DATABASE_URL`.
pub async fn connect() -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("STOCKROOM_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("STOCKROOM_DATABASE_URL"))?;

    tracing::info!("Connecting to database...");
    Ok(db::create_pool(&database_url).await?)
}
