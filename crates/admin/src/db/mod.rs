//! Database operations for the inventory `PostgreSQL` database.
//!
//! ## Tables
//!
//! - `categories` - Product groupings (unique name)
//! - `products` - Catalogue with `current_stock` maintained by the ledger
//! - `stock_movements` - Append-only IN/OUT audit trail
//! - `suppliers` - Supplier contact list
//! - `tower_sessions.session` - Flash message sessions
//!
//! # Migrations
//!
//! Migrations are stored in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p stockroom-cli -- migrate
//! ```
//!
//! Queries are built at runtime with `sqlx::query_as::<_, T>` so the crate
//! compiles without a live database.

pub mod categories;
pub mod movements;
pub mod products;
pub mod reports;
pub mod suppliers;

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::migrate::Migrator;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub use categories::CategoryRepository;
pub use movements::MovementRepository;
pub use products::{ProductFilter, ProductRepository};
pub use reports::ReportRepository;
pub use suppliers::SupplierRepository;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate category name).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a unique violation to `Conflict`, anything else to `Database`.
    pub(crate) fn unique_or_database(e: sqlx::Error, message: impl FnOnce() -> String) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_unique_violation()
        {
            return Self::Conflict(message());
        }
        Self::Database(e)
    }

    /// Map a foreign-key violation to `Conflict`, anything else to `Database`.
    pub(crate) fn foreign_key_or_database(
        e: sqlx::Error,
        message: impl FnOnce() -> String,
    ) -> Self {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.is_foreign_key_violation()
        {
            return Self::Conflict(message());
        }
        Self::Database(e)
    }
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
