//! Database migration command.
//!
//! Applies `crates/admin/migrations/` and creates the session table used by
//! the admin panel. Migrations are never run by the server itself.

use tower_sessions_sqlx_store::PostgresStore;

use stockroom_admin::db::MIGRATOR;

use super::{CliError, connect};

/// Run all migrations.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    tracing::info!("Running inventory migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Creating session store...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
