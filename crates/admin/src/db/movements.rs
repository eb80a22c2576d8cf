//! Stock movement database operations.
//!
//! Movements are append-only: this module inserts and reads, never updates
//! or deletes.

use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};

use stockroom_core::ProductId;
use stockroom_core::ledger::MovementDraft;

use super::RepositoryError;
use crate::models::{MovementWithProduct, StockMovement};

const MOVEMENT_COLUMNS: &str = "m.id, m.product_id, m.movement_type, m.quantity, m.reference, \
    m.notes, m.created_at, m.created_by";

/// Stored stock next to the signed sum of a product's movements.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct LedgerBalanceRow {
    pub product_id: ProductId,
    pub name: String,
    pub current_stock: i32,
    pub ledger_balance: i64,
}

/// Repository for movement reads.
pub struct MovementRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MovementRepository<'a> {
    /// Create a new movement repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Most recent movements across all products, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn recent(&self, limit: i64) -> Result<Vec<MovementWithProduct>, RepositoryError> {
        let movements = sqlx::query_as::<_, MovementWithProduct>(&format!(
            "SELECT {MOVEMENT_COLUMNS}, p.name AS product_name \
             FROM stock_movements m \
             JOIN products p ON p.id = m.product_id \
             ORDER BY m.created_at DESC, m.id DESC \
             LIMIT $1"
        ))
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(movements)
    }

    /// Movements created at or after `since`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn since(
        &self,
        since: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<MovementWithProduct>, RepositoryError> {
        let movements = sqlx::query_as::<_, MovementWithProduct>(&format!(
            "SELECT {MOVEMENT_COLUMNS}, p.name AS product_name \
             FROM stock_movements m \
             JOIN products p ON p.id = m.product_id \
             WHERE m.created_at >= $1 \
             ORDER BY m.created_at DESC, m.id DESC \
             LIMIT $2"
        ))
        .bind(since)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(movements)
    }

    /// Every movement of one product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn for_product(
        &self,
        product_id: ProductId,
    ) -> Result<Vec<StockMovement>, RepositoryError> {
        let movements = sqlx::query_as::<_, StockMovement>(&format!(
            "SELECT {MOVEMENT_COLUMNS} FROM stock_movements m \
             WHERE m.product_id = $1 \
             ORDER BY m.created_at ASC, m.id ASC"
        ))
        .bind(product_id)
        .fetch_all(self.pool)
        .await?;

        Ok(movements)
    }

    /// Stored stock and ledger sum for every product, by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn ledger_balances(&self) -> Result<Vec<LedgerBalanceRow>, RepositoryError> {
        let rows = sqlx::query_as::<_, LedgerBalanceRow>(
            r"
            SELECT p.id AS product_id, p.name, p.current_stock,
                   COALESCE(SUM(
                       CASE m.movement_type WHEN 'IN' THEN m.quantity ELSE -m.quantity END
                   ), 0)::BIGINT AS ledger_balance
            FROM products p
            LEFT JOIN stock_movements m ON m.product_id = p.id
            GROUP BY p.id
            ORDER BY p.name ASC, p.id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Count all movements.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM stock_movements")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

/// Append a movement inside a ledger transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert(
    conn: &mut PgConnection,
    product_id: ProductId,
    draft: &MovementDraft,
) -> Result<StockMovement, RepositoryError> {
    let movement = sqlx::query_as::<_, StockMovement>(&format!(
        "INSERT INTO stock_movements AS m \
             (product_id, movement_type, quantity, reference, notes, created_by) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING {MOVEMENT_COLUMNS}"
    ))
    .bind(product_id)
    .bind(draft.movement_type)
    .bind(draft.quantity.get())
    .bind(&draft.reference)
    .bind(&draft.notes)
    .bind(&draft.created_by)
    .fetch_one(conn)
    .await?;

    Ok(movement)
}
