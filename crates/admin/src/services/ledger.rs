//! Transactional stock ledger.
//!
//! Every change to `products.current_stock` goes through [`StockLedger`],
//! which writes the matching movement in the same transaction. The product
//! row is locked with `SELECT ... FOR UPDATE` before any read-modify-write,
//! so concurrent updates to one product serialize.
//!
//! Dropping the transaction on an error path rolls it back; neither the
//! movement nor the stock change becomes visible.

use sqlx::PgPool;
use thiserror::Error;
use tracing::instrument;

use stockroom_core::ledger::{MovementDraft, apply_movement};
use stockroom_core::{ProductId, ValidationError};

use crate::db::{RepositoryError, categories, movements, products};
use crate::models::{Product, ProductInput, StockMovement, StockUpdate};

/// Errors from stock ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Input was rejected before touching stock.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The product does not exist.
    #[error("product {0} not found")]
    ProductNotFound(ProductId),

    /// The referenced category does not exist.
    #[error("category {0} not found")]
    CategoryNotFound(stockroom_core::CategoryId),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sqlx::Error> for LedgerError {
    fn from(e: sqlx::Error) -> Self {
        Self::Repository(RepositoryError::Database(e))
    }
}

/// A product together with the movement written for it, if any.
#[derive(Debug, Clone)]
pub struct LedgerOutcome {
    pub product: Product,
    pub movement: Option<StockMovement>,
}

/// Result of an explicit stock update.
#[derive(Debug, Clone)]
pub struct StockChange {
    pub movement: StockMovement,
    pub new_stock: i32,
}

/// Stock ledger bound to a pool and a creator label.
pub struct StockLedger<'a> {
    pool: &'a PgPool,
    created_by: &'a str,
}

impl<'a> StockLedger<'a> {
    /// Create a ledger that records `created_by` on every movement.
    #[must_use]
    pub const fn new(pool: &'a PgPool, created_by: &'a str) -> Self {
        Self { pool, created_by }
    }

    /// Create a product, recording its opening stock as an IN movement.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::CategoryNotFound` for an unknown category and
    /// `LedgerError::Repository` if the database fails.
    #[instrument(skip(self, input), fields(name = %input.name, stock = input.current_stock))]
    pub async fn create_product(&self, input: &ProductInput) -> Result<LedgerOutcome, LedgerError> {
        let mut tx = self.pool.begin().await?;

        if !categories::lock_exists(&mut tx, input.category_id).await? {
            return Err(LedgerError::CategoryNotFound(input.category_id));
        }

        let product = products::insert(&mut tx, input).await?;

        let movement = match MovementDraft::initial_stock(product.current_stock, self.created_by) {
            Some(draft) => Some(movements::insert(&mut tx, product.id, &draft).await?),
            None => None,
        };

        tx.commit().await?;

        tracing::info!(
            product_id = %product.id,
            current_stock = product.current_stock,
            initial_movement = movement.is_some(),
            "Product created"
        );

        Ok(LedgerOutcome { product, movement })
    }

    /// Update a product's fields; a stock change becomes an adjustment
    /// movement of the difference.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ProductNotFound` or
    /// `LedgerError::CategoryNotFound` for unknown references and
    /// `LedgerError::Repository` if the database fails.
    #[instrument(skip(self, input), fields(product_id = %id, stock = input.current_stock))]
    pub async fn update_product(
        &self,
        id: ProductId,
        input: &ProductInput,
    ) -> Result<LedgerOutcome, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let existing = products::lock(&mut tx, id)
            .await?
            .ok_or(LedgerError::ProductNotFound(id))?;

        if existing.category_id != input.category_id
            && !categories::lock_exists(&mut tx, input.category_id).await?
        {
            return Err(LedgerError::CategoryNotFound(input.category_id));
        }

        let old_stock = existing.current_stock;
        let draft = MovementDraft::adjustment(old_stock, input.current_stock, self.created_by);

        let movement = match &draft {
            Some(draft) => Some(movements::insert(&mut tx, id, draft).await?),
            None => None,
        };
        let product = products::update(&mut tx, id, input).await?;

        tx.commit().await?;

        if let Some(movement) = &movement {
            tracing::info!(
                product_id = %id,
                movement_type = %movement.movement_type,
                quantity = movement.quantity,
                old_stock,
                new_stock = product.current_stock,
                "Stock adjusted by edit"
            );
        }

        Ok(LedgerOutcome { product, movement })
    }

    /// Apply an explicit IN/OUT movement.
    ///
    /// OUT floors the stock at zero but records the full requested quantity.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::ProductNotFound` for an unknown product,
    /// `LedgerError::Validation` if an IN would overflow, and
    /// `LedgerError::Repository` if the database fails.
    #[instrument(skip(self, update), fields(product_id = %id, movement_type = %update.movement_type, quantity = %update.quantity))]
    pub async fn record_movement(
        &self,
        id: ProductId,
        update: &StockUpdate,
    ) -> Result<StockChange, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let product = products::lock(&mut tx, id)
            .await?
            .ok_or(LedgerError::ProductNotFound(id))?;

        let new_stock = apply_movement(product.current_stock, update.movement_type, update.quantity)?;
        let draft = MovementDraft::manual(
            update.movement_type,
            update.quantity,
            update.reference.as_deref(),
            update.notes.as_deref(),
            self.created_by,
        );

        let movement = movements::insert(&mut tx, id, &draft).await?;
        products::set_stock(&mut tx, id, new_stock).await?;

        tx.commit().await?;

        tracing::info!(
            product_id = %id,
            movement_type = %movement.movement_type,
            quantity = movement.quantity,
            old_stock = product.current_stock,
            new_stock,
            "Stock updated"
        );

        Ok(StockChange {
            movement,
            new_stock,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LedgerError::ProductNotFound(ProductId::new(42)).to_string(),
            "product 42 not found"
        );
        assert_eq!(
            LedgerError::Validation(ValidationError::StockOverflow).to_string(),
            ValidationError::StockOverflow.to_string()
        );
    }
}
