//! Stock ledger rules.
//!
//! A product's `current_stock` only changes together with an appended
//! movement record. This module holds the pure half of that contract: which
//! movement to write for each entry point and how a movement changes stock.
//! The admin crate wraps these in a database transaction.
//!
//! # Entry points
//!
//! | Entry point | Movement | Stock effect |
//! |---|---|---|
//! | product created with stock `S > 0` | `IN S`, "Initial Stock" | none (already `S`) |
//! | edit from `old` to `new != old` | `IN/OUT abs(new-old)`, "Stock Adjustment" | set to `new` |
//! | explicit update | as requested | [`apply_movement`] |
//!
//! An explicit `OUT` larger than the stock on hand empties the product but
//! keeps the requested quantity on the movement record, so the signed sum of
//! movements can fall below `current_stock`. [`reconcile`] reports the gap.

use crate::{MovementType, Quantity, ValidationError};

/// Reference recorded on the movement written when a product is created with stock.
pub const INITIAL_STOCK_REFERENCE: &str = "Initial Stock";

/// Notes recorded on the initial stock movement.
pub const INITIAL_STOCK_NOTES: &str = "Initial inventory setup";

/// Reference recorded on movements written by product edits.
pub const ADJUSTMENT_REFERENCE: &str = "Stock Adjustment";

/// Creator label for movements made through the admin panel.
pub const CREATED_BY_ADMIN: &str = "Admin";

/// Creator label for movements made by the seed command.
pub const CREATED_BY_SYSTEM: &str = "System";

/// A movement record that has not been written yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    /// Direction.
    pub movement_type: MovementType,
    /// Units moved.
    pub quantity: Quantity,
    /// Free-text reference (invoice number, order, reason).
    pub reference: Option<String>,
    /// Free-text notes.
    pub notes: Option<String>,
    /// Free-text creator label.
    pub created_by: String,
}

impl MovementDraft {
    /// Movement for a product created with `stock` units on hand.
    ///
    /// Returns `None` when the product starts empty.
    #[must_use]
    pub fn initial_stock(stock: i32, created_by: &str) -> Option<Self> {
        let quantity = Quantity::new(stock).ok()?;
        Some(Self {
            movement_type: MovementType::In,
            quantity,
            reference: Some(INITIAL_STOCK_REFERENCE.to_owned()),
            notes: Some(INITIAL_STOCK_NOTES.to_owned()),
            created_by: created_by.to_owned(),
        })
    }

    /// Movement for an edit that changes stock from `old` to `new`.
    ///
    /// Returns `None` when the stock is unchanged.
    #[must_use]
    pub fn adjustment(old: i32, new: i32, created_by: &str) -> Option<Self> {
        let movement_type = MovementType::for_change(old, new)?;
        let quantity = Quantity::between(old, new)?;
        Some(Self {
            movement_type,
            quantity,
            reference: Some(ADJUSTMENT_REFERENCE.to_owned()),
            notes: Some(format!("Stock adjusted from {old} to {new}")),
            created_by: created_by.to_owned(),
        })
    }

    /// Movement requested explicitly by an operator.
    ///
    /// Blank reference and notes are stored as absent.
    #[must_use]
    pub fn manual(
        movement_type: MovementType,
        quantity: Quantity,
        reference: Option<&str>,
        notes: Option<&str>,
        created_by: &str,
    ) -> Self {
        Self {
            movement_type,
            quantity,
            reference: non_blank(reference),
            notes: non_blank(notes),
            created_by: created_by.to_owned(),
        }
    }
}

/// Stock level after applying an explicit movement.
///
/// `IN` adds the quantity. `OUT` subtracts it and floors at zero.
///
/// # Errors
///
/// Returns [`ValidationError::StockOverflow`] if an `IN` would exceed `i32::MAX`.
pub fn apply_movement(
    current_stock: i32,
    movement_type: MovementType,
    quantity: Quantity,
) -> Result<i32, ValidationError> {
    match movement_type {
        MovementType::In => current_stock
            .checked_add(quantity.get())
            .ok_or(ValidationError::StockOverflow),
        MovementType::Out => Ok(current_stock.saturating_sub(quantity.get()).max(0)),
    }
}

/// Signed sum of a product's movements (IN positive, OUT negative).
pub fn ledger_balance<I>(movements: I) -> i64
where
    I: IntoIterator<Item = (MovementType, Quantity)>,
{
    movements
        .into_iter()
        .map(|(movement_type, quantity)| movement_type.signed(quantity))
        .sum()
}

/// Difference between a product's stored stock and its ledger balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drift {
    /// Value of the `current_stock` column.
    pub current_stock: i32,
    /// Signed sum of movements.
    pub ledger_balance: i64,
}

impl Drift {
    /// `current_stock - ledger_balance`.
    #[must_use]
    pub fn amount(&self) -> i64 {
        i64::from(self.current_stock) - self.ledger_balance
    }
}

/// Compare a stored stock level with its ledger balance.
///
/// Returns `None` when they agree.
#[must_use]
pub fn reconcile(current_stock: i32, ledger_balance: i64) -> Option<Drift> {
    (i64::from(current_stock) != ledger_balance).then_some(Drift {
        current_stock,
        ledger_balance,
    })
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn qty(n: i32) -> Quantity {
        Quantity::new(n).unwrap()
    }

    #[test]
    fn test_initial_stock_movement() {
        let draft = MovementDraft::initial_stock(150, CREATED_BY_SYSTEM).unwrap();
        assert_eq!(draft.movement_type, MovementType::In);
        assert_eq!(draft.quantity.get(), 150);
        assert_eq!(draft.reference.as_deref(), Some("Initial Stock"));
        assert_eq!(draft.notes.as_deref(), Some("Initial inventory setup"));
        assert_eq!(draft.created_by, "System");
    }

    #[test]
    fn test_initial_stock_skips_empty_products() {
        assert!(MovementDraft::initial_stock(0, CREATED_BY_ADMIN).is_none());
    }

    #[test]
    fn test_adjustment_up() {
        let draft = MovementDraft::adjustment(20, 35, CREATED_BY_ADMIN).unwrap();
        assert_eq!(draft.movement_type, MovementType::In);
        assert_eq!(draft.quantity.get(), 15);
        assert_eq!(draft.reference.as_deref(), Some("Stock Adjustment"));
        assert_eq!(draft.notes.as_deref(), Some("Stock adjusted from 20 to 35"));
    }

    #[test]
    fn test_adjustment_down() {
        let draft = MovementDraft::adjustment(35, 5, CREATED_BY_ADMIN).unwrap();
        assert_eq!(draft.movement_type, MovementType::Out);
        assert_eq!(draft.quantity.get(), 30);
        assert_eq!(draft.notes.as_deref(), Some("Stock adjusted from 35 to 5"));
    }

    #[test]
    fn test_adjustment_unchanged_writes_nothing() {
        assert!(MovementDraft::adjustment(12, 12, CREATED_BY_ADMIN).is_none());
    }

    #[test]
    fn test_adjustment_applied_reaches_new_level() {
        for (old, new) in [(0, 10), (10, 0), (7, 8), (8, 7)] {
            let draft = MovementDraft::adjustment(old, new, CREATED_BY_ADMIN).unwrap();
            let after = apply_movement(old, draft.movement_type, draft.quantity).unwrap();
            assert_eq!(after, new, "{old} -> {new}");
        }
    }

    #[test]
    fn test_manual_drops_blank_text() {
        let draft = MovementDraft::manual(
            MovementType::In,
            qty(4),
            Some("  "),
            Some(" INV-1009 delivery "),
            CREATED_BY_ADMIN,
        );
        assert_eq!(draft.reference, None);
        assert_eq!(draft.notes.as_deref(), Some("INV-1009 delivery"));
    }

    #[test]
    fn test_apply_in() {
        assert_eq!(apply_movement(10, MovementType::In, qty(5)).unwrap(), 15);
    }

    #[test]
    fn test_apply_out() {
        assert_eq!(apply_movement(10, MovementType::Out, qty(4)).unwrap(), 6);
        assert_eq!(apply_movement(10, MovementType::Out, qty(10)).unwrap(), 0);
    }

    #[test]
    fn test_apply_out_clamps_at_zero() {
        assert_eq!(apply_movement(3, MovementType::Out, qty(50)).unwrap(), 0);
        assert_eq!(apply_movement(0, MovementType::Out, qty(1)).unwrap(), 0);
    }

    #[test]
    fn test_apply_in_overflow() {
        assert_eq!(
            apply_movement(i32::MAX, MovementType::In, qty(1)),
            Err(ValidationError::StockOverflow)
        );
    }

    #[test]
    fn test_clamped_out_leaves_ledger_below_stock() {
        let movements = [(MovementType::In, qty(3)), (MovementType::Out, qty(5))];
        let balance = ledger_balance(movements);
        assert_eq!(balance, -2);

        let stock = apply_movement(3, MovementType::Out, qty(5)).unwrap();
        let drift = reconcile(stock, balance).unwrap();
        assert_eq!(drift.amount(), 2);
    }

    #[test]
    fn test_reconcile_agreement() {
        let movements = [
            (MovementType::In, qty(150)),
            (MovementType::Out, qty(20)),
            (MovementType::In, qty(5)),
        ];
        assert_eq!(reconcile(135, ledger_balance(movements)), None);
    }
}
