//! Ledger reconciliation.
//!
//! Read-only: compares each product's `current_stock` with the signed sum
//! of its movements and fails when any differ. OUT movements that were
//! clamped at zero show up here as drift.

use tracing::{info, warn};

use stockroom_admin::db::MovementRepository;
use stockroom_admin::db::movements::LedgerBalanceRow;
use stockroom_core::ledger::{Drift, reconcile};

use super::{CliError, connect};

/// Products whose stock disagrees with their ledger.
fn drifted(rows: &[LedgerBalanceRow]) -> Vec<(&LedgerBalanceRow, Drift)> {
    rows.iter()
        .filter_map(|row| reconcile(row.current_stock, row.ledger_balance).map(|d| (row, d)))
        .collect()
}

/// Check every product against its movement history.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;
    let rows = MovementRepository::new(&pool).ledger_balances().await?;

    let drift = drifted(&rows);
    for (row, d) in &drift {
        warn!(
            product_id = %row.product_id,
            current_stock = d.current_stock,
            ledger_balance = d.ledger_balance,
            difference = d.amount(),
            "{} is out of step with its ledger",
            row.name
        );
    }

    info!(products = rows.len(), drifted = drift.len(), "Reconciliation finished");

    if drift.is_empty() {
        Ok(())
    } else {
        Err(CliError::Drift(drift.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use stockroom_core::ProductId;

    fn row(id: i32, current_stock: i32, ledger_balance: i64) -> LedgerBalanceRow {
        LedgerBalanceRow {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            current_stock,
            ledger_balance,
        }
    }

    #[test]
    fn test_drifted_only_lists_mismatches() {
        let rows = vec![row(1, 150, 150), row(2, 0, -5), row(3, 0, 0), row(4, 12, 10)];

        let drift = drifted(&rows);
        assert_eq!(drift.len(), 2);
        assert_eq!(drift[0].0.product_id, ProductId::new(2));
        assert_eq!(drift[0].1.amount(), 5);
        assert_eq!(drift[1].0.product_id, ProductId::new(4));
        assert_eq!(drift[1].1.amount(), 2);
    }
}
