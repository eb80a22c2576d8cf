//! Business logic services for admin.
//!
//! # Services
//!
//! - `ledger` - Product writes and the stock movements that record them

pub mod ledger;

pub use ledger::{LedgerError, LedgerOutcome, StockChange, StockLedger};
