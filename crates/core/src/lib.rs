//! Stockroom Core - Shared domain types.
//!
//! This crate provides the types used across all Stockroom components:
//! - `admin` - Administration panel and HTTP surface
//! - `cli` - Command-line tools for migrations, seeding and reconciliation
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no
//! database access, no HTTP. Database encoding is available behind the
//! `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, movement types, stock status, quantities, prices
//! - [`ledger`] - Stock movement drafts and the rules that apply them
//! - [`error`] - Validation errors shared by forms and the ledger

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod ledger;
pub mod types;

pub use error::ValidationError;
pub use types::*;
