//! Core types for Stockroom.
//!
//! This module provides type-safe wrappers for the inventory domain.

pub mod email;
pub mod id;
pub mod movement;
pub mod price;
pub mod quantity;
pub mod status;

pub use email::ContactEmail;
pub use id::*;
pub use movement::MovementType;
pub use price::Price;
pub use quantity::Quantity;
pub use status::*;
