//! Validation errors for user-supplied inventory data.

use thiserror::Error;

/// A value supplied by a form, CLI, or API caller was rejected.
///
/// Every variant carries enough context to be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was missing or blank.
    #[error("{field} is required")]
    MissingField {
        /// Form field name.
        field: &'static str,
    },

    /// A text field exceeded its column width.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Form field name.
        field: &'static str,
        /// Maximum length in characters.
        max: usize,
    },

    /// A quantity could not be parsed as a whole number.
    #[error("quantity must be a whole number, got {0:?}")]
    InvalidQuantity(String),

    /// A quantity was zero or negative.
    #[error("quantity must be greater than zero, got {0}")]
    NonPositiveQuantity(i64),

    /// A movement type other than `IN` or `OUT`.
    #[error("movement type must be IN or OUT, got {0:?}")]
    InvalidMovementType(String),

    /// A whole-number field could not be parsed.
    #[error("{field} must be a whole number, got {value:?}")]
    InvalidNumber {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },

    /// A whole-number field was below zero.
    #[error("{field} cannot be negative, got {value}")]
    Negative {
        /// Form field name.
        field: &'static str,
        /// Parsed value.
        value: i64,
    },

    /// A decimal field (price) could not be parsed or was negative.
    #[error("{field} must be a non-negative amount, got {value:?}")]
    InvalidAmount {
        /// Form field name.
        field: &'static str,
        /// Raw input.
        value: String,
    },

    /// A contact email did not look like an email address.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// Applying a movement would exceed the storable stock range.
    #[error("stock level would exceed {max}", max = i32::MAX)]
    StockOverflow,
}
