//! Product prices using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A cost or selling price in rupees.
///
/// Stored as `NUMERIC(12,2)`; never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Currency symbol used for display.
    pub const SYMBOL: &'static str = "₹";

    /// Wrap a decimal amount, rounded to two places.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAmount`] for negative amounts.
    pub fn new(amount: Decimal, field: &'static str) -> Result<Self, ValidationError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(ValidationError::InvalidAmount {
                field,
                value: amount.to_string(),
            });
        }
        Ok(Self(amount.round_dp(2)))
    }

    /// Parse an optional price from form input; blank input means "no price".
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidAmount`] if the input is not a
    /// non-negative decimal.
    pub fn parse_optional(input: &str, field: &'static str) -> Result<Option<Self>, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let amount = Decimal::from_str(trimmed).map_err(|_| ValidationError::InvalidAmount {
            field,
            value: input.to_owned(),
        })?;
        Self::new(amount, field).map(Some)
    }

    /// The decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:.2}", Self::SYMBOL, self.0)
    }
}
