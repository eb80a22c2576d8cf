//! Positive movement quantities.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A strictly positive number of stock units moved in or out.
///
/// Movement records never carry zero or negative quantities; the direction is
/// expressed by [`MovementType`](crate::MovementType).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i32")]
pub struct Quantity(i32);

impl Quantity {
    /// Create a quantity, rejecting zero and negative values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NonPositiveQuantity`] if `value <= 0`.
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::NonPositiveQuantity(i64::from(value)));
        }
        Ok(Self(value))
    }

    /// Parse a quantity from raw form input.
    ///
    /// Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidQuantity`] for non-numeric input and
    /// [`ValidationError::NonPositiveQuantity`] for zero or negative numbers.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value: i64 = input
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidQuantity(input.to_owned()))?;
        Self::try_from(value)
    }

    /// Get the underlying unit count.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }

    /// Absolute difference between two stock levels, if non-zero.
    #[must_use]
    pub fn between(old: i32, new: i32) -> Option<Self> {
        let delta = i64::from(new) - i64::from(old);
        i32::try_from(delta.abs()).ok().and_then(|q| Self::new(q).ok())
    }
}

impl TryFrom<i64> for Quantity {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if value <= 0 {
            return Err(ValidationError::NonPositiveQuantity(value));
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| ValidationError::InvalidQuantity(value.to_string()))
    }
}

impl From<Quantity> for i32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_positive_whole_numbers() {
        assert_eq!(Quantity::parse("25").unwrap().get(), 25);
        assert_eq!(Quantity::parse("  7 ").unwrap().get(), 7);
    }

    #[test]
    fn test_parse_rejects_zero_and_negative() {
        assert_eq!(
            Quantity::parse("0"),
            Err(ValidationError::NonPositiveQuantity(0))
        );
        assert_eq!(
            Quantity::parse("-3"),
            Err(ValidationError::NonPositiveQuantity(-3))
        );
    }

    #[test]
    fn test_parse_rejects_non_numeric() {
        assert!(matches!(
            Quantity::parse("ten"),
            Err(ValidationError::InvalidQuantity(_))
        ));
        assert!(matches!(
            Quantity::parse("2.5"),
            Err(ValidationError::InvalidQuantity(_))
        ));
        assert!(matches!(
            Quantity::parse(""),
            Err(ValidationError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_parse_rejects_values_beyond_i32() {
        assert!(matches!(
            Quantity::parse("3000000000"),
            Err(ValidationError::InvalidQuantity(_))
        ));
    }

    #[test]
    fn test_between() {
        assert_eq!(Quantity::between(10, 25).unwrap().get(), 15);
        assert_eq!(Quantity::between(25, 10).unwrap().get(), 15);
        assert!(Quantity::between(10, 10).is_none());
    }

    #[test]
    fn test_deserialize_rejects_zero() {
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert_eq!(serde_json::from_str::<Quantity>("4").unwrap().get(), 4);
    }
}
