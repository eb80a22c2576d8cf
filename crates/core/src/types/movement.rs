//! Stock movement direction.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Quantity, ValidationError};

/// Direction of a stock movement.
///
/// Stored as the text values `IN` and `OUT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MovementType {
    /// Goods received; increases stock.
    In,
    /// Goods issued; decreases stock (never below zero).
    Out,
}

impl MovementType {
    /// Database and form representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::Out => "OUT",
        }
    }

    /// Direction for a stock change from `old` to `new`, if any.
    #[must_use]
    pub const fn for_change(old: i32, new: i32) -> Option<Self> {
        if new > old {
            Some(Self::In)
        } else if new < old {
            Some(Self::Out)
        } else {
            None
        }
    }

    /// Quantity with sign applied: positive for IN, negative for OUT.
    #[must_use]
    pub fn signed(self, quantity: Quantity) -> i64 {
        let quantity = i64::from(quantity.get());
        match self {
            Self::In => quantity,
            Self::Out => -quantity,
        }
    }
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MovementType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "IN" => Ok(Self::In),
            "OUT" => Ok(Self::Out),
            _ => Err(ValidationError::InvalidMovementType(s.to_owned())),
        }
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for MovementType {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for MovementType {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <&str as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        Ok(s.parse()?)
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for MovementType {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <&str as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.as_str(), buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("IN".parse::<MovementType>().unwrap(), MovementType::In);
        assert_eq!("OUT".parse::<MovementType>().unwrap(), MovementType::Out);
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        for raw in ["", "in", "Out", "TRANSFER"] {
            assert_eq!(
                raw.parse::<MovementType>(),
                Err(ValidationError::InvalidMovementType(raw.to_owned())),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_for_change() {
        assert_eq!(MovementType::for_change(5, 9), Some(MovementType::In));
        assert_eq!(MovementType::for_change(9, 5), Some(MovementType::Out));
        assert_eq!(MovementType::for_change(5, 5), None);
    }

    #[test]
    fn test_signed() {
        let q = Quantity::new(12).unwrap();
        assert_eq!(MovementType::In.signed(q), 12);
        assert_eq!(MovementType::Out.signed(q), -12);
    }

    #[test]
    fn test_serde_uses_uppercase() {
        assert_eq!(serde_json::to_string(&MovementType::Out).unwrap(), "\"OUT\"");
    }
}
