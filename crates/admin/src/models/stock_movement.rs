//! Stock movement records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{MovementType, ProductId, Quantity, StockMovementId, ValidationError};

/// An immutable entry in the stock ledger.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct StockMovement {
    pub id: StockMovementId,
    pub product_id: ProductId,
    pub movement_type: MovementType,
    /// Units requested. OUT movements keep the full requested quantity even
    /// when the stock was clamped at zero.
    pub quantity: i32,
    pub reference: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub created_by: Option<String>,
}

/// A movement joined with its product name, for dashboards and reports.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct MovementWithProduct {
    #[sqlx(flatten)]
    pub movement: StockMovement,
    pub product_name: String,
}

/// Raw stock update form posted to `/admin/products/{id}/stock`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StockUpdateForm {
    #[serde(default)]
    pub movement_type: String,
    #[serde(default)]
    pub quantity: String,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

/// A validated explicit stock update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockUpdate {
    pub movement_type: MovementType,
    pub quantity: Quantity,
    pub reference: Option<String>,
    pub notes: Option<String>,
}

impl StockUpdateForm {
    /// Validate movement type and quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMovementType`] unless the type is
    /// exactly `IN` or `OUT`, and a quantity error unless it is a positive
    /// whole number.
    pub fn validate(&self) -> Result<StockUpdate, ValidationError> {
        Ok(StockUpdate {
            movement_type: self.movement_type.parse()?,
            quantity: Quantity::parse(&self.quantity)?,
            reference: super::optional_text(self.reference.as_deref()),
            notes: super::optional_text(self.notes.as_deref()),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(movement_type: &str, quantity: &str) -> StockUpdateForm {
        StockUpdateForm {
            movement_type: movement_type.to_string(),
            quantity: quantity.to_string(),
            reference: Some("INV-2031".to_string()),
            notes: Some(String::new()),
        }
    }

    #[test]
    fn test_validate_in() {
        let update = form("IN", "25").validate().unwrap();
        assert_eq!(update.movement_type, MovementType::In);
        assert_eq!(update.quantity.get(), 25);
        assert_eq!(update.reference.as_deref(), Some("INV-2031"));
        assert_eq!(update.notes, None);
    }

    #[test]
    fn test_validate_rejects_unknown_type() {
        assert_eq!(
            form("in", "5").validate(),
            Err(ValidationError::InvalidMovementType("in".to_string()))
        );
        assert!(form("", "5").validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_quantity() {
        assert_eq!(
            form("OUT", "0").validate(),
            Err(ValidationError::NonPositiveQuantity(0))
        );
        assert!(matches!(
            form("OUT", "a dozen").validate(),
            Err(ValidationError::InvalidQuantity(_))
        ));
    }
}
