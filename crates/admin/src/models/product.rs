//! Product domain models and form validation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stockroom_core::{
    CategoryId, DEFAULT_MINIMUM_STOCK, Price, ProductId, StockStatus, ValidationError, is_low_stock,
};

use super::{bounded_text, non_negative, optional_text, required_text};

/// A stocked product.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Unique product ID.
    pub id: ProductId,
    /// Product name (e.g. "OPC 53 Grade Cement").
    pub name: String,
    /// Manufacturer brand.
    pub brand: Option<String>,
    /// Owning category.
    pub category_id: CategoryId,
    /// Unit label (e.g. "Bag", "Ton").
    pub unit: Option<String>,
    /// Pack-size label (e.g. "50KG").
    pub pack_size: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
    /// Units on hand. Only changed by the stock ledger.
    pub current_stock: i32,
    /// Reorder threshold.
    pub minimum_stock: i32,
    /// Purchase price.
    pub cost_price: Option<Decimal>,
    /// Sale price.
    pub selling_price: Option<Decimal>,
    /// Whether the product is listed.
    pub is_active: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Whether stock is at or below the reorder threshold (zero included).
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        is_low_stock(self.current_stock, self.minimum_stock)
    }

    /// Display status bucket.
    #[must_use]
    pub const fn stock_status(&self) -> StockStatus {
        StockStatus::classify(self.current_stock, self.minimum_stock)
    }
}

/// A product joined with its category name, for listings.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: String,
}

/// Validated product fields from the add/edit forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub brand: Option<String>,
    pub category_id: CategoryId,
    pub unit: Option<String>,
    pub pack_size: Option<String>,
    pub description: Option<String>,
    /// Stock level requested by the form. On create this is the opening
    /// stock; on edit the ledger turns the difference into a movement.
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub cost_price: Option<Price>,
    pub selling_price: Option<Price>,
}

/// Raw product form as submitted (`application/x-www-form-urlencoded`).
///
/// Every field is a string so that a bad number can be reported back on the
/// re-rendered form instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    pub brand: Option<String>,
    #[serde(default)]
    pub category_id: String,
    pub unit: Option<String>,
    pub pack_size: Option<String>,
    pub description: Option<String>,
    pub current_stock: Option<String>,
    pub minimum_stock: Option<String>,
    pub cost_price: Option<String>,
    pub selling_price: Option<String>,
}

impl ProductForm {
    const MAX_NAME: usize = 200;
    const MAX_BRAND: usize = 100;
    const MAX_LABEL: usize = 50;

    /// Validate the submitted values.
    ///
    /// Blank optional fields become `None`; a blank stock is 0 and a blank
    /// minimum is [`DEFAULT_MINIMUM_STOCK`].
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] encountered.
    pub fn validate(&self) -> Result<ProductInput, ValidationError> {
        let name = required_text(&self.name, "name", Self::MAX_NAME)?;
        let category_id = parse_category_id(&self.category_id)?;

        Ok(ProductInput {
            name,
            brand: bounded_text(self.brand.as_deref(), "brand", Self::MAX_BRAND)?,
            category_id,
            unit: bounded_text(self.unit.as_deref(), "unit", Self::MAX_LABEL)?,
            pack_size: bounded_text(self.pack_size.as_deref(), "pack_size", Self::MAX_LABEL)?,
            description: optional_text(self.description.as_deref()),
            current_stock: non_negative(self.current_stock.as_deref(), "current_stock", 0)?,
            minimum_stock: non_negative(
                self.minimum_stock.as_deref(),
                "minimum_stock",
                DEFAULT_MINIMUM_STOCK,
            )?,
            cost_price: Price::parse_optional(
                self.cost_price.as_deref().unwrap_or_default(),
                "cost_price",
            )?,
            selling_price: Price::parse_optional(
                self.selling_price.as_deref().unwrap_or_default(),
                "selling_price",
            )?,
        })
    }

    /// Pre-fill the edit form from a stored product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            brand: product.brand.clone(),
            category_id: product.category_id.to_string(),
            unit: product.unit.clone(),
            pack_size: product.pack_size.clone(),
            description: product.description.clone(),
            current_stock: Some(product.current_stock.to_string()),
            minimum_stock: Some(product.minimum_stock.to_string()),
            cost_price: product.cost_price.map(|p| p.round_dp(2).to_string()),
            selling_price: product.selling_price.map(|p| p.round_dp(2).to_string()),
        }
    }
}

fn parse_category_id(raw: &str) -> Result<CategoryId, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField {
            field: "category_id",
        });
    }
    trimmed
        .parse::<i32>()
        .map(CategoryId::new)
        .map_err(|_| ValidationError::InvalidNumber {
            field: "category_id",
            value: raw.to_string(),
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn cement_form() -> ProductForm {
        ProductForm {
            name: "OPC 53 Grade Cement".to_string(),
            brand: Some("UltraTech".to_string()),
            category_id: "1".to_string(),
            unit: Some("Bag".to_string()),
            pack_size: Some("50KG".to_string()),
            description: Some(String::new()),
            current_stock: Some("150".to_string()),
            minimum_stock: Some("50".to_string()),
            cost_price: Some("350".to_string()),
            selling_price: Some("380.50".to_string()),
        }
    }

    #[test]
    fn test_validate_full_form() {
        let input = cement_form().validate().unwrap();
        assert_eq!(input.name, "OPC 53 Grade Cement");
        assert_eq!(input.brand.as_deref(), Some("UltraTech"));
        assert_eq!(input.category_id, CategoryId::new(1));
        assert_eq!(input.description, None);
        assert_eq!(input.current_stock, 150);
        assert_eq!(input.minimum_stock, 50);
        assert_eq!(input.cost_price.unwrap().amount(), Decimal::new(350, 0));
        assert_eq!(input.selling_price.unwrap().amount(), Decimal::new(38050, 2));
    }

    #[test]
    fn test_validate_defaults_for_blank_numbers() {
        let form = ProductForm {
            current_stock: Some(String::new()),
            minimum_stock: None,
            cost_price: Some("  ".to_string()),
            selling_price: None,
            ..cement_form()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.current_stock, 0);
        assert_eq!(input.minimum_stock, DEFAULT_MINIMUM_STOCK);
        assert_eq!(input.cost_price, None);
        assert_eq!(input.selling_price, None);
    }

    #[test]
    fn test_validate_requires_name_and_category() {
        let form = ProductForm {
            name: "  ".to_string(),
            ..cement_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField { field: "name" })
        );

        let form = ProductForm {
            category_id: String::new(),
            ..cement_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::MissingField {
                field: "category_id"
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let form = ProductForm {
            current_stock: Some("lots".to_string()),
            ..cement_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidNumber {
                field: "current_stock",
                ..
            })
        ));

        let form = ProductForm {
            minimum_stock: Some("-5".to_string()),
            ..cement_form()
        };
        assert_eq!(
            form.validate(),
            Err(ValidationError::Negative {
                field: "minimum_stock",
                value: -5
            })
        );

        let form = ProductForm {
            category_id: "cement".to_string(),
            ..cement_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidNumber {
                field: "category_id",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let form = ProductForm {
            selling_price: Some("-1".to_string()),
            ..cement_form()
        };
        assert!(matches!(
            form.validate(),
            Err(ValidationError::InvalidAmount {
                field: "selling_price",
                ..
            })
        ));
    }

    #[test]
    fn test_from_product_round_trips_through_validate() {
        let now = Utc::now();
        let product = Product {
            id: ProductId::new(7),
            name: "TMT Bar 12mm".to_string(),
            brand: Some("TATA Tiscon".to_string()),
            category_id: CategoryId::new(2),
            unit: Some("Ton".to_string()),
            pack_size: Some("1 Ton".to_string()),
            description: None,
            current_stock: 25,
            minimum_stock: 5,
            cost_price: Some(Decimal::new(52000, 0)),
            selling_price: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let input = ProductForm::from_product(&product).validate().unwrap();
        assert_eq!(input.name, product.name);
        assert_eq!(input.category_id, product.category_id);
        assert_eq!(input.current_stock, 25);
        assert_eq!(input.minimum_stock, 5);
        assert_eq!(input.cost_price.unwrap().amount(), Decimal::new(52000, 0));
        assert_eq!(product.stock_status(), StockStatus::InStock);
        assert!(!product.is_low_stock());
    }
}
