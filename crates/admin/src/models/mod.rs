//! Domain models for the admin panel.
//!
//! Row types derive `sqlx::FromRow` and are read straight from the
//! repositories in [`crate::db`]. Form types hold raw strings and validate
//! into the input types consumed by the stock ledger.

pub mod category;
pub mod flash;
pub mod pagination;
pub mod product;
pub mod report;
pub mod stock_movement;
pub mod supplier;

pub use category::{Category, CategoryWithCount, NewCategory};
pub use flash::{Flash, FlashLevel};
pub use pagination::{PAGE_SIZE, Page, PageRequest};
pub use product::{Product, ProductForm, ProductInput, ProductWithCategory};
pub use report::{
    CategoryProductCount, DASHBOARD_RECENT_MOVEMENTS, DashboardCounts, DashboardStats,
    InventoryReport, REPORT_MOVEMENT_LIMIT, REPORT_WINDOW_DAYS, StockStatusCounts,
};
pub use stock_movement::{MovementWithProduct, StockMovement, StockUpdate, StockUpdateForm};
pub use supplier::{NewSupplier, Supplier, SupplierForm};

use stockroom_core::ValidationError;

/// Trimmed text, `None` when absent or blank.
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Trimmed, non-blank text of at most `max` characters.
pub(crate) fn required_text(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<String, ValidationError> {
    bounded_text(Some(value), field, max)?.ok_or(ValidationError::MissingField { field })
}

/// Optional trimmed text of at most `max` characters.
pub(crate) fn bounded_text(
    value: Option<&str>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match optional_text(value) {
        Some(text) if text.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        other => Ok(other),
    }
}

/// A non-negative whole number; blank input yields `default`.
pub(crate) fn non_negative(
    value: Option<&str>,
    field: &'static str,
    default: i32,
) -> Result<i32, ValidationError> {
    let Some(raw) = optional_text(value) else {
        return Ok(default);
    };
    let parsed: i64 = raw.parse().map_err(|_| ValidationError::InvalidNumber {
        field,
        value: raw.clone(),
    })?;
    if parsed < 0 {
        return Err(ValidationError::Negative {
            field,
            value: parsed,
        });
    }
    i32::try_from(parsed).map_err(|_| ValidationError::InvalidNumber { field, value: raw })
}
