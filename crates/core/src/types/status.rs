//! Stock status classification.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Default low-stock threshold for new products.
pub const DEFAULT_MINIMUM_STOCK: i32 = 10;

/// Whether a product is at or below its reorder threshold.
///
/// Zero stock counts as low stock here; the dashboard counts it that way.
#[must_use]
pub const fn is_low_stock(current_stock: i32, minimum_stock: i32) -> bool {
    current_stock <= minimum_stock
}

/// Stock status shown next to each product.
///
/// The three states partition every product:
/// - `OutOfStock`: `current_stock == 0`
/// - `LowStock`: `0 < current_stock <= minimum_stock`
/// - `InStock`: `current_stock > minimum_stock`
///
/// The reports page counts exactly these buckets, which is why its low-stock
/// figure excludes out-of-stock products while [`is_low_stock`] includes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    /// No units on hand.
    OutOfStock,
    /// Positive stock at or below the minimum.
    LowStock,
    /// Stock above the minimum.
    InStock,
}

impl StockStatus {
    /// Classify a stock level against its minimum.
    #[must_use]
    pub const fn classify(current_stock: i32, minimum_stock: i32) -> Self {
        if current_stock <= 0 {
            Self::OutOfStock
        } else if is_low_stock(current_stock, minimum_stock) {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OutOfStock => "Out of Stock",
            Self::LowStock => "Low Stock",
            Self::InStock => "In Stock",
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(StockStatus::classify(150, 50), StockStatus::InStock);
        assert_eq!(StockStatus::classify(0, 50), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(50, 50), StockStatus::LowStock);
        assert_eq!(StockStatus::classify(51, 50), StockStatus::InStock);
        assert_eq!(StockStatus::classify(1, 50), StockStatus::LowStock);
    }

    #[test]
    fn test_zero_minimum() {
        assert_eq!(StockStatus::classify(0, 0), StockStatus::OutOfStock);
        assert_eq!(StockStatus::classify(1, 0), StockStatus::InStock);
    }

    #[test]
    fn test_is_low_stock_includes_zero() {
        assert!(is_low_stock(0, 10));
        assert!(is_low_stock(10, 10));
        assert!(!is_low_stock(11, 10));
    }

    #[test]
    fn test_dashboard_and_report_low_stock_differ_on_empty_products() {
        let products = [(0, 10), (5, 10), (20, 10)];

        let dashboard_low = products
            .iter()
            .filter(|(current, minimum)| is_low_stock(*current, *minimum))
            .count();
        let report_low = products
            .iter()
            .filter(|(current, minimum)| {
                StockStatus::classify(*current, *minimum) == StockStatus::LowStock
            })
            .count();

        assert_eq!(dashboard_low, 2);
        assert_eq!(report_low, 1);
    }

    #[test]
    fn test_labels() {
        assert_eq!(StockStatus::OutOfStock.to_string(), "Out of Stock");
        assert_eq!(StockStatus::LowStock.to_string(), "Low Stock");
        assert_eq!(StockStatus::InStock.to_string(), "In Stock");
    }
}
