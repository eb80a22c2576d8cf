//! Aggregates for the dashboard and reports pages.

use serde::Serialize;

use super::{MovementWithProduct, ProductWithCategory};

/// Number of recent movements shown on the dashboard.
pub const DASHBOARD_RECENT_MOVEMENTS: i64 = 10;

/// Trailing window for the reports movement list, in days.
pub const REPORT_WINDOW_DAYS: i64 = 30;

/// Cap on movements listed by the reports page.
pub const REPORT_MOVEMENT_LIMIT: i64 = 50;

/// Headline counts on the dashboard.
///
/// `low_stock_products` includes products with zero stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DashboardCounts {
    pub total_products: i64,
    pub low_stock_products: i64,
    pub out_of_stock_products: i64,
    pub total_categories: i64,
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardStats {
    pub counts: DashboardCounts,
    pub recent_movements: Vec<MovementWithProduct>,
    pub low_stock_items: Vec<ProductWithCategory>,
}

/// Stock-status buckets on the reports page.
///
/// The three counts partition all products; `low_stock` excludes zero stock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct StockStatusCounts {
    pub in_stock: i64,
    pub low_stock: i64,
    pub out_of_stock: i64,
}

impl StockStatusCounts {
    #[must_use]
    pub const fn total(&self) -> i64 {
        self.in_stock + self.low_stock + self.out_of_stock
    }
}

/// Products per category, zero-product categories included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct CategoryProductCount {
    pub name: String,
    pub product_count: i64,
}

/// Everything the reports page renders.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InventoryReport {
    pub stock_status: StockStatusCounts,
    pub categories: Vec<CategoryProductCount>,
    pub recent_movements: Vec<MovementWithProduct>,
}
