//! Read-only aggregates for the dashboard and reports pages.
//!
//! These are plain reads outside any write transaction. The dashboard and
//! reports disagree on "low stock" for empty products:
//!
//! | Page | Low stock |
//! |---|---|
//! | Dashboard | `current_stock <= minimum_stock` |
//! | Reports | `current_stock <= minimum_stock AND current_stock > 0` |

use chrono::{Duration, Utc};
use sqlx::PgPool;

use super::{MovementRepository, RepositoryError};
use crate::models::report::{
    DASHBOARD_RECENT_MOVEMENTS, REPORT_MOVEMENT_LIMIT, REPORT_WINDOW_DAYS,
};
use crate::models::{
    CategoryProductCount, DashboardCounts, DashboardStats, InventoryReport, ProductWithCategory,
    StockStatusCounts,
};

/// Repository for report queries.
pub struct ReportRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ReportRepository<'a> {
    /// Create a new report repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Gather everything the dashboard shows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn dashboard(&self) -> Result<DashboardStats, RepositoryError> {
        let counts = self.dashboard_counts().await?;
        let recent_movements = MovementRepository::new(self.pool)
            .recent(DASHBOARD_RECENT_MOVEMENTS)
            .await?;
        let low_stock_items = self.low_stock_products().await?;

        Ok(DashboardStats {
            counts,
            recent_movements,
            low_stock_items,
        })
    }

    /// Headline counts; low stock includes empty products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn dashboard_counts(&self) -> Result<DashboardCounts, RepositoryError> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            r"
            SELECT
                (SELECT COUNT(*) FROM products) AS total_products,
                (SELECT COUNT(*) FROM products WHERE current_stock <= minimum_stock)
                    AS low_stock_products,
                (SELECT COUNT(*) FROM products WHERE current_stock = 0)
                    AS out_of_stock_products,
                (SELECT COUNT(*) FROM categories) AS total_categories
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }

    /// Every product at or below its minimum, emptiest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn low_stock_products(&self) -> Result<Vec<ProductWithCategory>, RepositoryError> {
        let products = sqlx::query_as::<_, ProductWithCategory>(
            r"
            SELECT p.id, p.name, p.brand, p.category_id, p.unit, p.pack_size,
                   p.description, p.current_stock, p.minimum_stock, p.cost_price,
                   p.selling_price, p.is_active, p.created_at, p.updated_at,
                   c.name AS category_name
            FROM products p
            JOIN categories c ON c.id = p.category_id
            WHERE p.current_stock <= p.minimum_stock
            ORDER BY p.current_stock ASC, p.name ASC, p.id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Gather everything the reports page shows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any query fails.
    pub async fn inventory_report(&self) -> Result<InventoryReport, RepositoryError> {
        let stock_status = self.stock_status_counts().await?;
        let categories = self.category_product_counts().await?;
        let since = Utc::now() - Duration::days(REPORT_WINDOW_DAYS);
        let recent_movements = MovementRepository::new(self.pool)
            .since(since, REPORT_MOVEMENT_LIMIT)
            .await?;

        Ok(InventoryReport {
            stock_status,
            categories,
            recent_movements,
        })
    }

    /// In/low/out buckets; low stock excludes empty products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn stock_status_counts(&self) -> Result<StockStatusCounts, RepositoryError> {
        let counts = sqlx::query_as::<_, StockStatusCounts>(
            r"
            SELECT
                COUNT(*) FILTER (WHERE current_stock > minimum_stock) AS in_stock,
                COUNT(*) FILTER (WHERE current_stock <= minimum_stock AND current_stock > 0)
                    AS low_stock,
                COUNT(*) FILTER (WHERE current_stock = 0) AS out_of_stock
            FROM products
            ",
        )
        .fetch_one(self.pool)
        .await?;

        Ok(counts)
    }

    /// Product count per category, empty categories included, by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn category_product_counts(
        &self,
    ) -> Result<Vec<CategoryProductCount>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryProductCount>(
            r"
            SELECT c.name, COUNT(p.id) AS product_count
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id
            GROUP BY c.id, c.name
            ORDER BY c.name ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}
