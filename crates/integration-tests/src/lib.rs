//! Integration tests for Stockroom.
//!
//! # Running Tests
//!
//! ```bash
//! # Point sqlx at a PostgreSQL server it may create scratch databases on
//! export DATABASE_URL=postgres://postgres@localhost/postgres
//!
//! cargo test -p stockroom-integration-tests -- --ignored
//! ```
//!
//! Each test gets a fresh database with `crates/admin/migrations/` applied.
//! This library holds the fixtures the test files share.

use sqlx::PgPool;

use stockroom_admin::db::CategoryRepository;
use stockroom_admin::models::{Category, NewCategory, ProductInput, StockUpdate};
use stockroom_core::{CategoryId, MovementType, Quantity};

/// Insert a category by name.
///
/// # Panics
///
/// Panics if the insert fails.
pub async fn category(pool: &PgPool, name: &str) -> Category {
    let input = NewCategory::parse(name, None).expect("valid category name");
    CategoryRepository::new(pool)
        .create(&input)
        .await
        .expect("category insert")
}

/// Product form values with no prices or labels.
#[must_use]
pub fn product(
    category_id: CategoryId,
    name: &str,
    current_stock: i32,
    minimum_stock: i32,
) -> ProductInput {
    ProductInput {
        name: name.to_string(),
        brand: None,
        category_id,
        unit: Some("Bag".to_string()),
        pack_size: None,
        description: None,
        current_stock,
        minimum_stock,
        cost_price: None,
        selling_price: None,
    }
}

/// An explicit stock update without reference or notes.
///
/// # Panics
///
/// Panics if `quantity` is not positive.
#[must_use]
pub fn stock_update(movement_type: MovementType, quantity: i32) -> StockUpdate {
    StockUpdate {
        movement_type,
        quantity: Quantity::new(quantity).expect("positive quantity"),
        reference: None,
        notes: None,
    }
}
