//! Product database operations.
//!
//! Reads go through [`ProductRepository`]. Writes take a `&mut PgConnection`
//! so the stock ledger can run them inside its own transaction; nothing
//! outside [`crate::services::ledger`] changes `current_stock`.

use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use stockroom_core::{CategoryId, Price, ProductId};

use super::RepositoryError;
use crate::models::pagination::escape_like;
use crate::models::{Page, PageRequest, Product, ProductInput, ProductWithCategory};

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.brand, p.category_id, p.unit, p.pack_size, \
    p.description, p.current_stock, p.minimum_stock, p.cost_price, p.selling_price, \
    p.is_active, p.created_at, p.updated_at";

/// Filters for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive substring of name or brand.
    pub search: Option<String>,
    /// Exact category.
    pub category_id: Option<CategoryId>,
}

/// Repository for product reads.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a product by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// List one page of products sorted by name.
    ///
    /// Pages past the end come back with no items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        request: PageRequest,
    ) -> Result<Page<ProductWithCategory>, RepositoryError> {
        let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM products p");
        push_filter(&mut count, filter);
        let total: i64 = count.build_query_scalar().fetch_one(self.pool).await?;

        let mut select = QueryBuilder::<Postgres>::new("SELECT ");
        select.push(PRODUCT_COLUMNS);
        select.push(", c.name AS category_name FROM products p JOIN categories c ON c.id = p.category_id");
        push_filter(&mut select, filter);
        select.push(" ORDER BY p.name ASC, p.id ASC LIMIT ");
        select.push_bind(request.limit());
        select.push(" OFFSET ");
        select.push_bind(request.offset());

        let items = select
            .build_query_as::<ProductWithCategory>()
            .fetch_all(self.pool)
            .await?;

        Ok(Page::new(items, request, total))
    }

    /// Find a product by its (name, brand, pack size) identity.
    ///
    /// `NULL` brand or pack size match an absent value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn find_by_identity(
        &self,
        name: &str,
        brand: Option<&str>,
        pack_size: Option<&str>,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p \
             WHERE p.name = $1 \
               AND p.brand IS NOT DISTINCT FROM $2 \
               AND p.pack_size IS NOT DISTINCT FROM $3 \
             ORDER BY p.id ASC LIMIT 1"
        ))
        .bind(name)
        .bind(brand)
        .bind(pack_size)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Count all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    let mut keyword = " WHERE ";
    if let Some(search) = filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = format!("%{}%", escape_like(search));
        builder.push(keyword);
        builder.push("(p.name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR p.brand ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
        keyword = " AND ";
    }
    if let Some(category_id) = filter.category_id {
        builder.push(keyword);
        builder.push("p.category_id = ");
        builder.push_bind(category_id);
    }
}

fn price_amount(price: Option<Price>) -> Option<Decimal> {
    price.map(Price::amount)
}

/// Insert a product with its opening stock.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the insert fails.
pub async fn insert(
    conn: &mut PgConnection,
    input: &ProductInput,
) -> Result<Product, RepositoryError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "INSERT INTO products AS p ( \
             name, brand, category_id, unit, pack_size, description, \
             current_stock, minimum_stock, cost_price, selling_price \
         ) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(&input.name)
    .bind(&input.brand)
    .bind(input.category_id)
    .bind(&input.unit)
    .bind(&input.pack_size)
    .bind(&input.description)
    .bind(input.current_stock)
    .bind(input.minimum_stock)
    .bind(price_amount(input.cost_price))
    .bind(price_amount(input.selling_price))
    .fetch_one(conn)
    .await?;

    Ok(product)
}

/// Read a product and lock its row until the transaction ends.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lock(
    conn: &mut PgConnection,
    id: ProductId,
) -> Result<Option<Product>, RepositoryError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products p WHERE p.id = $1 FOR UPDATE"
    ))
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(product)
}

/// Overwrite every editable field, including `current_stock`.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the product does not exist.
pub async fn update(
    conn: &mut PgConnection,
    id: ProductId,
    input: &ProductInput,
) -> Result<Product, RepositoryError> {
    let product = sqlx::query_as::<_, Product>(&format!(
        "UPDATE products AS p SET \
             name = $2, brand = $3, category_id = $4, unit = $5, pack_size = $6, \
             description = $7, current_stock = $8, minimum_stock = $9, \
             cost_price = $10, selling_price = $11, updated_at = NOW() \
         WHERE p.id = $1 \
         RETURNING {PRODUCT_COLUMNS}"
    ))
    .bind(id)
    .bind(&input.name)
    .bind(&input.brand)
    .bind(input.category_id)
    .bind(&input.unit)
    .bind(&input.pack_size)
    .bind(&input.description)
    .bind(input.current_stock)
    .bind(input.minimum_stock)
    .bind(price_amount(input.cost_price))
    .bind(price_amount(input.selling_price))
    .fetch_optional(conn)
    .await?;

    product.ok_or(RepositoryError::NotFound)
}

/// Set `current_stock` and refresh `updated_at`.
///
/// # Errors
///
/// Returns `RepositoryError::NotFound` if the product does not exist.
pub async fn set_stock(
    conn: &mut PgConnection,
    id: ProductId,
    current_stock: i32,
) -> Result<(), RepositoryError> {
    let result = sqlx::query(
        "UPDATE products SET current_stock = $2, updated_at = NOW() WHERE id = $1",
    )
    .bind(id)
    .bind(current_stock)
    .execute(conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}
