//! Category database operations.

use sqlx::{PgConnection, PgPool};

use stockroom_core::CategoryId;

use super::RepositoryError;
use crate::models::{Category, CategoryWithCount, NewCategory};

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Category>, RepositoryError> {
        let categories = sqlx::query_as::<_, Category>(
            r"
            SELECT id, name, description, created_at
            FROM categories
            ORDER BY name ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// List categories with their product counts, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_counts(&self) -> Result<Vec<CategoryWithCount>, RepositoryError> {
        let categories = sqlx::query_as::<_, CategoryWithCount>(
            r"
            SELECT c.id, c.name, c.description, c.created_at,
                   COUNT(p.id) AS product_count
            FROM categories c
            LEFT JOIN products p ON p.category_id = c.id
            GROUP BY c.id
            ORDER BY c.name ASC, c.id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(categories)
    }

    /// Get a category by exact name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Category>, RepositoryError> {
        let category = sqlx::query_as::<_, Category>(
            r"
            SELECT id, name, description, created_at
            FROM categories
            WHERE name = $1
            ",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(category)
    }

    /// Create a category.
    ///
    /// The name is matched case-sensitively; the UNIQUE constraint settles
    /// races between two concurrent creates.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name is taken.
    pub async fn create(&self, input: &NewCategory) -> Result<Category, RepositoryError> {
        if self.get_by_name(&input.name).await?.is_some() {
            return Err(duplicate(&input.name));
        }

        sqlx::query_as::<_, Category>(
            r"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at
            ",
        )
        .bind(&input.name)
        .bind(&input.description)
        .fetch_one(self.pool)
        .await
        .map_err(|e| RepositoryError::unique_or_database(e, || duplicate_message(&input.name)))
    }

    /// Delete a category that no product references, returning its name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist and
    /// `RepositoryError::Conflict` if products still belong to it.
    pub async fn delete(&self, id: CategoryId) -> Result<String, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let name: Option<String> =
            sqlx::query_scalar("SELECT name FROM categories WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        let name = name.ok_or(RepositoryError::NotFound)?;

        let products: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = $1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if products > 0 {
            return Err(RepositoryError::Conflict(format!(
                "Category \"{name}\" still has {products} product(s)"
            )));
        }

        sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                RepositoryError::foreign_key_or_database(e, || {
                    format!("Category \"{name}\" still has products")
                })
            })?;

        tx.commit().await?;
        Ok(name)
    }
}

/// Whether a category exists, checked inside a ledger transaction.
///
/// Takes a key-share lock so a concurrent delete waits for the transaction.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if the query fails.
pub async fn lock_exists(
    conn: &mut PgConnection,
    id: CategoryId,
) -> Result<bool, RepositoryError> {
    let found: Option<i32> =
        sqlx::query_scalar("SELECT id FROM categories WHERE id = $1 FOR KEY SHARE")
            .bind(id)
            .fetch_optional(conn)
            .await?;

    Ok(found.is_some())
}

fn duplicate_message(name: &str) -> String {
    format!("Category \"{name}\" already exists!")
}

fn duplicate(name: &str) -> RepositoryError {
    RepositoryError::Conflict(duplicate_message(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message() {
        assert_eq!(
            duplicate("Cement").to_string(),
            "constraint violation: Category \"Cement\" already exists!"
        );
    }
}
