//! Supplier database operations.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::{NewSupplier, Supplier};

/// Repository for supplier database operations.
pub struct SupplierRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SupplierRepository<'a> {
    /// Create a new supplier repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List suppliers by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Supplier>, RepositoryError> {
        let suppliers = sqlx::query_as::<_, Supplier>(
            r"
            SELECT id, name, contact_person, phone, email, address, is_active, created_at
            FROM suppliers
            ORDER BY name ASC, id ASC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(suppliers)
    }

    /// Create a supplier.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, input: &NewSupplier) -> Result<Supplier, RepositoryError> {
        let supplier = sqlx::query_as::<_, Supplier>(
            r"
            INSERT INTO suppliers (name, contact_person, phone, email, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, contact_person, phone, email, address, is_active, created_at
            ",
        )
        .bind(&input.name)
        .bind(&input.contact_person)
        .bind(&input.phone)
        .bind(input.email.as_ref().map(|e| e.as_str()))
        .bind(&input.address)
        .fetch_one(self.pool)
        .await?;

        Ok(supplier)
    }
}
