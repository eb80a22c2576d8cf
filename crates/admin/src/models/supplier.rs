//! Supplier records.
//!
//! Suppliers are a contact list only; nothing else references them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{ContactEmail, SupplierId, ValidationError};

use super::{bounded_text, optional_text, required_text};

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Raw supplier form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierForm {
    #[serde(default)]
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Validated supplier input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSupplier {
    pub name: String,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<ContactEmail>,
    pub address: Option<String>,
}

impl SupplierForm {
    /// Validate the submitted values.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] for a blank name, an over-long field or
    /// a malformed email.
    pub fn validate(&self) -> Result<NewSupplier, ValidationError> {
        let email = optional_text(self.email.as_deref())
            .map(|raw| ContactEmail::parse(&raw))
            .transpose()?;

        Ok(NewSupplier {
            name: required_text(&self.name, "name", 200)?,
            contact_person: bounded_text(self.contact_person.as_deref(), "contact_person", 100)?,
            phone: bounded_text(self.phone.as_deref(), "phone", 20)?,
            email,
            address: optional_text(self.address.as_deref()),
        })
    }
}
