//! Category domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CategoryId, ValidationError};

/// A product category (e.g. "Cement").
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Unique display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// When the category was created.
    pub created_at: DateTime<Utc>,
}

/// A category with the number of products assigned to it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CategoryWithCount {
    #[sqlx(flatten)]
    pub category: Category,
    pub product_count: i64,
}

/// Validated input for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Trimmed description, `None` when blank.
    pub description: Option<String>,
}

impl NewCategory {
    /// Maximum name length (`categories.name` column width).
    pub const MAX_NAME_LENGTH: usize = 100;

    /// Validate raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingField`] when the name is blank and
    /// [`ValidationError::TooLong`] when it does not fit the column.
    pub fn parse(name: &str, description: Option<&str>) -> Result<Self, ValidationError> {
        Ok(Self {
            name: super::required_text(name, "name", Self::MAX_NAME_LENGTH)?,
            description: super::optional_text(description),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims_name_and_description() {
        let category = NewCategory::parse("  Cement ", Some("  OPC and PPC  ")).unwrap();
        assert_eq!(category.name, "Cement");
        assert_eq!(category.description.as_deref(), Some("OPC and PPC"));
    }

    #[test]
    fn test_parse_blank_description_is_none() {
        let category = NewCategory::parse("Cement", Some("   ")).unwrap();
        assert_eq!(category.description, None);
    }

    #[test]
    fn test_parse_rejects_blank_name() {
        assert_eq!(
            NewCategory::parse("   ", None),
            Err(ValidationError::MissingField { field: "name" })
        );
    }

    #[test]
    fn test_parse_rejects_overlong_name() {
        let name = "x".repeat(101);
        assert_eq!(
            NewCategory::parse(&name, None),
            Err(ValidationError::TooLong {
                field: "name",
                max: 100
            })
        );
    }

    #[test]
    fn test_parse_keeps_case() {
        let category = NewCategory::parse("cement", None).unwrap();
        assert_eq!(category.name, "cement");
    }
}
