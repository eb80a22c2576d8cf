//! Supplier contact email address.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A supplier's contact email.
///
/// Only structural checks are made: one `@` with something on each side,
/// and a length that fits the `suppliers.email` column.
///
/// ```
/// use stockroom_core::ContactEmail;
///
/// assert!(ContactEmail::parse("orders@ultratech.example").is_ok());
/// assert!(ContactEmail::parse("no-at-symbol").is_err());
/// assert!(ContactEmail::parse("@example.com").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ContactEmail(String);

impl ContactEmail {
    /// Width of the `suppliers.email` column.
    pub const MAX_LENGTH: usize = 100;

    /// Parse and trim an email address.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmail`] when the address is too long,
    /// has no `@`, more than one `@`, or an empty local part or domain.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let s = input.trim();
        let invalid = || ValidationError::InvalidEmail(input.to_owned());

        if s.is_empty() || s.len() > Self::MAX_LENGTH {
            return Err(invalid());
        }

        let (local, domain) = s.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }

        Ok(Self(s.to_owned()))
    }

    /// The address as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
