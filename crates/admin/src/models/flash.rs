//! One-shot flash messages stored in the session.
//!
//! A handler queues a message before redirecting; the next rendered page
//! takes (and thereby clears) every queued message.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

/// Session keys used by the admin panel.
pub mod keys {
    /// Key for queued flash messages.
    pub const FLASH: &str = "flash";
}

/// Visual category of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

impl FlashLevel {
    /// CSS class suffix used by the templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A single flash message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    /// Queue this message for the next rendered page.
    ///
    /// Session store failures are logged and otherwise ignored; losing a
    /// notice must not fail the request that produced it.
    pub async fn push(self, session: &Session) {
        let mut queued = match session.get::<Vec<Self>>(keys::FLASH).await {
            Ok(queued) => queued.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read flash messages");
                Vec::new()
            }
        };
        queued.push(self);
        if let Err(e) = session.insert(keys::FLASH, queued).await {
            tracing::warn!(error = %e, "Failed to store flash message");
        }
    }

    /// Remove and return every queued message.
    pub async fn take_all(session: &Session) -> Vec<Self> {
        match session.remove::<Vec<Self>>(keys::FLASH).await {
            Ok(queued) => queued.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to take flash messages");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let ok = Flash::success("Category \"Cement\" added successfully!");
        assert_eq!(ok.level, FlashLevel::Success);
        assert_eq!(ok.level.as_str(), "success");

        let err = Flash::error("Error loading reports");
        assert_eq!(err.level.as_str(), "error");
        assert_eq!(err.message, "Error loading reports");
    }

    #[test]
    fn test_serialized_level_is_lowercase() {
        let json = serde_json::to_string(&Flash::error("x")).unwrap_or_default();
        assert_eq!(json, r#"{"level":"error","message":"x"}"#);
    }
}
