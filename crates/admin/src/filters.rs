//! Askama filters shared by the admin templates.

use std::fmt::Display;

use chrono::Datelike;

/// Current calendar year (UTC), for the page footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    Ok(chrono::Utc::now().year())
}
