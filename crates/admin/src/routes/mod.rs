//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                               - Landing page
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (database)
//!
//! # Dashboard
//! GET  /admin                          - Stats, recent movements, low stock
//!
//! # Products
//! GET  /admin/products                 - Paginated listing (page, search, category)
//! GET  /admin/products/add             - Add form
//! POST /admin/products/add             - Create product (+ initial movement)
//! GET  /admin/products/{id}/edit       - Edit form
//! POST /admin/products/{id}/edit       - Update product (+ adjustment movement)
//! POST /admin/products/{id}/stock      - Explicit IN/OUT (JSON)
//!
//! # Categories
//! GET  /admin/categories               - Listing with product counts
//! POST /admin/categories/add           - Create category
//! POST /admin/categories/{id}/delete   - Delete empty category
//!
//! # Suppliers
//! GET  /admin/suppliers                - Listing
//! POST /admin/suppliers/add            - Create supplier
//!
//! # Reports
//! GET  /admin/reports                  - Stock status, category counts, movements
//! ```

pub mod categories;
pub mod dashboard;
pub mod home;
pub mod products;
pub mod reports;
pub mod suppliers;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tower_sessions::Session;

use stockroom_core::Price;

use crate::models::Flash;
use crate::state::AppState;

/// Build the application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .route("/admin", get(dashboard::dashboard))
        .route("/admin/products", get(products::index))
        .route("/admin/products/add", get(products::new_form).post(products::create))
        .route(
            "/admin/products/{id}/edit",
            get(products::edit_form).post(products::update),
        )
        .route("/admin/products/{id}/stock", post(products::update_stock))
        .route("/admin/categories", get(categories::index))
        .route("/admin/categories/add", post(categories::create))
        .route("/admin/categories/{id}/delete", post(categories::delete))
        .route("/admin/suppliers", get(suppliers::index))
        .route("/admin/suppliers/add", post(suppliers::create))
        .route("/admin/reports", get(reports::index))
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the database is not reachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Queue an error flash and redirect to a page that does not depend on the
/// failed operation.
pub(crate) async fn fail_to(session: &Session, message: &str, to: &str) -> Response {
    Flash::error(message).push(session).await;
    Redirect::to(to).into_response()
}

/// Format an optional price for display; absent prices render as "-".
pub(crate) fn format_price(amount: Option<Decimal>) -> String {
    amount.map_or_else(
        || "-".to_string(),
        |amount| format!("{}{:.2}", Price::SYMBOL, amount),
    )
}

/// Format a timestamp for tables.
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

/// Lenient page parameter: anything that is not a number means page 1.
pub(crate) fn parse_page(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|p| p.trim().parse().ok())
}
