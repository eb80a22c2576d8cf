//! Inventory reports.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use super::{dashboard::MovementView, fail_to};
use crate::{
    db::ReportRepository,
    filters,
    models::{CategoryProductCount, Flash, REPORT_MOVEMENT_LIMIT, REPORT_WINDOW_DAYS, StockStatusCounts},
    state::AppState,
};

/// Share of `part` in `total` as a whole percentage, for the status bars.
fn percent(part: i64, total: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        part.saturating_mul(100) / total
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/reports.html")]
pub struct ReportsTemplate {
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub stock_status: StockStatusCounts,
    pub in_stock_percent: i64,
    pub low_stock_percent: i64,
    pub out_of_stock_percent: i64,
    pub categories: Vec<CategoryProductCount>,
    pub recent_movements: Vec<MovementView>,
    pub window_days: i64,
    pub movement_limit: i64,
}

/// Reports page handler.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Response {
    let report = match ReportRepository::new(state.pool()).inventory_report().await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load reports");
            return fail_to(&session, "Error loading reports", "/admin").await;
        }
    };

    let status = report.stock_status;
    let total = status.total();

    ReportsTemplate {
        current_path: "/admin/reports".to_string(),
        flashes: Flash::take_all(&session).await,
        in_stock_percent: percent(status.in_stock, total),
        low_stock_percent: percent(status.low_stock, total),
        out_of_stock_percent: percent(status.out_of_stock, total),
        stock_status: status,
        categories: report.categories,
        recent_movements: report.recent_movements.iter().map(MovementView::from).collect(),
        window_days: REPORT_WINDOW_DAYS,
        movement_limit: REPORT_MOVEMENT_LIMIT,
    }
    .into_response()
}
