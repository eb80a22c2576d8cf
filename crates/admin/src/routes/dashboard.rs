//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use stockroom_core::MovementType;

use super::{fail_to, format_timestamp, products::ProductRowView};
use crate::{
    db::ReportRepository,
    filters,
    models::{DashboardCounts, Flash, MovementWithProduct},
    state::AppState,
};

/// Movement row shown on the dashboard and reports pages.
#[derive(Debug, Clone)]
pub struct MovementView {
    pub product_name: String,
    pub movement_type: String,
    pub is_in: bool,
    pub quantity: i32,
    pub reference: String,
    pub notes: String,
    pub created_by: String,
    pub created_at: String,
}

impl From<&MovementWithProduct> for MovementView {
    fn from(row: &MovementWithProduct) -> Self {
        let movement = &row.movement;
        Self {
            product_name: row.product_name.clone(),
            movement_type: movement.movement_type.to_string(),
            is_in: movement.movement_type == MovementType::In,
            quantity: movement.quantity,
            reference: movement.reference.clone().unwrap_or_default(),
            notes: movement.notes.clone().unwrap_or_default(),
            created_by: movement.created_by.clone().unwrap_or_default(),
            created_at: format_timestamp(movement.created_at),
        }
    }
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub stats: DashboardCounts,
    pub recent_movements: Vec<MovementView>,
    pub low_stock_items: Vec<ProductRowView>,
}

/// Dashboard page handler.
#[instrument(skip(state, session))]
pub async fn dashboard(State(state): State<AppState>, session: Session) -> Response {
    let stats = match ReportRepository::new(state.pool()).dashboard().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dashboard");
            return fail_to(&session, "Error loading dashboard", "/").await;
        }
    };

    DashboardTemplate {
        current_path: "/admin".to_string(),
        flashes: Flash::take_all(&session).await,
        stats: stats.counts,
        recent_movements: stats.recent_movements.iter().map(MovementView::from).collect(),
        low_stock_items: stats.low_stock_items.iter().map(ProductRowView::from).collect(),
    }
    .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use tower::ServiceExt;

    use stockroom_core::{ProductId, StockMovementId};

    use crate::models::StockMovement;
    use crate::routes::test_support;

    #[test]
    fn test_movement_view() {
        let row = MovementWithProduct {
            movement: StockMovement {
                id: StockMovementId::new(1),
                product_id: ProductId::new(3),
                movement_type: MovementType::Out,
                quantity: 12,
                reference: Some("Site 4".to_string()),
                notes: None,
                created_at: Utc::now(),
                created_by: Some("Admin".to_string()),
            },
            product_name: "Tile Adhesive".to_string(),
        };

        let view = MovementView::from(&row);
        assert_eq!(view.movement_type, "OUT");
        assert!(!view.is_in);
        assert_eq!(view.quantity, 12);
        assert_eq!(view.reference, "Site 4");
        assert_eq!(view.notes, "");
    }

    #[tokio::test]
    async fn test_dashboard_redirects_home_when_database_fails() {
        let response = test_support::app()
            .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");
    }
}
