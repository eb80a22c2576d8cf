//! Supplier route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use tracing::instrument;

use super::fail_to;
use crate::{
    db::SupplierRepository,
    filters,
    models::{Flash, Supplier, SupplierForm},
    state::AppState,
};

const SUPPLIERS_PATH: &str = "/admin/suppliers";

#[derive(Debug, Clone)]
pub struct SupplierView {
    pub name: String,
    pub contact_person: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub is_active: bool,
}

impl From<&Supplier> for SupplierView {
    fn from(supplier: &Supplier) -> Self {
        Self {
            name: supplier.name.clone(),
            contact_person: supplier.contact_person.clone().unwrap_or_default(),
            phone: supplier.phone.clone().unwrap_or_default(),
            email: supplier.email.clone().unwrap_or_default(),
            address: supplier.address.clone().unwrap_or_default(),
            is_active: supplier.is_active,
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/suppliers.html")]
pub struct SuppliersTemplate {
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub suppliers: Vec<SupplierView>,
}

/// Supplier listing handler.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Response {
    let suppliers = match SupplierRepository::new(state.pool()).list().await {
        Ok(suppliers) => suppliers,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load suppliers");
            return fail_to(&session, "Error loading suppliers", "/admin").await;
        }
    };

    SuppliersTemplate {
        current_path: SUPPLIERS_PATH.to_string(),
        flashes: Flash::take_all(&session).await,
        suppliers: suppliers.iter().map(SupplierView::from).collect(),
    }
    .into_response()
}

/// Create a supplier.
#[instrument(skip(state, session, form), fields(name = %form.name))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SupplierForm>,
) -> Response {
    let flash = match form.validate() {
        Err(e) => Flash::error(format!("Supplier {e}")),
        Ok(input) => match SupplierRepository::new(state.pool()).create(&input).await {
            Ok(supplier) => {
                tracing::info!(supplier_id = %supplier.id, "Supplier created");
                Flash::success(format!("Supplier \"{}\" added successfully!", supplier.name))
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to create supplier");
                Flash::error("Error adding supplier. Please try again.")
            }
        },
    };

    flash.push(&session).await;
    Redirect::to(SUPPLIERS_PATH).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use tower::ServiceExt;

    use stockroom_core::SupplierId;

    use crate::routes::test_support;

    #[test]
    fn test_supplier_view_blanks_missing_fields() {
        let supplier = Supplier {
            id: SupplierId::new(1),
            name: "Shree Traders".to_string(),
            contact_person: None,
            phone: Some("9820000000".to_string()),
            email: None,
            address: None,
            is_active: true,
            created_at: Utc::now(),
        };

        let view = SupplierView::from(&supplier);
        assert_eq!(view.name, "Shree Traders");
        assert_eq!(view.contact_person, "");
        assert_eq!(view.phone, "9820000000");
    }

    #[tokio::test]
    async fn test_invalid_email_redirects_back() {
        let response = test_support::app()
            .oneshot(
                Request::post("/admin/suppliers/add")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("name=Shree+Traders&email=nope"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/suppliers");
    }
}
