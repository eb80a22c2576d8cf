//! Category route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use stockroom_core::CategoryId;

use super::{fail_to, format_timestamp};
use crate::{
    db::{CategoryRepository, RepositoryError},
    filters,
    models::{CategoryWithCount, Flash, NewCategory},
    state::AppState,
};

const CATEGORIES_PATH: &str = "/admin/categories";

/// Category row with its product count.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub product_count: i64,
    pub created_at: String,
}

impl From<&CategoryWithCount> for CategoryView {
    fn from(row: &CategoryWithCount) -> Self {
        Self {
            id: row.category.id.as_i32(),
            name: row.category.name.clone(),
            description: row.category.description.clone().unwrap_or_default(),
            product_count: row.product_count,
            created_at: format_timestamp(row.category.created_at),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/categories.html")]
pub struct CategoriesTemplate {
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub categories: Vec<CategoryView>,
}

/// Add category form.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    pub description: Option<String>,
}

/// Category listing handler.
#[instrument(skip(state, session))]
pub async fn index(State(state): State<AppState>, session: Session) -> Response {
    let categories = match CategoryRepository::new(state.pool()).list_with_counts().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load categories");
            return fail_to(&session, "Error loading categories", "/admin").await;
        }
    };

    CategoriesTemplate {
        current_path: CATEGORIES_PATH.to_string(),
        flashes: Flash::take_all(&session).await,
        categories: categories.iter().map(CategoryView::from).collect(),
    }
    .into_response()
}

/// Create a category. Duplicates are reported as a flash, not an error page.
#[instrument(skip(state, session, form), fields(name = %form.name))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CategoryForm>,
) -> Response {
    let flash = match NewCategory::parse(&form.name, form.description.as_deref()) {
        Err(e) => Flash::error(format!("Category {e}")),
        Ok(input) => match CategoryRepository::new(state.pool()).create(&input).await {
            Ok(category) => {
                tracing::info!(category_id = %category.id, "Category created");
                Flash::success(format!("Category \"{}\" added successfully!", category.name))
            }
            Err(RepositoryError::Conflict(message)) => Flash::error(message),
            Err(e) => {
                tracing::error!(error = %e, "Failed to create category");
                Flash::error("Error adding category. Please try again.")
            }
        },
    };

    flash.push(&session).await;
    Redirect::to(CATEGORIES_PATH).into_response()
}

/// Delete a category that has no products.
#[instrument(skip(state, session))]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Response {
    let flash = match CategoryRepository::new(state.pool())
        .delete(CategoryId::new(id))
        .await
    {
        Ok(name) => {
            tracing::info!(category_id = id, "Category deleted");
            Flash::success(format!("Category \"{name}\" deleted."))
        }
        Err(RepositoryError::NotFound) => Flash::error("Category not found"),
        Err(RepositoryError::Conflict(message)) => Flash::error(message),
        Err(e) => {
            tracing::error!(error = %e, "Failed to delete category");
            Flash::error("Error deleting category. Please try again.")
        }
    };

    flash.push(&session).await;
    Redirect::to(CATEGORIES_PATH).into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use crate::routes::test_support;

    #[tokio::test]
    async fn test_blank_name_redirects_back_without_touching_database() {
        let response = test_support::app()
            .oneshot(
                Request::post("/admin/categories/add")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("name=+++&description="))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/categories");
    }

    #[tokio::test]
    async fn test_listing_redirects_to_dashboard_when_database_fails() {
        let response = test_support::app()
            .oneshot(Request::get("/admin/categories").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin");
    }

    #[tokio::test]
    async fn test_delete_storage_failure_redirects_to_listing() {
        let response = test_support::app()
            .oneshot(
                Request::post("/admin/categories/4/delete")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin/categories");
    }
}
