//! Product management route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use stockroom_core::ledger::CREATED_BY_ADMIN;
use stockroom_core::{CategoryId, ProductId, StockStatus};

use super::{fail_to, format_price, parse_page};
use crate::{
    db::{CategoryRepository, ProductFilter, ProductRepository, RepositoryError},
    error::AppError,
    filters,
    models::{
        Category, Flash, PAGE_SIZE, Page, PageRequest, ProductForm, ProductWithCategory,
        StockUpdateForm,
    },
    services::ledger::{LedgerError, StockLedger},
    state::AppState,
};

/// Query parameters for the product listing.
///
/// Kept as strings so malformed values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct ProductsQuery {
    pub page: Option<String>,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ProductsQuery {
    fn filter(&self) -> ProductFilter {
        ProductFilter {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            category_id: self.category_id(),
        }
    }

    fn category_id(&self) -> Option<CategoryId> {
        self.category
            .as_deref()
            .and_then(|c| c.trim().parse::<i32>().ok())
            .map(CategoryId::new)
    }
}

/// Product row for listings.
#[derive(Debug, Clone)]
pub struct ProductRowView {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub category_name: String,
    pub unit: String,
    pub pack_size: String,
    pub current_stock: i32,
    pub minimum_stock: i32,
    pub status_label: String,
    pub status_class: String,
    pub cost_price: String,
    pub selling_price: String,
}

impl From<&ProductWithCategory> for ProductRowView {
    fn from(row: &ProductWithCategory) -> Self {
        let product = &row.product;
        let status = product.stock_status();
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            brand: product.brand.clone().unwrap_or_default(),
            category_name: row.category_name.clone(),
            unit: product.unit.clone().unwrap_or_default(),
            pack_size: product.pack_size.clone().unwrap_or_default(),
            current_stock: product.current_stock,
            minimum_stock: product.minimum_stock,
            status_label: status.label().to_string(),
            status_class: status_class(status).to_string(),
            cost_price: format_price(product.cost_price),
            selling_price: format_price(product.selling_price),
        }
    }
}

const fn status_class(status: StockStatus) -> &'static str {
    match status {
        StockStatus::OutOfStock => "badge-danger",
        StockStatus::LowStock => "badge-warning",
        StockStatus::InStock => "badge-success",
    }
}

/// Category choice in the filter and form drop-downs.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub id: i32,
    pub name: String,
    pub selected: bool,
}

impl CategoryOption {
    fn list(categories: &[Category], selected: Option<CategoryId>) -> Vec<Self> {
        categories
            .iter()
            .map(|c| Self {
                id: c.id.as_i32(),
                name: c.name.clone(),
                selected: Some(c.id) == selected,
            })
            .collect()
    }
}

/// Pagination link state.
#[derive(Debug, Clone)]
pub struct PaginationView {
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
    pub prev_url: Option<String>,
    pub next_url: Option<String>,
}

impl PaginationView {
    fn new<T>(page: &Page<T>, query: &ProductsQuery) -> Self {
        let link = |n: i64| page_url(n, query);
        Self {
            page: page.page,
            total_pages: page.total_pages(),
            total: page.total,
            prev_url: page.has_prev().then(|| link(page.page - 1)),
            next_url: page.has_next().then(|| link(page.page + 1)),
        }
    }
}

/// Listing URL for page `n`, keeping the current search and category.
fn page_url(n: i64, query: &ProductsQuery) -> String {
    let mut url = format!("/admin/products?page={n}");
    if let Some(search) = query.filter().search {
        url.push_str("&search=");
        url.push_str(&urlencoding::encode(&search));
    }
    if let Some(category_id) = query.category_id() {
        url.push_str(&format!("&category={category_id}"));
    }
    url
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/products.html")]
pub struct ProductsTemplate {
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub products: Vec<ProductRowView>,
    pub categories: Vec<CategoryOption>,
    pub search: String,
    pub pagination: PaginationView,
}

/// Add/edit product form template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/product_form.html")]
pub struct ProductFormTemplate {
    pub current_path: String,
    pub flashes: Vec<Flash>,
    pub title: String,
    pub action: String,
    pub submit_label: String,
    pub form: ProductForm,
    pub categories: Vec<CategoryOption>,
    pub error: Option<String>,
}

/// Product listing handler.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ProductsQuery>,
) -> Response {
    let request = PageRequest::new(parse_page(query.page.as_deref()), PAGE_SIZE);
    let filter = query.filter();

    let page = match ProductRepository::new(state.pool()).list(&filter, request).await {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load products");
            return fail_to(&session, "Error loading products", "/admin").await;
        }
    };
    let categories = match CategoryRepository::new(state.pool()).list().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load categories");
            return fail_to(&session, "Error loading products", "/admin").await;
        }
    };

    ProductsTemplate {
        current_path: "/admin/products".to_string(),
        flashes: Flash::take_all(&session).await,
        products: page.items.iter().map(ProductRowView::from).collect(),
        categories: CategoryOption::list(&categories, filter.category_id),
        search: filter.search.clone().unwrap_or_default(),
        pagination: PaginationView::new(&page, &query),
    }
    .into_response()
}

/// Render the product form with categories and an optional error.
async fn render_form(
    state: &AppState,
    session: &Session,
    product_id: Option<ProductId>,
    form: ProductForm,
    error: Option<(StatusCode, String)>,
) -> Response {
    let categories = match CategoryRepository::new(state.pool()).list().await {
        Ok(categories) => categories,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load categories for product form");
            return fail_to(session, "Error loading categories", "/admin").await;
        }
    };

    let selected = form.category_id.trim().parse::<i32>().ok().map(CategoryId::new);
    let (title, action, submit_label) = product_id.map_or_else(
        || {
            (
                "Add Product".to_string(),
                "/admin/products/add".to_string(),
                "Add Product".to_string(),
            )
        },
        |id| {
            (
                "Edit Product".to_string(),
                format!("/admin/products/{id}/edit"),
                "Save Changes".to_string(),
            )
        },
    );
    let (status, error) = match error {
        Some((status, message)) => (status, Some(message)),
        None => (StatusCode::OK, None),
    };

    let template = ProductFormTemplate {
        current_path: "/admin/products".to_string(),
        flashes: Flash::take_all(session).await,
        title,
        action,
        submit_label,
        form,
        categories: CategoryOption::list(&categories, selected),
        error,
    };

    (status, template).into_response()
}

/// Form failure: status plus the message shown above the form.
fn form_failure(e: &LedgerError, storage_message: &str) -> (StatusCode, String) {
    match e {
        LedgerError::Validation(v) => (StatusCode::BAD_REQUEST, capitalize(&v.to_string())),
        LedgerError::CategoryNotFound(_) => (
            StatusCode::BAD_REQUEST,
            "Selected category does not exist".to_string(),
        ),
        LedgerError::ProductNotFound(_) | LedgerError::Repository(RepositoryError::NotFound) => {
            (StatusCode::NOT_FOUND, "Product not found".to_string())
        }
        LedgerError::Repository(_) => {
            tracing::error!(error = %e, "Product form failed");
            (StatusCode::INTERNAL_SERVER_ERROR, storage_message.to_string())
        }
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Add product form.
#[instrument(skip(state, session))]
pub async fn new_form(State(state): State<AppState>, session: Session) -> Response {
    let form = ProductForm {
        current_stock: Some("0".to_string()),
        minimum_stock: Some(stockroom_core::DEFAULT_MINIMUM_STOCK.to_string()),
        ..ProductForm::default()
    };
    render_form(&state, &session, None, form, None).await
}

/// Create a product; opening stock becomes an IN movement.
#[instrument(skip(state, session, form), fields(name = %form.name))]
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Response {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let failure = form_failure(&LedgerError::Validation(e), "");
            return render_form(&state, &session, None, form, Some(failure)).await;
        }
    };

    match StockLedger::new(state.pool(), CREATED_BY_ADMIN)
        .create_product(&input)
        .await
    {
        Ok(outcome) => {
            Flash::success(format!(
                "Product \"{}\" added successfully!",
                outcome.product.name
            ))
            .push(&session)
            .await;
            Redirect::to("/admin/products").into_response()
        }
        Err(e) => {
            let failure = form_failure(&e, "Error adding product. Please try again.");
            render_form(&state, &session, None, form, Some(failure)).await
        }
    }
}

/// Edit product form.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist.
#[instrument(skip(state, session))]
pub async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<Response, AppError> {
    let id = ProductId::new(id);
    let product = ProductRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(render_form(&state, &session, Some(id), ProductForm::from_product(&product), None).await)
}

/// Update a product; a changed stock level becomes an adjustment movement.
#[instrument(skip(state, session, form), fields(name = %form.name))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Form(form): Form<ProductForm>,
) -> Response {
    let id = ProductId::new(id);
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => {
            let failure = form_failure(&LedgerError::Validation(e), "");
            return render_form(&state, &session, Some(id), form, Some(failure)).await;
        }
    };

    match StockLedger::new(state.pool(), CREATED_BY_ADMIN)
        .update_product(id, &input)
        .await
    {
        Ok(outcome) => {
            Flash::success(format!(
                "Product \"{}\" updated successfully!",
                outcome.product.name
            ))
            .push(&session)
            .await;
            Redirect::to("/admin/products").into_response()
        }
        Err(e) => {
            let failure = form_failure(&e, "Error updating product. Please try again.");
            render_form(&state, &session, Some(id), form, Some(failure)).await
        }
    }
}

/// JSON body returned by the stock update endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StockUpdateResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_stock: Option<i32>,
}

impl StockUpdateResponse {
    fn failure(status: StatusCode, message: impl Into<String>) -> Response {
        (
            status,
            Json(Self {
                success: false,
                message: message.into(),
                new_stock: None,
            }),
        )
            .into_response()
    }
}

/// Apply an explicit IN/OUT movement and report the new stock level.
#[instrument(skip(state, form), fields(movement_type = %form.movement_type, quantity = %form.quantity))]
pub async fn update_stock(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<StockUpdateForm>,
) -> Response {
    let id = ProductId::new(id);
    let update = match form.validate() {
        Ok(update) => update,
        Err(e) => return StockUpdateResponse::failure(StatusCode::BAD_REQUEST, capitalize(&e.to_string())),
    };

    match StockLedger::new(state.pool(), CREATED_BY_ADMIN)
        .record_movement(id, &update)
        .await
    {
        Ok(change) => Json(StockUpdateResponse {
            success: true,
            message: "Stock updated successfully".to_string(),
            new_stock: Some(change.new_stock),
        })
        .into_response(),
        Err(LedgerError::Validation(e)) => {
            StockUpdateResponse::failure(StatusCode::BAD_REQUEST, capitalize(&e.to_string()))
        }
        Err(LedgerError::ProductNotFound(_) | LedgerError::Repository(RepositoryError::NotFound)) => {
            StockUpdateResponse::failure(StatusCode::NOT_FOUND, "Product not found")
        }
        Err(e) => {
            AppError::from(e).report();
            StockUpdateResponse::failure(StatusCode::INTERNAL_SERVER_ERROR, "Error updating stock")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use crate::routes::test_support;

    fn query(page: &str, search: &str, category: &str) -> ProductsQuery {
        ProductsQuery {
            page: Some(page.to_string()),
            search: Some(search.to_string()),
            category: Some(category.to_string()),
        }
    }

    #[test]
    fn test_query_filter() {
        let filter = query("2", "  ultra ", "3").filter();
        assert_eq!(filter.search.as_deref(), Some("ultra"));
        assert_eq!(filter.category_id, Some(CategoryId::new(3)));

        let filter = query("", "", "").filter();
        assert_eq!(filter, ProductFilter::default());

        let filter = query("x", "", "cement").filter();
        assert_eq!(filter.category_id, None);
    }

    #[test]
    fn test_page_url_keeps_filters() {
        assert_eq!(
            page_url(2, &query("1", "tmt bar", "2")),
            "/admin/products?page=2&search=tmt%20bar&category=2"
        );
        assert_eq!(page_url(1, &ProductsQuery::default()), "/admin/products?page=1");
    }

    #[test]
    fn test_pagination_view() {
        let q = ProductsQuery::default();
        let page = Page::<()>::new(vec![], PageRequest::new(Some(2), PAGE_SIZE), 45);
        let view = PaginationView::new(&page, &q);
        assert_eq!(view.total_pages, 3);
        assert_eq!(view.prev_url.as_deref(), Some("/admin/products?page=1"));
        assert_eq!(view.next_url.as_deref(), Some("/admin/products?page=3"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("name is required"), "Name is required");
        assert_eq!(capitalize(""), "");
    }

    async fn post_stock(body: &str) -> (StatusCode, StockUpdateResponse) {
        let response = test_support::app()
            .oneshot(
                Request::post("/admin/products/1/stock")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_update_stock_rejects_zero_quantity() {
        let (status, body) = post_stock("movement_type=IN&quantity=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert_eq!(body.new_stock, None);
        assert!(body.message.contains("greater than zero"));
    }

    #[tokio::test]
    async fn test_update_stock_rejects_unknown_type() {
        let (status, body) = post_stock("movement_type=TRANSFER&quantity=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body.success);
        assert!(body.message.contains("IN or OUT"));
    }

    #[tokio::test]
    async fn test_update_stock_storage_failure_is_generic() {
        let (status, body) = post_stock("movement_type=OUT&quantity=3").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            StockUpdateResponse {
                success: false,
                message: "Error updating stock".to_string(),
                new_stock: None,
            }
        );
    }

    #[tokio::test]
    async fn test_products_list_redirects_to_dashboard_when_database_fails() {
        let response = test_support::app()
            .oneshot(
                Request::get("/admin/products?page=abc&search=x")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/admin");
    }
}
