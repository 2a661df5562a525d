//! Product HTTP Routes
//!
//! CRUD, filtered listing and statistics over the product store. Every
//! route here sits behind the API key gate; create and update also sit
//! behind the structural validator.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    handler::Handler,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use serde_json::Number;

use crate::catalog::{canonical_price, Product, ProductDraft};

use super::errors::{ApiError, ApiResult};
use super::middleware::auth::require_api_key;
use super::middleware::validator::{validate_product, CheckedProduct};
use super::response::{DeleteResponse, ListResponse, StatsResponse};
use super::state::AppState;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

// ==================
// Request Types
// ==================

/// Query string for `GET /products`
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Body of create and update
///
/// Every field is optional here so that the completeness check can report
/// what the structural check let through.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Number>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

impl ProductPayload {
    /// Decode the body the validator already checked
    pub fn from_checked(checked: CheckedProduct) -> ApiResult<Self> {
        Ok(serde_json::from_value(checked.0)?)
    }

    /// Completeness check
    ///
    /// Text fields must be present and non-empty. `price` and `inStock`
    /// only need to be present, so `0` and `false` are accepted.
    pub fn into_draft(self) -> ApiResult<ProductDraft> {
        fn filled(value: Option<String>) -> Option<String> {
            value.filter(|s| !s.is_empty())
        }

        match (
            filled(self.name),
            filled(self.description),
            self.price,
            filled(self.category),
            self.in_stock,
        ) {
            (Some(name), Some(description), Some(price), Some(category), Some(in_stock)) => {
                Ok(ProductDraft {
                    name,
                    description,
                    price: canonical_price(price),
                    category,
                    in_stock,
                })
            }
            _ => Err(ApiError::missing_fields()),
        }
    }
}

// ==================
// Product Routes
// ==================

/// Create product routes
///
/// The validator wraps the create and update handlers only, so a method
/// that is not routed still answers 405 rather than a validation 400.
pub fn product_routes(state: AppState) -> Router {
    Router::new()
        .route("/products", get(list_products_handler))
        .route(
            "/products",
            post(create_product_handler.layer(from_fn(validate_product))),
        )
        .route("/products/stats", get(product_stats_handler))
        .route("/products/:id", get(get_product_handler))
        .route(
            "/products/:id",
            put(update_product_handler.layer(from_fn(validate_product))),
        )
        .route("/products/:id", delete(delete_product_handler))
        .route_layer(from_fn_with_state(state.clone(), require_api_key))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Parse a positive integer query parameter, falling back to `default`
fn positive_param(name: &str, raw: Option<&str>, default: usize) -> ApiResult<usize> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ApiError::InvalidQuery(format!(
            "{name} must be a positive integer."
        ))),
    }
}

/// Zero-based window of `limit` items starting at `(page - 1) * limit`
fn paginate<T: Clone>(items: &[T], page: usize, limit: usize) -> Vec<T> {
    let start = (page - 1).saturating_mul(limit);
    items.iter().skip(start).take(limit).cloned().collect()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ==================
// Handlers
// ==================

async fn list_products_handler(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<ListResponse>> {
    let Query(query) = query.map_err(|e| ApiError::InvalidQuery(e.body_text()))?;
    let page = positive_param("page", query.page.as_deref(), DEFAULT_PAGE)?;
    let limit = positive_param("limit", query.limit.as_deref(), DEFAULT_LIMIT)?;
    let category = non_empty(&query.category);
    let search = non_empty(&query.search);

    let store = state.store.read()?;
    let filtered: Vec<&Product> = store
        .list()
        .iter()
        .filter(|p| category.map_or(true, |c| p.in_category(c)))
        .filter(|p| search.map_or(true, |s| p.name_contains(s)))
        .collect();

    let results = paginate(&filtered, page, limit)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(ListResponse {
        total: filtered.len(),
        page,
        limit,
        results,
    }))
}

async fn product_stats_handler(State(state): State<AppState>) -> ApiResult<Json<StatsResponse>> {
    let store = state.store.read()?;
    Ok(Json(StatsResponse::collect(store.list())))
}

async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    state
        .store
        .find_by_id(&id)?
        .map(Json)
        .ok_or_else(ApiError::product_not_found)
}

async fn create_product_handler(
    State(state): State<AppState>,
    Extension(body): Extension<CheckedProduct>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let payload = ProductPayload::from_checked(body)?;
    let draft = payload.into_draft()?;
    let product = Product::from_draft(state.ids.next_id(), draft);

    state.store.write()?.append(product.clone());
    tracing::info!(id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(body): Extension<CheckedProduct>,
) -> ApiResult<Json<Product>> {
    let payload = ProductPayload::from_checked(body)?;

    let mut store = state.store.write()?;
    let index = store
        .find_index_by_id(&id)
        .ok_or_else(ApiError::product_not_found)?;
    let draft = payload.into_draft()?;
    let updated = store.replace_at(index, Product::from_draft(id, draft))?.clone();
    tracing::info!(id = %updated.id, "product updated");

    Ok(Json(updated))
}

async fn delete_product_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let mut store = state.store.write()?;
    let index = store
        .find_index_by_id(&id)
        .ok_or_else(ApiError::product_not_found)?;
    let removed = store.remove_at(index)?;
    tracing::info!(id = %removed.id, "product deleted");

    Ok(Json(DeleteResponse::removed(removed)))
}
