//! Product catalog endpoints under `/inventory`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::IntoResponse;
use common::{Product, ProductId, WarehouseStock};
use reporting::SummaryReport;
use serde::Serialize;
use serde_json::Value;
use store::InventoryStore;

use crate::error::ApiError;
use crate::routes::AppState;
use crate::validate::Validator;

// -- Response types --

#[derive(Serialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}

#[derive(Serialize)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetailResponse {
    pub product_detail: Vec<WarehouseStock>,
}

// -- Handlers --

/// GET /inventory/products: list every product.
#[tracing::instrument(skip(state))]
pub async fn list<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<ProductsResponse>, ApiError> {
    let products = state.catalog.list().await?;
    Ok(Json(ProductsResponse { products }))
}

/// GET /inventory/products/{id}: stock of a product in each warehouse.
#[tracing::instrument(skip(state))]
pub async fn detail<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailResponse>, ApiError> {
    let id = parse_product_id(&id)?;
    let product_detail = state.catalog.detail(id).await?;
    Ok(Json(ProductDetailResponse { product_detail }))
}

/// POST /inventory/products: create a product.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut v = Validator::with_body(body)?;
    let name = v.string("name");
    let description = v.string("description");
    let (Some(name), Some(description)) = (name, description) else {
        return Err(v.into_error());
    };

    let product = state.catalog.create(&name, &description).await?;
    Ok(Json(ProductResponse { product }))
}

/// PUT /inventory/products/{id}: replace a product's name and description.
#[tracing::instrument(skip(state, body))]
pub async fn update<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ProductResponse>, ApiError> {
    let mut v = Validator::with_body(body)?;
    let id = v.path_id("id", &id);
    let name = v.string("name");
    let description = v.string("description");
    let (Some(id), Some(name), Some(description)) = (id, name, description) else {
        return Err(v.into_error());
    };

    let product = state
        .catalog
        .update(ProductId::new(id), &name, &description)
        .await?;
    Ok(Json(ProductResponse { product }))
}

/// DELETE /inventory/products/{id}: delete a product and its stock entries.
#[tracing::instrument(skip(state))]
pub async fn delete<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let id = parse_product_id(&id)?;
    let product = state.catalog.delete(id).await?;
    Ok(Json(ProductResponse { product }))
}

/// GET /inventory/products/summary/download: stock totals as a CSV file.
#[tracing::instrument(skip(state))]
pub async fn download_summary<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<impl IntoResponse, ApiError> {
    let report = SummaryReport::generate(&state.catalog).await?;
    let disposition = format!("attachment; filename=\"{}\"", report.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        report.to_csv(),
    ))
}

fn parse_product_id(raw: &str) -> Result<ProductId, ApiError> {
    let mut v = Validator::new();
    match v.path_id("id", raw) {
        Some(id) => Ok(ProductId::new(id)),
        None => Err(v.into_error()),
    }
}
