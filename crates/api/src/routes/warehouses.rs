//! Warehouse endpoints and stock movements under `/warehouses`.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use common::{ProductId, ProductStock, StockEntry, StockMovement, Warehouse, WarehouseId};
use serde::Serialize;
use serde_json::Value;
use store::InventoryStore;

use crate::error::ApiError;
use crate::routes::AppState;
use crate::validate::Validator;

// -- Response types --

#[derive(Serialize)]
pub struct WarehousesResponse {
    pub warehouses: Vec<Warehouse>,
}

#[derive(Serialize)]
pub struct WarehouseResponse {
    pub warehouse: Warehouse,
}

#[derive(Serialize)]
pub struct WarehouseProductsResponse {
    pub products: Vec<ProductStock>,
}

#[derive(Serialize)]
pub struct StockedResponse {
    pub stocked: StockEntry,
}

// -- Handlers --

/// GET /warehouses: list every warehouse.
#[tracing::instrument(skip(state))]
pub async fn list<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<WarehousesResponse>, ApiError> {
    let warehouses = state.registry.list().await?;
    Ok(Json(WarehousesResponse { warehouses }))
}

/// GET /warehouses/{id}: products held in a warehouse.
#[tracing::instrument(skip(state))]
pub async fn products<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<WarehouseProductsResponse>, ApiError> {
    let id = parse_warehouse_id(&id)?;
    let products = state.registry.products_in(id).await?;
    Ok(Json(WarehouseProductsResponse { products }))
}

/// POST /warehouses: register a warehouse.
#[tracing::instrument(skip(state, body))]
pub async fn create<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WarehouseResponse>, ApiError> {
    let mut v = Validator::with_body(body)?;
    let name = v.string("name");
    let address = v.string("address");
    let (Some(name), Some(address)) = (name, address) else {
        return Err(v.into_error());
    };

    let warehouse = state.registry.create(&name, &address).await?;
    Ok(Json(WarehouseResponse { warehouse }))
}

/// PUT /warehouses/{id}: replace a warehouse's name and address.
#[tracing::instrument(skip(state, body))]
pub async fn update<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<WarehouseResponse>, ApiError> {
    let mut v = Validator::with_body(body)?;
    let id = v.path_id("id", &id);
    let name = v.string("name");
    let address = v.string("address");
    let (Some(id), Some(name), Some(address)) = (id, name, address) else {
        return Err(v.into_error());
    };

    let warehouse = state
        .registry
        .update(WarehouseId::new(id), &name, &address)
        .await?;
    Ok(Json(WarehouseResponse { warehouse }))
}

/// DELETE /warehouses/{id}: delete a warehouse and its stock entries.
#[tracing::instrument(skip(state))]
pub async fn delete<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<WarehouseResponse>, ApiError> {
    let id = parse_warehouse_id(&id)?;
    let warehouse = state.registry.delete(id).await?;
    Ok(Json(WarehouseResponse { warehouse }))
}

/// POST /warehouses/{id}/{product_id}/order: grow the back order.
pub async fn order<S: InventoryStore + Clone + 'static>(
    state: State<Arc<AppState<S>>>,
    path: Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StockedResponse>, ApiError> {
    apply_movement(state, path, body, StockMovement::Order).await
}

/// POST /warehouses/{id}/{product_id}/stock: receive stock.
pub async fn stock<S: InventoryStore + Clone + 'static>(
    state: State<Arc<AppState<S>>>,
    path: Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StockedResponse>, ApiError> {
    apply_movement(state, path, body, StockMovement::Stock).await
}

/// POST /warehouses/{id}/{product_id}/fulfill: ship stock out.
pub async fn fulfill<S: InventoryStore + Clone + 'static>(
    state: State<Arc<AppState<S>>>,
    path: Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<StockedResponse>, ApiError> {
    apply_movement(state, path, body, StockMovement::Fulfill).await
}

#[tracing::instrument(skip(state, body, movement))]
async fn apply_movement<S: InventoryStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((warehouse_id, product_id)): Path<(String, String)>,
    body: Result<Json<Value>, JsonRejection>,
    movement: fn(u32) -> StockMovement,
) -> Result<Json<StockedResponse>, ApiError> {
    let mut v = Validator::with_body(body)?;
    let warehouse = v.path_id("warehouse_id", &warehouse_id);
    let product = v.path_id("product_id", &product_id);
    let quantity = v.quantity("quantity");
    let (Some(warehouse), Some(product), Some(quantity)) = (warehouse, product, quantity) else {
        return Err(v.into_error());
    };
    let (warehouse_id, product_id) = (WarehouseId::new(warehouse), ProductId::new(product));

    // the ledger is only reached for pairs whose parents both exist
    let product_exists = state.catalog.get(product_id).await?.is_some();
    let warehouse_exists = state.registry.get(warehouse_id).await?.is_some();
    if !product_exists || !warehouse_exists {
        return Err(ApiError::NotFound(format!(
            "Warehouse number {warehouse_id} or Product number {product_id} does not exist."
        )));
    }

    let stocked = state
        .ledger
        .apply(product_id, warehouse_id, movement(quantity))
        .await?;
    Ok(Json(StockedResponse { stocked }))
}

fn parse_warehouse_id(raw: &str) -> Result<WarehouseId, ApiError> {
    let mut v = Validator::new();
    match v.path_id("id", raw) {
        Some(id) => Ok(WarehouseId::new(id)),
        None => Err(v.into_error()),
    }
}
