//! HTTP route handlers.

pub mod observability;
pub mod products;
pub mod warehouses;

use axum::Json;
use axum::http::StatusCode;
use domain::{ProductCatalog, StockLedger, WarehouseRegistry};
use serde::Serialize;
use store::InventoryStore;

/// Shared application state accessible from all handlers.
pub struct AppState<S: InventoryStore> {
    pub store: S,
    pub catalog: ProductCatalog<S>,
    pub registry: WarehouseRegistry<S>,
    pub ledger: StockLedger<S>,
}

#[derive(Serialize)]
pub struct NotFoundResponse {
    pub error: &'static str,
}

/// Fallback for unmatched routes.
pub async fn not_found() -> (StatusCode, Json<NotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse { error: "Not Found" }),
    )
}
