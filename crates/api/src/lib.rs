//! HTTP API server for the inventory service.
//!
//! Provides REST endpoints for products, warehouses and stock movements,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;
pub mod validate;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use domain::{ProductCatalog, StockLedger, WarehouseRegistry};
use metrics_exporter_prometheus::PrometheusHandle;
use store::InventoryStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::AppState;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: InventoryStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    use routes::{observability, products, warehouses};

    let metrics_router = Router::new()
        .route("/metrics", get(observability::metrics))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(observability::health::<S>))
        .route(
            "/inventory/products",
            get(products::list::<S>).post(products::create::<S>),
        )
        .route(
            "/inventory/products/summary/download",
            get(products::download_summary::<S>),
        )
        .route(
            "/inventory/products/{id}",
            get(products::detail::<S>)
                .put(products::update::<S>)
                .delete(products::delete::<S>),
        )
        .route(
            "/warehouses",
            get(warehouses::list::<S>).post(warehouses::create::<S>),
        )
        .route(
            "/warehouses/{id}",
            get(warehouses::products::<S>)
                .put(warehouses::update::<S>)
                .delete(warehouses::delete::<S>),
        )
        .route(
            "/warehouses/{id}/{product_id}/order",
            post(warehouses::order::<S>),
        )
        .route(
            "/warehouses/{id}/{product_id}/stock",
            post(warehouses::stock::<S>),
        )
        .route(
            "/warehouses/{id}/{product_id}/fulfill",
            post(warehouses::fulfill::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wires the domain services around one store handle.
pub fn create_state<S: InventoryStore + Clone + 'static>(store: S) -> Arc<AppState<S>> {
    Arc::new(AppState {
        catalog: ProductCatalog::new(store.clone()),
        registry: WarehouseRegistry::new(store.clone()),
        ledger: StockLedger::new(store.clone()),
        store,
    })
}
