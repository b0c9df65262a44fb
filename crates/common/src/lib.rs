//! Shared types for the inventory service: identifiers, catalog entities,
//! stock views, and the stock ledger arithmetic.

pub mod model;
pub mod stock;
pub mod types;

pub use model::{
    Product, ProductDraft, ProductStock, ProductSummary, Warehouse, WarehouseDraft, WarehouseStock,
};
pub use stock::{StockEntry, StockError, StockMovement};
pub use types::{ProductId, WarehouseId};
