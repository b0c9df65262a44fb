//! Domain layer for the inventory service.
//!
//! This crate provides the services the API layer drives:
//! - [`ProductCatalog`] for product CRUD, per-product stock detail and the summary
//! - [`WarehouseRegistry`] for warehouse CRUD and per-warehouse stock
//! - [`StockLedger`] for order / stock / fulfill movements
//!
//! Each service holds its own clone of the injected store handle.

pub mod catalog;
pub mod error;
pub mod ledger;
pub mod registry;
pub mod seed;

pub use catalog::ProductCatalog;
pub use error::DomainError;
pub use ledger::StockLedger;
pub use registry::WarehouseRegistry;
pub use seed::load_demo_data;
