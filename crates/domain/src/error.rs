//! Domain error types.

use common::{ProductId, StockError, WarehouseId};
use store::StoreError;
use thiserror::Error;

/// Errors that can occur during domain operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The product does not exist.
    #[error("Product with id: {0} not found")]
    ProductNotFound(ProductId),

    /// The warehouse does not exist.
    #[error("Warehouse with id: {0} not found")]
    WarehouseNotFound(WarehouseId),

    /// Nothing has ever been recorded for this product in this warehouse.
    #[error("Product {product_id} has no stock in warehouse {warehouse_id}")]
    StockEntryNotFound {
        product_id: ProductId,
        warehouse_id: WarehouseId,
    },

    /// Another warehouse already uses this address.
    #[error("Warehouse address: {0} duplicated")]
    DuplicateAddress(String),

    /// Fulfilling would take the in-stock quantity below zero.
    #[error("Not enough products in stock to fulfill order")]
    InsufficientStock { available: i64, requested: u32 },

    /// A stock counter would overflow.
    #[error("Stock quantity overflow")]
    QuantityOverflow,

    /// An error occurred in the store.
    #[error("Store error: {0}")]
    Store(StoreError),
}

impl From<StockError> for DomainError {
    fn from(err: StockError) -> Self {
        match err {
            StockError::InsufficientStock {
                available,
                requested,
            } => DomainError::InsufficientStock {
                available,
                requested,
            },
            StockError::QuantityOverflow => DomainError::QuantityOverflow,
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ProductNotFound(id) => DomainError::ProductNotFound(id),
            StoreError::WarehouseNotFound(id) => DomainError::WarehouseNotFound(id),
            StoreError::StockEntryNotFound {
                product_id,
                warehouse_id,
            } => DomainError::StockEntryNotFound {
                product_id,
                warehouse_id,
            },
            StoreError::Stock(stock_err) => stock_err.into(),
            other => DomainError::Store(other),
        }
    }
}
