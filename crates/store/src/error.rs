use common::{ProductId, StockError, WarehouseId};
use thiserror::Error;

/// Name of the unique constraint on warehouse addresses.
pub const WAREHOUSE_ADDRESS_KEY: &str = "warehouses_address_key";

/// Errors that can occur when interacting with the inventory store.
///
/// Constraint violations are classified here, so callers match on variants
/// instead of inspecting driver error codes.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No product with this id.
    #[error("Product with id: {0} not found")]
    ProductNotFound(ProductId),

    /// No warehouse with this id.
    #[error("Warehouse with id: {0} not found")]
    WarehouseNotFound(WarehouseId),

    /// No stock has ever been recorded for this pair.
    #[error("Product {product_id} has no stock entry in warehouse {warehouse_id}")]
    StockEntryNotFound {
        product_id: ProductId,
        warehouse_id: WarehouseId,
    },

    /// A unique constraint was violated.
    #[error("Duplicate key violates constraint {constraint}")]
    DuplicateKey { constraint: String },

    /// A foreign key constraint was violated.
    #[error("Foreign key violation on constraint {constraint}")]
    ForeignKey { constraint: String },

    /// The ledger arithmetic rejected a movement.
    #[error(transparent)]
    Stock(#[from] StockError),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Returns true if this is a unique violation on the given constraint.
    pub fn is_duplicate_of(&self, name: &str) -> bool {
        matches!(self, StoreError::DuplicateKey { constraint } if constraint == name)
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            let constraint = db_err.constraint().unwrap_or_default().to_string();
            if db_err.is_unique_violation() {
                return StoreError::DuplicateKey { constraint };
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::ForeignKey { constraint };
            }
        }
        StoreError::Database(err)
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
