//! Stock ledger service.

use common::{ProductId, StockEntry, StockMovement, WarehouseId};
use store::InventoryStore;

use crate::error::DomainError;

/// Service applying stock movements to (product, warehouse) pairs.
///
/// The ledger does not check that the product and warehouse exist; callers
/// resolve both before moving stock. Each movement is applied by the store
/// as a single read-modify-write.
#[derive(Clone)]
pub struct StockLedger<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> StockLedger<S> {
    /// Creates a new ledger backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Records quantity ordered to a warehouse, growing its back order.
    pub async fn order(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: u32,
    ) -> Result<StockEntry, DomainError> {
        self.apply(product_id, warehouse_id, StockMovement::Order(quantity))
            .await
    }

    /// Receives stock into a warehouse. Outstanding back order is paid down
    /// first and never drops below zero.
    pub async fn stock(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: u32,
    ) -> Result<StockEntry, DomainError> {
        self.apply(product_id, warehouse_id, StockMovement::Stock(quantity))
            .await
    }

    /// Ships stock out of a warehouse.
    ///
    /// Fails with `StockEntryNotFound` if nothing was ever recorded for the
    /// pair and with `InsufficientStock` if the shelf holds less than asked.
    pub async fn fulfill(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        quantity: u32,
    ) -> Result<StockEntry, DomainError> {
        self.apply(product_id, warehouse_id, StockMovement::Fulfill(quantity))
            .await
    }

    /// Current entry for a pair, if any.
    pub async fn get(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Option<StockEntry>, DomainError> {
        Ok(self.store.get_stock_entry(product_id, warehouse_id).await?)
    }

    /// Applies any movement to the entry for a pair.
    #[tracing::instrument(skip(self), fields(kind = movement.kind()))]
    pub async fn apply(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        movement: StockMovement,
    ) -> Result<StockEntry, DomainError> {
        match self
            .store
            .apply_movement(product_id, warehouse_id, movement)
            .await
        {
            Ok(entry) => {
                metrics::counter!("stock_movements_total", "kind" => movement.kind()).increment(1);
                tracing::debug!(
                    in_stock = entry.in_stock_quantity,
                    back_order = entry.back_order_quantity,
                    "stock movement applied"
                );
                Ok(entry)
            }
            Err(err) => {
                let err = DomainError::from(err);
                if !matches!(err, DomainError::Store(_)) {
                    metrics::counter!("stock_movements_rejected_total", "kind" => movement.kind())
                        .increment(1);
                    tracing::debug!(error = %err, "stock movement rejected");
                }
                Err(err)
            }
        }
    }
}
