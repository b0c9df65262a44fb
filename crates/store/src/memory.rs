use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{
    Product, ProductDraft, ProductId, ProductStock, ProductSummary, StockEntry, StockMovement,
    Warehouse, WarehouseDraft, WarehouseId, WarehouseStock,
};
use tokio::sync::RwLock;

use crate::{InventoryStore, Result, StoreError, WAREHOUSE_ADDRESS_KEY};

#[derive(Default)]
struct MemoryState {
    products: BTreeMap<ProductId, Product>,
    warehouses: BTreeMap<WarehouseId, Warehouse>,
    entries: BTreeMap<(ProductId, WarehouseId), StockEntry>,
    last_product_id: i64,
    last_warehouse_id: i64,
}

impl MemoryState {
    fn address_taken(&self, address: &str, except: Option<WarehouseId>) -> bool {
        self.warehouses
            .values()
            .any(|w| w.address == address && Some(w.id) != except)
    }
}

/// In-memory inventory store.
///
/// Provides the same interface and constraint behavior as the PostgreSQL
/// implementation: unique addresses, foreign keys on stock entries, and
/// sequential ids starting at 1. Used when no database is configured and
/// throughout the tests.
#[derive(Clone, Default)]
pub struct InMemoryInventoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryInventoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of stock entries stored.
    pub async fn stock_entry_count(&self) -> usize {
        self.state.read().await.entries.len()
    }
}

#[async_trait]
impl InventoryStore for InMemoryInventoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn insert_product(&self, draft: ProductDraft) -> Result<Product> {
        let mut state = self.state.write().await;
        state.last_product_id += 1;

        let product = Product {
            id: ProductId::new(state.last_product_id),
            name: draft.name,
            description: draft.description,
        };
        state.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(self.state.read().await.products.values().cloned().collect())
    }

    async fn update_product(&self, id: ProductId, draft: ProductDraft) -> Result<Product> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .get_mut(&id)
            .ok_or(StoreError::ProductNotFound(id))?;

        product.name = draft.name;
        product.description = draft.description;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<Product> {
        let mut state = self.state.write().await;
        let product = state
            .products
            .remove(&id)
            .ok_or(StoreError::ProductNotFound(id))?;

        state.entries.retain(|(product_id, _), _| *product_id != id);
        Ok(product)
    }

    async fn insert_warehouse(&self, draft: WarehouseDraft) -> Result<Warehouse> {
        let mut state = self.state.write().await;
        if state.address_taken(&draft.address, None) {
            return Err(StoreError::DuplicateKey {
                constraint: WAREHOUSE_ADDRESS_KEY.to_string(),
            });
        }

        state.last_warehouse_id += 1;
        let warehouse = Warehouse {
            id: WarehouseId::new(state.last_warehouse_id),
            name: draft.name,
            address: draft.address,
        };
        state.warehouses.insert(warehouse.id, warehouse.clone());
        Ok(warehouse)
    }

    async fn get_warehouse(&self, id: WarehouseId) -> Result<Option<Warehouse>> {
        Ok(self.state.read().await.warehouses.get(&id).cloned())
    }

    async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        Ok(self.state.read().await.warehouses.values().cloned().collect())
    }

    async fn update_warehouse(&self, id: WarehouseId, draft: WarehouseDraft) -> Result<Warehouse> {
        let mut state = self.state.write().await;
        if !state.warehouses.contains_key(&id) {
            return Err(StoreError::WarehouseNotFound(id));
        }
        if state.address_taken(&draft.address, Some(id)) {
            return Err(StoreError::DuplicateKey {
                constraint: WAREHOUSE_ADDRESS_KEY.to_string(),
            });
        }

        let warehouse = state
            .warehouses
            .get_mut(&id)
            .ok_or(StoreError::WarehouseNotFound(id))?;
        warehouse.name = draft.name;
        warehouse.address = draft.address;
        Ok(warehouse.clone())
    }

    async fn delete_warehouse(&self, id: WarehouseId) -> Result<Warehouse> {
        let mut state = self.state.write().await;
        let warehouse = state
            .warehouses
            .remove(&id)
            .ok_or(StoreError::WarehouseNotFound(id))?;

        state
            .entries
            .retain(|(_, warehouse_id), _| *warehouse_id != id);
        Ok(warehouse)
    }

    async fn get_stock_entry(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Option<StockEntry>> {
        let state = self.state.read().await;
        Ok(state.entries.get(&(product_id, warehouse_id)).copied())
    }

    async fn apply_movement(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        movement: StockMovement,
    ) -> Result<StockEntry> {
        let mut state = self.state.write().await;
        let key = (product_id, warehouse_id);

        let current = match state.entries.get(&key) {
            Some(entry) => *entry,
            None if movement.creates_entry() => {
                // mirror the foreign keys on stock_entries
                if !state.products.contains_key(&product_id) {
                    return Err(StoreError::ForeignKey {
                        constraint: "stock_entries_product_id_fkey".to_string(),
                    });
                }
                if !state.warehouses.contains_key(&warehouse_id) {
                    return Err(StoreError::ForeignKey {
                        constraint: "stock_entries_warehouse_id_fkey".to_string(),
                    });
                }
                StockEntry::empty(product_id, warehouse_id)
            }
            None => {
                return Err(StoreError::StockEntryNotFound {
                    product_id,
                    warehouse_id,
                });
            }
        };

        let next = current.apply(movement)?;
        state.entries.insert(key, next);
        Ok(next)
    }

    async fn stock_for_product(&self, product_id: ProductId) -> Result<Vec<WarehouseStock>> {
        let state = self.state.read().await;
        let stock = state
            .entries
            .values()
            .filter(|e| e.product_id == product_id)
            .filter_map(|e| {
                state.warehouses.get(&e.warehouse_id).map(|w| WarehouseStock {
                    warehouse: w.clone(),
                    in_stock_quantity: e.in_stock_quantity,
                    back_order_quantity: e.back_order_quantity,
                })
            })
            .collect();
        Ok(stock)
    }

    async fn stock_in_warehouse(&self, warehouse_id: WarehouseId) -> Result<Vec<ProductStock>> {
        let state = self.state.read().await;
        let stock = state
            .entries
            .values()
            .filter(|e| e.warehouse_id == warehouse_id)
            .filter_map(|e| {
                state.products.get(&e.product_id).map(|p| ProductStock {
                    product: p.clone(),
                    in_stock_quantity: e.in_stock_quantity,
                    back_order_quantity: e.back_order_quantity,
                })
            })
            .collect();
        Ok(stock)
    }

    async fn stock_summary(&self) -> Result<Vec<ProductSummary>> {
        let state = self.state.read().await;
        let mut totals: BTreeMap<ProductId, (i64, i64)> = BTreeMap::new();
        for entry in state.entries.values() {
            let total = totals.entry(entry.product_id).or_default();
            total.0 = total.0.saturating_add(entry.in_stock_quantity);
            total.1 = total.1.saturating_add(entry.back_order_quantity);
        }

        let summary = totals
            .into_iter()
            .filter_map(|(product_id, (in_stock, back_order))| {
                state.products.get(&product_id).map(|p| ProductSummary {
                    product_id,
                    name: p.name.clone(),
                    description: p.description.clone(),
                    in_stock_quantity: in_stock,
                    back_order_quantity: back_order,
                })
            })
            .collect();
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::StockError;

    async fn store_with_pair() -> (InMemoryInventoryStore, ProductId, WarehouseId) {
        let store = InMemoryInventoryStore::new();
        let product = store
            .insert_product(ProductDraft::new("Pizza", "Tasty Frozen pizza"))
            .await
            .unwrap();
        let warehouse = store
            .insert_warehouse(WarehouseDraft::new("W1", "245 Rue Laval"))
            .await
            .unwrap();
        (store, product.id, warehouse.id)
    }

    #[tokio::test]
    async fn ids_are_assigned_sequentially() {
        let store = InMemoryInventoryStore::new();
        let a = store.insert_product(ProductDraft::new("a", "")).await.unwrap();
        let b = store.insert_product(ProductDraft::new("b", "")).await.unwrap();
        assert_eq!(a.id, ProductId::new(1));
        assert_eq!(b.id, ProductId::new(2));
    }

    #[tokio::test]
    async fn duplicate_address_is_rejected() {
        let (store, _, _) = store_with_pair().await;
        let err = store
            .insert_warehouse(WarehouseDraft::new("W2", "245 Rue Laval"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate_of(WAREHOUSE_ADDRESS_KEY));
        assert_eq!(store.list_warehouses().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn warehouse_may_keep_its_own_address() {
        let (store, _, warehouse_id) = store_with_pair().await;
        let updated = store
            .update_warehouse(warehouse_id, WarehouseDraft::new("Renamed", "245 Rue Laval"))
            .await
            .unwrap();
        assert_eq!(updated.name, "Renamed");
    }

    #[tokio::test]
    async fn first_movement_creates_entry() {
        let (store, p, w) = store_with_pair().await;
        assert!(store.get_stock_entry(p, w).await.unwrap().is_none());

        let entry = store
            .apply_movement(p, w, StockMovement::Order(3))
            .await
            .unwrap();
        assert_eq!(entry.back_order_quantity, 3);
        assert_eq!(store.stock_entry_count().await, 1);
    }

    #[tokio::test]
    async fn fulfill_without_entry_is_not_found() {
        let (store, p, w) = store_with_pair().await;
        let err = store
            .apply_movement(p, w, StockMovement::Fulfill(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::StockEntryNotFound { .. }));
        assert_eq!(store.stock_entry_count().await, 0);
    }

    #[tokio::test]
    async fn rejected_movement_leaves_entry_unchanged() {
        let (store, p, w) = store_with_pair().await;
        store
            .apply_movement(p, w, StockMovement::Stock(2))
            .await
            .unwrap();

        let err = store
            .apply_movement(p, w, StockMovement::Fulfill(5))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Stock(StockError::InsufficientStock { .. })
        ));

        let entry = store.get_stock_entry(p, w).await.unwrap().unwrap();
        assert_eq!(entry.in_stock_quantity, 2);
    }

    #[tokio::test]
    async fn movement_on_unknown_product_violates_foreign_key() {
        let (store, _, w) = store_with_pair().await;
        let err = store
            .apply_movement(ProductId::new(99), w, StockMovement::Stock(1))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKey { .. }));
    }

    #[tokio::test]
    async fn deleting_parents_cascades_to_entries() {
        let (store, p, w) = store_with_pair().await;
        let other = store
            .insert_warehouse(WarehouseDraft::new("W2", "142 Bay Street"))
            .await
            .unwrap();
        store.apply_movement(p, w, StockMovement::Stock(1)).await.unwrap();
        store
            .apply_movement(p, other.id, StockMovement::Stock(1))
            .await
            .unwrap();

        store.delete_warehouse(other.id).await.unwrap();
        assert_eq!(store.stock_entry_count().await, 1);

        store.delete_product(p).await.unwrap();
        assert_eq!(store.stock_entry_count().await, 0);
        assert!(store.stock_in_warehouse(w).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_unknown_product_is_not_found() {
        let store = InMemoryInventoryStore::new();
        let err = store.delete_product(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn summary_totals_saturate() {
        let (store, p, w1) = store_with_pair().await;
        let w2 = store
            .insert_warehouse(WarehouseDraft::new("W2", "142 Bay Street"))
            .await
            .unwrap();
        {
            let mut state = store.state.write().await;
            for w in [w1, w2.id] {
                let mut entry = StockEntry::empty(p, w);
                entry.in_stock_quantity = i64::MAX - 1;
                entry.back_order_quantity = 3;
                state.entries.insert((p, w), entry);
            }
        }

        let summary = store.stock_summary().await.unwrap();
        assert_eq!(summary[0].in_stock_quantity, i64::MAX);
        assert_eq!(summary[0].back_order_quantity, 6);
    }

    #[tokio::test]
    async fn summary_sums_across_warehouses() {
        let (store, p, w) = store_with_pair().await;
        let other = store
            .insert_warehouse(WarehouseDraft::new("W2", "142 Bay Street"))
            .await
            .unwrap();
        let unstocked = store
            .insert_product(ProductDraft::new("shoes", "size 8"))
            .await
            .unwrap();

        store.apply_movement(p, w, StockMovement::Stock(5)).await.unwrap();
        store
            .apply_movement(p, other.id, StockMovement::Stock(100))
            .await
            .unwrap();
        store
            .apply_movement(p, other.id, StockMovement::Order(4))
            .await
            .unwrap();

        let summary = store.stock_summary().await.unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].product_id, p);
        assert_eq!(summary[0].in_stock_quantity, 105);
        assert_eq!(summary[0].back_order_quantity, 4);
        assert!(summary.iter().all(|s| s.product_id != unstocked.id));
    }
}
