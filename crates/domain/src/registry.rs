//! Warehouse registry service.

use common::{ProductStock, Warehouse, WarehouseDraft, WarehouseId};
use store::{InventoryStore, StoreError, WAREHOUSE_ADDRESS_KEY};

use crate::error::DomainError;

/// Service for managing warehouses. Addresses are unique.
#[derive(Clone)]
pub struct WarehouseRegistry<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> WarehouseRegistry<S> {
    /// Creates a new registry backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Registers a warehouse.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str, address: &str) -> Result<Warehouse, DomainError> {
        let warehouse = self
            .store
            .insert_warehouse(WarehouseDraft::new(name, address))
            .await
            .map_err(|e| address_conflict(e, address))?;
        tracing::info!(warehouse_id = %warehouse.id, "warehouse created");
        Ok(warehouse)
    }

    /// Loads a warehouse by id.
    pub async fn get(&self, id: WarehouseId) -> Result<Option<Warehouse>, DomainError> {
        Ok(self.store.get_warehouse(id).await?)
    }

    /// Loads a warehouse by id, failing if it doesn't exist.
    pub async fn require(&self, id: WarehouseId) -> Result<Warehouse, DomainError> {
        self.get(id).await?.ok_or(DomainError::WarehouseNotFound(id))
    }

    /// Lists every warehouse.
    pub async fn list(&self) -> Result<Vec<Warehouse>, DomainError> {
        Ok(self.store.list_warehouses().await?)
    }

    /// Replaces a warehouse's name and address.
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: WarehouseId,
        name: &str,
        address: &str,
    ) -> Result<Warehouse, DomainError> {
        self.store
            .update_warehouse(id, WarehouseDraft::new(name, address))
            .await
            .map_err(|e| address_conflict(e, address))
    }

    /// Deletes a warehouse and its stock entries.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: WarehouseId) -> Result<Warehouse, DomainError> {
        let warehouse = self.store.delete_warehouse(id).await?;
        tracing::info!(warehouse_id = %id, "warehouse deleted");
        Ok(warehouse)
    }

    /// Stock held in a warehouse for each product it carries.
    pub async fn products_in(&self, id: WarehouseId) -> Result<Vec<ProductStock>, DomainError> {
        self.require(id).await?;
        Ok(self.store.stock_in_warehouse(id).await?)
    }
}

fn address_conflict(err: StoreError, address: &str) -> DomainError {
    if err.is_duplicate_of(WAREHOUSE_ADDRESS_KEY) {
        DomainError::DuplicateAddress(address.to_string())
    } else {
        err.into()
    }
}
