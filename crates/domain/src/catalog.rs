//! Product catalog service.

use common::{Product, ProductDraft, ProductId, ProductSummary, WarehouseStock};
use store::InventoryStore;

use crate::error::DomainError;

/// Service for managing products.
///
/// Deleting a product removes its stock entries in every warehouse.
#[derive(Clone)]
pub struct ProductCatalog<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> ProductCatalog<S> {
    /// Creates a new catalog backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates a product; the store assigns its id.
    #[tracing::instrument(skip(self))]
    pub async fn create(&self, name: &str, description: &str) -> Result<Product, DomainError> {
        let product = self
            .store
            .insert_product(ProductDraft::new(name, description))
            .await?;
        tracing::info!(product_id = %product.id, "product created");
        Ok(product)
    }

    /// Loads a product by id.
    pub async fn get(&self, id: ProductId) -> Result<Option<Product>, DomainError> {
        Ok(self.store.get_product(id).await?)
    }

    /// Loads a product by id, failing if it doesn't exist.
    pub async fn require(&self, id: ProductId) -> Result<Product, DomainError> {
        self.get(id).await?.ok_or(DomainError::ProductNotFound(id))
    }

    /// Lists every product.
    pub async fn list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.store.list_products().await?)
    }

    /// Replaces a product's name and description.
    #[tracing::instrument(skip(self))]
    pub async fn update(
        &self,
        id: ProductId,
        name: &str,
        description: &str,
    ) -> Result<Product, DomainError> {
        Ok(self
            .store
            .update_product(id, ProductDraft::new(name, description))
            .await?)
    }

    /// Deletes a product and its stock entries.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: ProductId) -> Result<Product, DomainError> {
        let product = self.store.delete_product(id).await?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(product)
    }

    /// Stock held for a product across the warehouses holding it.
    pub async fn detail(&self, id: ProductId) -> Result<Vec<WarehouseStock>, DomainError> {
        self.require(id).await?;
        Ok(self.store.stock_for_product(id).await?)
    }

    /// Per-product totals for every product with recorded stock.
    pub async fn summary(&self) -> Result<Vec<ProductSummary>, DomainError> {
        Ok(self.store.stock_summary().await?)
    }
}
