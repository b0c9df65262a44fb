use async_trait::async_trait;
use common::{
    Product, ProductDraft, ProductId, ProductStock, ProductSummary, StockEntry, StockMovement,
    Warehouse, WarehouseDraft, WarehouseId, WarehouseStock,
};

use crate::Result;

/// Core trait for inventory persistence.
///
/// Implementations own products, warehouses and the stock entries that join
/// them. Handles are cheap to clone and are injected into each service; all
/// implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Inserts a product and returns it with its assigned id.
    async fn insert_product(&self, draft: ProductDraft) -> Result<Product>;

    /// Retrieves a product. Returns None if it doesn't exist.
    async fn get_product(&self, id: ProductId) -> Result<Option<Product>>;

    /// Lists all products ordered by id.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Replaces the name and description of a product.
    ///
    /// Fails with `ProductNotFound` if the product doesn't exist.
    async fn update_product(&self, id: ProductId, draft: ProductDraft) -> Result<Product>;

    /// Deletes a product together with every stock entry referencing it.
    ///
    /// Both deletions happen atomically. Returns the deleted product, or
    /// fails with `ProductNotFound` leaving the store untouched.
    async fn delete_product(&self, id: ProductId) -> Result<Product>;

    /// Inserts a warehouse. Fails with `DuplicateKey` if the address is taken.
    async fn insert_warehouse(&self, draft: WarehouseDraft) -> Result<Warehouse>;

    /// Retrieves a warehouse. Returns None if it doesn't exist.
    async fn get_warehouse(&self, id: WarehouseId) -> Result<Option<Warehouse>>;

    /// Lists all warehouses ordered by id.
    async fn list_warehouses(&self) -> Result<Vec<Warehouse>>;

    /// Replaces the name and address of a warehouse.
    async fn update_warehouse(&self, id: WarehouseId, draft: WarehouseDraft) -> Result<Warehouse>;

    /// Deletes a warehouse together with every stock entry referencing it.
    async fn delete_warehouse(&self, id: WarehouseId) -> Result<Warehouse>;

    /// Retrieves the stock entry for a pair, if one was ever recorded.
    async fn get_stock_entry(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Option<StockEntry>>;

    /// Applies a movement to the entry for a pair as one read-modify-write.
    ///
    /// Movements that create entries insert an empty one for an unseen pair
    /// first; fulfilling an unseen pair fails with `StockEntryNotFound`. A
    /// movement rejected by the ledger arithmetic leaves the entry unchanged.
    async fn apply_movement(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        movement: StockMovement,
    ) -> Result<StockEntry>;

    /// Stock held for a product in each warehouse, ordered by warehouse id.
    async fn stock_for_product(&self, product_id: ProductId) -> Result<Vec<WarehouseStock>>;

    /// Stock held in a warehouse for each product, ordered by product id.
    async fn stock_in_warehouse(&self, warehouse_id: WarehouseId) -> Result<Vec<ProductStock>>;

    /// Per-product totals across warehouses for every product with stock
    /// entries, ordered by product id.
    async fn stock_summary(&self) -> Result<Vec<ProductSummary>>;
}
