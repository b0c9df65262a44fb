//! Demo data for local runs.

use store::InventoryStore;

use crate::{DomainError, ProductCatalog, StockLedger, WarehouseRegistry};

/// Loads a small demo inventory: three products stocked across two
/// warehouses. Does nothing if any product or warehouse already exists.
///
/// Returns true if the data was loaded.
pub async fn load_demo_data<S: InventoryStore>(
    catalog: &ProductCatalog<S>,
    registry: &WarehouseRegistry<S>,
    ledger: &StockLedger<S>,
) -> Result<bool, DomainError> {
    if !catalog.list().await?.is_empty() || !registry.list().await?.is_empty() {
        tracing::info!("store not empty, skipping demo data");
        return Ok(false);
    }

    let pizza = catalog.create("Pizza", "Tasty Frozen pizza").await?;
    let shoes = catalog.create("shoes", "Addidas shoes size 8").await?;
    let tshirt = catalog.create("T-shirt", "Green T-shirts size L").await?;

    let joes = registry
        .create("Joe's warehouse", "245 Rue Laval, Montreal")
        .await?;
    let jeans = registry
        .create("Jean's warehouse", "142 Bay Street, Toronto")
        .await?;

    for (product, warehouse, quantity) in [
        (&pizza, &joes, 5),
        (&pizza, &jeans, 100),
        (&shoes, &jeans, 35),
        (&tshirt, &jeans, 69),
        (&tshirt, &joes, 24),
    ] {
        ledger.stock(product.id, warehouse.id, quantity).await?;
    }

    tracing::info!("demo data loaded");
    Ok(true)
}
