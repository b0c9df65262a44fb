//! Integration tests for the catalog, registry and ledger services.
//!
//! These run the services against the in-memory store and cover the full
//! stock lifecycle, cascading deletes and address uniqueness.

use common::{ProductId, StockMovement, WarehouseId};
use domain::{DomainError, ProductCatalog, StockLedger, WarehouseRegistry, load_demo_data};
use store::InMemoryInventoryStore;

struct Services {
    catalog: ProductCatalog<InMemoryInventoryStore>,
    registry: WarehouseRegistry<InMemoryInventoryStore>,
    ledger: StockLedger<InMemoryInventoryStore>,
    store: InMemoryInventoryStore,
}

/// Helper to wire all services to one store
fn create_services() -> Services {
    let store = InMemoryInventoryStore::new();
    Services {
        catalog: ProductCatalog::new(store.clone()),
        registry: WarehouseRegistry::new(store.clone()),
        ledger: StockLedger::new(store.clone()),
        store,
    }
}

async fn pizza_in_w1(s: &Services) -> (ProductId, WarehouseId) {
    let pizza = s.catalog.create("Pizza", "Tasty Frozen pizza").await.unwrap();
    let w1 = s.registry.create("W1", "245 Rue Laval").await.unwrap();
    (pizza.id, w1.id)
}

mod stock_lifecycle {
    use super::*;

    #[tokio::test]
    async fn apply_matches_named_movements() {
        let s = create_services();
        let (p, w) = pizza_in_w1(&s).await;

        let e = s.ledger.apply(p, w, StockMovement::Order(4)).await.unwrap();
        assert_eq!((e.in_stock_quantity, e.back_order_quantity), (0, 4));

        let e = s.ledger.apply(p, w, StockMovement::Stock(6)).await.unwrap();
        assert_eq!((e.in_stock_quantity, e.back_order_quantity), (6, 0));

        let err = s
            .ledger
            .apply(p, w, StockMovement::Fulfill(7))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InsufficientStock { .. }));
        assert_eq!(s.ledger.get(p, w).await.unwrap().unwrap().in_stock_quantity, 6);
    }

    #[tokio::test]
    async fn pizza_scenario() {
        let s = create_services();
        let (p, w) = pizza_in_w1(&s).await;

        let e = s.ledger.stock(p, w, 5).await.unwrap();
        assert_eq!((e.in_stock_quantity, e.back_order_quantity), (5, 0));

        let e = s.ledger.order(p, w, 3).await.unwrap();
        assert_eq!((e.in_stock_quantity, e.back_order_quantity), (5, 3));

        let e = s.ledger.stock(p, w, 2).await.unwrap();
        assert_eq!((e.in_stock_quantity, e.back_order_quantity), (7, 1));

        let err = s.ledger.fulfill(p, w, 10).await.unwrap_err();
        assert!(matches!(
            err,
            DomainError::InsufficientStock {
                available: 7,
                requested: 10
            }
        ));

        let e = s.ledger.get(p, w).await.unwrap().unwrap();
        assert_eq!((e.in_stock_quantity, e.back_order_quantity), (7, 1));
    }

    #[tokio::test]
    async fn fulfill_on_untouched_pair_is_not_found() {
        let s = create_services();
        let (p, w) = pizza_in_w1(&s).await;

        let err = s.ledger.fulfill(p, w, 1).await.unwrap_err();
        assert!(matches!(err, DomainError::StockEntryNotFound { .. }));
        assert!(s.ledger.get(p, w).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn stock_then_fulfill_restores_in_stock() {
        let s = create_services();
        let (p, w) = pizza_in_w1(&s).await;
        s.ledger.stock(p, w, 4).await.unwrap();
        s.ledger.order(p, w, 20).await.unwrap();

        let before = s.ledger.get(p, w).await.unwrap().unwrap();
        s.ledger.stock(p, w, 6).await.unwrap();
        let after = s.ledger.fulfill(p, w, 6).await.unwrap();

        assert_eq!(after.in_stock_quantity, before.in_stock_quantity);
        assert_eq!(after.back_order_quantity, before.back_order_quantity - 6);
    }

    #[tokio::test]
    async fn zero_quantity_movements_create_empty_entry() {
        let s = create_services();
        let (p, w) = pizza_in_w1(&s).await;

        let e = s.ledger.order(p, w, 0).await.unwrap();
        assert_eq!((e.in_stock_quantity, e.back_order_quantity), (0, 0));

        let e = s.ledger.fulfill(p, w, 0).await.unwrap();
        assert_eq!(e.in_stock_quantity, 0);
    }
}

mod catalog {
    use super::*;

    #[tokio::test]
    async fn update_unknown_product_is_not_found() {
        let s = create_services();
        let err = s
            .catalog
            .update(ProductId::new(12), "x", "y")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_stock_everywhere() {
        let s = create_services();
        let (p, w) = pizza_in_w1(&s).await;
        let w2 = s.registry.create("W2", "142 Bay Street").await.unwrap();
        s.ledger.stock(p, w, 1).await.unwrap();
        s.ledger.order(p, w2.id, 1).await.unwrap();

        let deleted = s.catalog.delete(p).await.unwrap();
        assert_eq!(deleted.name, "Pizza");
        assert_eq!(s.store.stock_entry_count().await, 0);
        assert!(s.registry.products_in(w).await.unwrap().is_empty());
        assert!(s.catalog.summary().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_twice_is_not_found() {
        let s = create_services();
        let (p, _) = pizza_in_w1(&s).await;
        s.catalog.delete(p).await.unwrap();

        let err = s.catalog.delete(p).await.unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(id) if id == p));
    }

    #[tokio::test]
    async fn detail_lists_each_warehouse() {
        let s = create_services();
        let (p, w) = pizza_in_w1(&s).await;
        let w2 = s.registry.create("W2", "142 Bay Street").await.unwrap();
        s.ledger.stock(p, w, 5).await.unwrap();
        s.ledger.order(p, w2.id, 2).await.unwrap();

        let detail = s.catalog.detail(p).await.unwrap();
        assert_eq!(detail.len(), 2);
        assert_eq!(detail[0].warehouse.id, w);
        assert_eq!(detail[0].in_stock_quantity, 5);
        assert_eq!(detail[1].warehouse.name, "W2");
        assert_eq!(detail[1].back_order_quantity, 2);
    }

    #[tokio::test]
    async fn detail_of_unknown_product_is_not_found() {
        let s = create_services();
        let err = s.catalog.detail(ProductId::new(5)).await.unwrap_err();
        assert!(matches!(err, DomainError::ProductNotFound(_)));
    }
}

mod registry {
    use super::*;

    #[tokio::test]
    async fn duplicate_address_leaves_first_warehouse_alone() {
        let s = create_services();
        let first = s.registry.create("W1", "245 Rue Laval").await.unwrap();

        let err = s
            .registry
            .create("Other", "245 Rue Laval")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateAddress(ref a) if a == "245 Rue Laval"));
        assert_eq!(err.to_string(), "Warehouse address: 245 Rue Laval duplicated");

        let warehouses = s.registry.list().await.unwrap();
        assert_eq!(warehouses, vec![first]);
    }

    #[tokio::test]
    async fn update_onto_taken_address_is_duplicate() {
        let s = create_services();
        s.registry.create("W1", "a").await.unwrap();
        let w2 = s.registry.create("W2", "b").await.unwrap();

        let err = s.registry.update(w2.id, "W2", "a").await.unwrap_err();
        assert!(matches!(err, DomainError::DuplicateAddress(_)));
    }

    #[tokio::test]
    async fn update_unknown_warehouse_is_not_found() {
        let s = create_services();
        let err = s
            .registry
            .update(WarehouseId::new(8), "x", "y")
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::WarehouseNotFound(_)));
    }

    #[tokio::test]
    async fn delete_removes_its_stock_entries() {
        let s = create_services();
        let (p, w) = pizza_in_w1(&s).await;
        s.ledger.stock(p, w, 3).await.unwrap();

        s.registry.delete(w).await.unwrap();
        assert!(s.ledger.get(p, w).await.unwrap().is_none());
        assert!(s.catalog.detail(p).await.unwrap().is_empty());

        let err = s.registry.products_in(w).await.unwrap_err();
        assert!(matches!(err, DomainError::WarehouseNotFound(_)));
    }
}

mod demo_data {
    use super::*;

    #[tokio::test]
    async fn loads_once_into_empty_store() {
        let s = create_services();

        assert!(load_demo_data(&s.catalog, &s.registry, &s.ledger).await.unwrap());
        assert!(!load_demo_data(&s.catalog, &s.registry, &s.ledger).await.unwrap());

        assert_eq!(s.catalog.list().await.unwrap().len(), 3);
        assert_eq!(s.registry.list().await.unwrap().len(), 2);

        let summary = s.catalog.summary().await.unwrap();
        let pizza = summary.iter().find(|p| p.name == "Pizza").unwrap();
        assert_eq!(pizza.in_stock_quantity, 105);
        let shirts = summary.iter().find(|p| p.name == "T-shirt").unwrap();
        assert_eq!(shirts.in_stock_quantity, 93);
    }
}
