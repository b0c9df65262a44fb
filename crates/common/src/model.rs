//! Catalog entities and the joined stock views served to clients.

use serde::{Deserialize, Serialize};

use crate::{ProductId, WarehouseId};

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
}

/// Fields supplied when creating or updating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A warehouse. Addresses are unique across warehouses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub address: String,
}

/// Fields supplied when creating or updating a warehouse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarehouseDraft {
    pub name: String,
    pub address: String,
}

impl WarehouseDraft {
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }
}

/// Stock held for one product in one warehouse, joined with the warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseStock {
    pub warehouse: Warehouse,
    pub in_stock_quantity: i64,
    pub back_order_quantity: i64,
}

/// Stock held for one product in one warehouse, joined with the product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStock {
    pub product: Product,
    pub in_stock_quantity: i64,
    pub back_order_quantity: i64,
}

/// Quantities for one product summed across every warehouse holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub name: String,
    pub description: String,
    pub in_stock_quantity: i64,
    pub back_order_quantity: i64,
}
