use serde::{Deserialize, Serialize};

/// Unique identifier for a product in the catalog.
///
/// Assigned by the store on creation. Wraps the raw database id so that
/// product and warehouse ids cannot be swapped by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Creates a product ID from a raw database id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<ProductId> for i64 {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Unique identifier for a warehouse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WarehouseId(i64);

impl WarehouseId {
    /// Creates a warehouse ID from a raw database id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw database id.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for WarehouseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for WarehouseId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<WarehouseId> for i64 {
    fn from(id: WarehouseId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_preserves_value() {
        let id = ProductId::new(42);
        assert_eq!(id.as_i64(), 42);
        assert_eq!(i64::from(id), 42);
    }

    #[test]
    fn ids_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&ProductId::new(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&WarehouseId::new(3)).unwrap(), "3");

        let id: WarehouseId = serde_json::from_str("12").unwrap();
        assert_eq!(id, WarehouseId::new(12));
    }

    #[test]
    fn ids_order_by_raw_value() {
        let mut ids = vec![ProductId::new(3), ProductId::new(1), ProductId::new(2)];
        ids.sort();
        assert_eq!(ids, vec![ProductId::new(1), ProductId::new(2), ProductId::new(3)]);
    }
}
