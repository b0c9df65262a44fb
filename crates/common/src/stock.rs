//! Stock ledger arithmetic.
//!
//! A [`StockEntry`] holds the in-stock and back-ordered counters for one
//! (product, warehouse) pair. Every change goes through [`StockEntry::apply`],
//! a pure transition that either yields the next entry or rejects the
//! movement without touching the current one. Stores run it inside their
//! own locking so each movement is a single read-modify-write.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{ProductId, WarehouseId};

/// Counters for one product in one warehouse. Both are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockEntry {
    pub product_id: ProductId,
    pub warehouse_id: WarehouseId,
    pub in_stock_quantity: i64,
    pub back_order_quantity: i64,
}

impl StockEntry {
    /// An entry for a pair seen for the first time.
    pub fn empty(product_id: ProductId, warehouse_id: WarehouseId) -> Self {
        Self {
            product_id,
            warehouse_id,
            in_stock_quantity: 0,
            back_order_quantity: 0,
        }
    }

    /// Applies a movement and returns the resulting entry.
    pub fn apply(&self, movement: StockMovement) -> Result<StockEntry, StockError> {
        let quantity = i64::from(movement.quantity());
        let mut next = *self;

        match movement {
            StockMovement::Order(_) => {
                next.back_order_quantity = self
                    .back_order_quantity
                    .checked_add(quantity)
                    .ok_or(StockError::QuantityOverflow)?;
            }
            StockMovement::Stock(_) => {
                next.in_stock_quantity = self
                    .in_stock_quantity
                    .checked_add(quantity)
                    .ok_or(StockError::QuantityOverflow)?;
                // incoming stock pays down the back order first
                next.back_order_quantity = (self.back_order_quantity - quantity).max(0);
            }
            StockMovement::Fulfill(requested) => {
                if self.in_stock_quantity < quantity {
                    return Err(StockError::InsufficientStock {
                        available: self.in_stock_quantity,
                        requested,
                    });
                }
                next.in_stock_quantity = self.in_stock_quantity - quantity;
            }
        }

        Ok(next)
    }
}

/// A change requested against a stock entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockMovement {
    /// Quantity promised to the warehouse; grows the back order.
    Order(u32),
    /// Quantity received into the warehouse.
    Stock(u32),
    /// Quantity shipped out of the warehouse.
    Fulfill(u32),
}

impl StockMovement {
    pub fn quantity(&self) -> u32 {
        match self {
            StockMovement::Order(q) | StockMovement::Stock(q) | StockMovement::Fulfill(q) => *q,
        }
    }

    /// Short name used in logs and metric labels.
    pub fn kind(&self) -> &'static str {
        match self {
            StockMovement::Order(_) => "order",
            StockMovement::Stock(_) => "stock",
            StockMovement::Fulfill(_) => "fulfill",
        }
    }

    /// Whether applying this movement to an unknown pair creates its entry.
    ///
    /// Fulfilling requires stock that was recorded before, so it never does.
    pub fn creates_entry(&self) -> bool {
        !matches!(self, StockMovement::Fulfill(_))
    }
}

impl std::fmt::Display for StockMovement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.kind(), self.quantity())
    }
}

/// Movements rejected by the ledger arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StockError {
    /// Fulfilling would take the in-stock quantity below zero.
    #[error("Not enough products in stock to fulfill order: {available} available, {requested} requested")]
    InsufficientStock { available: i64, requested: u32 },

    /// A counter would exceed the representable range.
    #[error("Stock quantity overflow")]
    QuantityOverflow,
}
