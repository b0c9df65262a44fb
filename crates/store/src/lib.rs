//! Persistence for the inventory service.
//!
//! [`InventoryStore`] is the storage abstraction injected into every domain
//! service. Two implementations share its contract: [`PostgresInventoryStore`]
//! for production and [`InMemoryInventoryStore`] for tests and local runs.

pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use error::{Result, StoreError, WAREHOUSE_ADDRESS_KEY};
pub use memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;
pub use store::InventoryStore;
