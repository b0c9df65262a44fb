//! Reports over the stock ledger.
//!
//! Currently a single report: per-product stock totals across all
//! warehouses, downloadable as CSV.

pub mod csv;
pub mod summary;

pub use summary::{SUMMARY_HEADER, SummaryReport};
