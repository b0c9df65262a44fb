//! Inventory summary report.

use chrono::{NaiveDate, Utc};
use common::ProductSummary;
use domain::{DomainError, ProductCatalog};
use store::InventoryStore;

use crate::csv::{Cell, CsvWriter};

/// Column labels of the summary download, in order.
pub const SUMMARY_HEADER: [&str; 5] = [
    "Product Id",
    "Product Name",
    "Product Description",
    "In stock quantity",
    "Back Ordered Quantity",
];

/// Stock totals per product as of a given day.
#[derive(Debug, Clone)]
pub struct SummaryReport {
    pub generated_on: NaiveDate,
    pub rows: Vec<ProductSummary>,
}

impl SummaryReport {
    pub fn new(rows: Vec<ProductSummary>, generated_on: NaiveDate) -> Self {
        Self { generated_on, rows }
    }

    /// Builds today's report (UTC) from the catalog.
    #[tracing::instrument(skip(catalog))]
    pub async fn generate<S: InventoryStore>(
        catalog: &ProductCatalog<S>,
    ) -> Result<Self, DomainError> {
        let rows = catalog.summary().await?;
        tracing::debug!(rows = rows.len(), "summary report generated");
        Ok(Self::new(rows, Utc::now().date_naive()))
    }

    /// Renders the report with a header row and one row per product.
    pub fn to_csv(&self) -> String {
        let mut writer = CsvWriter::new();
        writer.write_header(&SUMMARY_HEADER);
        for row in &self.rows {
            writer.write_row(&[
                Cell::Integer(row.product_id.as_i64()),
                Cell::Text(&row.name),
                Cell::Text(&row.description),
                Cell::Integer(row.in_stock_quantity),
                Cell::Integer(row.back_order_quantity),
            ]);
        }
        writer.finish()
    }

    /// Suggested download file name, e.g. `inventory-summary-2024-05-01.csv`.
    pub fn file_name(&self) -> String {
        format!("inventory-summary-{}.csv", self.generated_on.format("%Y-%m-%d"))
    }
}
