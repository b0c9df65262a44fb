use async_trait::async_trait;
use common::{
    Product, ProductDraft, ProductId, ProductStock, ProductSummary, StockEntry, StockMovement,
    Warehouse, WarehouseDraft, WarehouseId, WarehouseStock,
};
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{InventoryStore, Result, StoreError};

/// PostgreSQL-backed inventory store.
#[derive(Clone)]
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    /// Creates a new PostgreSQL inventory store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_product(row: &PgRow) -> Result<Product> {
        Ok(Product {
            id: ProductId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
        })
    }

    fn row_to_warehouse(row: &PgRow) -> Result<Warehouse> {
        Ok(Warehouse {
            id: WarehouseId::new(row.try_get("id")?),
            name: row.try_get("name")?,
            address: row.try_get("address")?,
        })
    }

    fn row_to_entry(row: &PgRow) -> Result<StockEntry> {
        Ok(StockEntry {
            product_id: ProductId::new(row.try_get("product_id")?),
            warehouse_id: WarehouseId::new(row.try_get("warehouse_id")?),
            in_stock_quantity: row.try_get("in_stock_quantity")?,
            back_order_quantity: row.try_get("back_order_quantity")?,
        })
    }
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn insert_product(&self, draft: ProductDraft) -> Result<Product> {
        let row = sqlx::query(
            "INSERT INTO products (name, description) VALUES ($1, $2) RETURNING id, name, description",
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_product(&row)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>> {
        let row = sqlx::query("SELECT id, name, description FROM products WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_product).transpose()
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let rows = sqlx::query("SELECT id, name, description FROM products ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_product).collect()
    }

    async fn update_product(&self, id: ProductId, draft: ProductDraft) -> Result<Product> {
        let row = sqlx::query(
            r#"
            UPDATE products SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id.as_i64())
        .bind(&draft.name)
        .bind(&draft.description)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::ProductNotFound(id))?;

        Self::row_to_product(&row)
    }

    async fn delete_product(&self, id: ProductId) -> Result<Product> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM stock_entries WHERE product_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        // dropping the transaction on the error path rolls the cascade back
        let row = sqlx::query("DELETE FROM products WHERE id = $1 RETURNING id, name, description")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::ProductNotFound(id))?;

        tx.commit().await?;
        Self::row_to_product(&row)
    }

    async fn insert_warehouse(&self, draft: WarehouseDraft) -> Result<Warehouse> {
        let row = sqlx::query(
            "INSERT INTO warehouses (name, address) VALUES ($1, $2) RETURNING id, name, address",
        )
        .bind(&draft.name)
        .bind(&draft.address)
        .fetch_one(&self.pool)
        .await?;

        Self::row_to_warehouse(&row)
    }

    async fn get_warehouse(&self, id: WarehouseId) -> Result<Option<Warehouse>> {
        let row = sqlx::query("SELECT id, name, address FROM warehouses WHERE id = $1")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_warehouse).transpose()
    }

    async fn list_warehouses(&self) -> Result<Vec<Warehouse>> {
        let rows = sqlx::query("SELECT id, name, address FROM warehouses ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(Self::row_to_warehouse).collect()
    }

    async fn update_warehouse(&self, id: WarehouseId, draft: WarehouseDraft) -> Result<Warehouse> {
        let row = sqlx::query(
            r#"
            UPDATE warehouses SET name = $2, address = $3
            WHERE id = $1
            RETURNING id, name, address
            "#,
        )
        .bind(id.as_i64())
        .bind(&draft.name)
        .bind(&draft.address)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::WarehouseNotFound(id))?;

        Self::row_to_warehouse(&row)
    }

    async fn delete_warehouse(&self, id: WarehouseId) -> Result<Warehouse> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM stock_entries WHERE warehouse_id = $1")
            .bind(id.as_i64())
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query("DELETE FROM warehouses WHERE id = $1 RETURNING id, name, address")
            .bind(id.as_i64())
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(StoreError::WarehouseNotFound(id))?;

        tx.commit().await?;
        Self::row_to_warehouse(&row)
    }

    async fn get_stock_entry(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
    ) -> Result<Option<StockEntry>> {
        let row = sqlx::query(
            r#"
            SELECT product_id, warehouse_id, in_stock_quantity, back_order_quantity
            FROM stock_entries
            WHERE product_id = $1 AND warehouse_id = $2
            "#,
        )
        .bind(product_id.as_i64())
        .bind(warehouse_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn apply_movement(
        &self,
        product_id: ProductId,
        warehouse_id: WarehouseId,
        movement: StockMovement,
    ) -> Result<StockEntry> {
        let mut tx = self.pool.begin().await?;

        if movement.creates_entry() {
            sqlx::query(
                r#"
                INSERT INTO stock_entries (product_id, warehouse_id)
                VALUES ($1, $2)
                ON CONFLICT (product_id, warehouse_id) DO NOTHING
                "#,
            )
            .bind(product_id.as_i64())
            .bind(warehouse_id.as_i64())
            .execute(&mut *tx)
            .await?;
        }

        // Lock the row so concurrent movements on the pair serialize
        let row = sqlx::query(
            r#"
            SELECT product_id, warehouse_id, in_stock_quantity, back_order_quantity
            FROM stock_entries
            WHERE product_id = $1 AND warehouse_id = $2
            FOR UPDATE
            "#,
        )
        .bind(product_id.as_i64())
        .bind(warehouse_id.as_i64())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::StockEntryNotFound {
            product_id,
            warehouse_id,
        })?;

        let next = Self::row_to_entry(&row)?.apply(movement)?;

        sqlx::query(
            r#"
            UPDATE stock_entries
            SET in_stock_quantity = $3, back_order_quantity = $4
            WHERE product_id = $1 AND warehouse_id = $2
            "#,
        )
        .bind(product_id.as_i64())
        .bind(warehouse_id.as_i64())
        .bind(next.in_stock_quantity)
        .bind(next.back_order_quantity)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(next)
    }

    async fn stock_for_product(&self, product_id: ProductId) -> Result<Vec<WarehouseStock>> {
        let rows = sqlx::query(
            r#"
            SELECT w.id, w.name, w.address, s.in_stock_quantity, s.back_order_quantity
            FROM stock_entries s
            JOIN warehouses w ON w.id = s.warehouse_id
            WHERE s.product_id = $1
            ORDER BY w.id ASC
            "#,
        )
        .bind(product_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<WarehouseStock> {
                Ok(WarehouseStock {
                    warehouse: Self::row_to_warehouse(row)?,
                    in_stock_quantity: row.try_get("in_stock_quantity")?,
                    back_order_quantity: row.try_get("back_order_quantity")?,
                })
            })
            .collect()
    }

    async fn stock_in_warehouse(&self, warehouse_id: WarehouseId) -> Result<Vec<ProductStock>> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description, s.in_stock_quantity, s.back_order_quantity
            FROM stock_entries s
            JOIN products p ON p.id = s.product_id
            WHERE s.warehouse_id = $1
            ORDER BY p.id ASC
            "#,
        )
        .bind(warehouse_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ProductStock> {
                Ok(ProductStock {
                    product: Self::row_to_product(row)?,
                    in_stock_quantity: row.try_get("in_stock_quantity")?,
                    back_order_quantity: row.try_get("back_order_quantity")?,
                })
            })
            .collect()
    }

    async fn stock_summary(&self) -> Result<Vec<ProductSummary>> {
        // SUM over BIGINT yields NUMERIC; totals saturate at i64::MAX like the
        // in-memory store before the cast back
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description,
                   LEAST(SUM(s.in_stock_quantity), 9223372036854775807)::BIGINT
                       AS in_stock_quantity,
                   LEAST(SUM(s.back_order_quantity), 9223372036854775807)::BIGINT
                       AS back_order_quantity
            FROM stock_entries s
            JOIN products p ON p.id = s.product_id
            GROUP BY p.id, p.name, p.description
            ORDER BY p.id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| -> Result<ProductSummary> {
                Ok(ProductSummary {
                    product_id: ProductId::new(row.try_get("id")?),
                    name: row.try_get("name")?,
                    description: row.try_get("description")?,
                    in_stock_quantity: row.try_get("in_stock_quantity")?,
                    back_order_quantity: row.try_get("back_order_quantity")?,
                })
            })
            .collect()
    }
}
