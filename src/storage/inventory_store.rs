//! Inventory and sales persistence

use crate::model::inventory::{InventoryItem, InventoryStatus, ProductCategory, Sale};
use sqlx::{PgPool, Row};
use tracing::info;

/// Creates the inventory and sales tables
pub async fn initialize_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS inventory_items (
            id VARCHAR(64) PRIMARY KEY,
            sku VARCHAR(255) NOT NULL,
            name VARCHAR(500) NOT NULL,
            brand VARCHAR(255),
            category VARCHAR(32) NOT NULL DEFAULT 'other',
            size VARCHAR(32),
            cost_basis DOUBLE PRECISION NOT NULL,
            cost_currency VARCHAR(3) NOT NULL,
            acquired_at TIMESTAMPTZ NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'in_stock',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            id VARCHAR(64) PRIMARY KEY,
            inventory_id VARCHAR(64) NOT NULL REFERENCES inventory_items(id),
            platform VARCHAR(32) NOT NULL,
            gross_amount DOUBLE PRECISION NOT NULL,
            fees DOUBLE PRECISION NOT NULL DEFAULT 0,
            net_amount DOUBLE PRECISION NOT NULL,
            currency VARCHAR(3) NOT NULL,
            sold_at TIMESTAMPTZ NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    let indexes = [
        "CREATE INDEX IF NOT EXISTS idx_inventory_items_sku ON inventory_items(sku)",
        "CREATE INDEX IF NOT EXISTS idx_inventory_items_status ON inventory_items(status)",
        "CREATE INDEX IF NOT EXISTS idx_sales_inventory_id ON sales(inventory_id)",
        "CREATE INDEX IF NOT EXISTS idx_sales_sold_at ON sales(sold_at DESC)",
    ];

    for index_sql in indexes {
        sqlx::query(index_sql).execute(pool).await?;
    }

    Ok(())
}

/// Store for inventory items and sales
pub struct InventoryStore {
    pool: PgPool,
}

impl InventoryStore {
    /// Creates a new inventory store
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts or updates an inventory item
    pub async fn upsert_item(&self, item: &InventoryItem) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO inventory_items
                (id, sku, name, brand, category, size, cost_basis, cost_currency, acquired_at, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                sku = EXCLUDED.sku,
                name = EXCLUDED.name,
                brand = EXCLUDED.brand,
                category = EXCLUDED.category,
                size = EXCLUDED.size,
                cost_basis = EXCLUDED.cost_basis,
                cost_currency = EXCLUDED.cost_currency,
                acquired_at = EXCLUDED.acquired_at,
                status = EXCLUDED.status,
                updated_at = NOW()
            "#,
        )
        .bind(&item.id)
        .bind(&item.sku)
        .bind(&item.name)
        .bind(&item.brand)
        .bind(item.category.as_str())
        .bind(&item.size)
        .bind(item.cost_basis)
        .bind(&item.cost_currency)
        .bind(item.acquired_at)
        .bind(status_str(item.status))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetches an inventory item by id
    pub async fn get_item(&self, id: &str) -> Result<Option<InventoryItem>, sqlx::Error> {
        let row = sqlx::query(
            r#"
            SELECT id, sku, name, brand, category, size, cost_basis, cost_currency,
                   acquired_at, status
            FROM inventory_items WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_item).transpose()?)
    }

    /// Lists items in a given status
    pub async fn list_items_by_status(
        &self,
        status: InventoryStatus,
    ) -> Result<Vec<InventoryItem>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, sku, name, brand, category, size, cost_basis, cost_currency,
                   acquired_at, status
            FROM inventory_items WHERE status = $1
            ORDER BY acquired_at
            "#,
        )
        .bind(status_str(status))
        .fetch_all(&self.pool)
        .await?;

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(row_to_item(row)?);
        }
        info!("Loaded {} inventory items", items.len());
        Ok(items)
    }

    /// Inserts or updates a sale
    pub async fn upsert_sale(&self, sale: &Sale) -> Result<(), sqlx::Error> {
        sqlx::query(
            r#"
            INSERT INTO sales
                (id, inventory_id, platform, gross_amount, fees, net_amount, currency, sold_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                gross_amount = EXCLUDED.gross_amount,
                fees = EXCLUDED.fees,
                net_amount = EXCLUDED.net_amount,
                currency = EXCLUDED.currency,
                sold_at = EXCLUDED.sold_at
            "#,
        )
        .bind(&sale.id)
        .bind(&sale.inventory_id)
        .bind(&sale.platform)
        .bind(sale.gross_amount)
        .bind(sale.fees)
        .bind(sale.net_amount)
        .bind(&sale.currency)
        .bind(sale.sold_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all sales, most recent first
    pub async fn list_sales(&self) -> Result<Vec<Sale>, sqlx::Error> {
        let rows = sqlx::query(
            r#"
            SELECT id, inventory_id, platform, gross_amount, fees, net_amount, currency, sold_at
            FROM sales ORDER BY sold_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Sale {
                id: row.get("id"),
                inventory_id: row.get("inventory_id"),
                platform: row.get("platform"),
                gross_amount: row.get("gross_amount"),
                fees: row.get("fees"),
                net_amount: row.get("net_amount"),
                currency: row.get("currency"),
                sold_at: row.get("sold_at"),
            })
            .collect())
    }
}

fn status_str(status: InventoryStatus) -> &'static str {
    match status {
        InventoryStatus::InStock => "in_stock",
        InventoryStatus::Listed => "listed",
        InventoryStatus::Sold => "sold",
    }
}

fn row_to_item(row: sqlx::postgres::PgRow) -> Result<InventoryItem, sqlx::Error> {
    let status: String = row.get("status");
    let category: String = row.get("category");

    Ok(InventoryItem {
        id: row.get("id"),
        sku: row.get("sku"),
        name: row.get("name"),
        brand: row.get("brand"),
        category: ProductCategory::from_str_or_other(&category),
        size: row.get("size"),
        cost_basis: row.get("cost_basis"),
        cost_currency: row.get("cost_currency"),
        acquired_at: row.get("acquired_at"),
        status: match status.as_str() {
            "listed" => InventoryStatus::Listed,
            "sold" => InventoryStatus::Sold,
            _ => InventoryStatus::InStock,
        },
    })
}
