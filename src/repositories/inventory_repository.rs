//! Repositorio de inventario
//!
//! El inventario se persiste en cada mutación pero no se consulta al
//! arranque; el contenedor de estado empieza la sesión con inventario vacío.

use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use std::str::FromStr;

use crate::models::{InventoryCategory, InventoryItem};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, sqlx::FromRow)]
struct InventoryRow {
    id: String,
    name: String,
    category: String,
    quantity: i32,
    minimum_quantity: i32,
    unit_price: Decimal,
    location: String,
    supplier: String,
    last_restocked: String,
    compatible_vehicles: Json<Vec<String>>,
}

impl InventoryRow {
    fn into_model(self) -> AppResult<InventoryItem> {
        let category = InventoryCategory::from_str(&self.category).map_err(AppError::Database)?;
        Ok(InventoryItem {
            id: self.id,
            name: self.name,
            category,
            quantity: self.quantity,
            minimum_quantity: self.minimum_quantity,
            unit_price: self.unit_price,
            location: self.location,
            supplier: self.supplier,
            last_restocked: self.last_restocked,
            compatible_vehicles: self.compatible_vehicles.0,
        })
    }
}

pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<InventoryItem>> {
        let rows = sqlx::query_as::<_, InventoryRow>("SELECT * FROM inventory ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing inventory: {}", e)))?;

        rows.into_iter().map(InventoryRow::into_model).collect()
    }

    pub async fn create(&self, item: &InventoryItem) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory (id, name, category, quantity, minimum_quantity, unit_price, location, supplier, last_restocked, compatible_vehicles)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.category.to_string())
        .bind(item.quantity)
        .bind(item.minimum_quantity)
        .bind(item.unit_price)
        .bind(&item.location)
        .bind(&item.supplier)
        .bind(&item.last_restocked)
        .bind(Json(&item.compatible_vehicles))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating inventory item: {}", e)))?;

        Ok(())
    }

    pub async fn update(&self, item: &InventoryItem) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE inventory
            SET name = $2, category = $3, quantity = $4, minimum_quantity = $5, unit_price = $6, location = $7, supplier = $8, last_restocked = $9, compatible_vehicles = $10
            WHERE id = $1
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.category.to_string())
        .bind(item.quantity)
        .bind(item.minimum_quantity)
        .bind(item.unit_price)
        .bind(&item.location)
        .bind(&item.supplier)
        .bind(&item.last_restocked)
        .bind(Json(&item.compatible_vehicles))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating inventory item: {}", e)))?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM inventory WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting inventory item: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
