//! Repositorio de registros de mantenimiento
//!
//! `parts_used` se guarda como JSONB; el resto de columnas son planas.

use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::PgPool;
use std::str::FromStr;

use crate::models::{InventoryItem, MaintenanceRecord, MaintenanceStatus, MaintenanceType};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, sqlx::FromRow)]
struct MaintenanceRow {
    id: String,
    vehicle_id: String,
    date: String,
    maintenance_type: String,
    description: String,
    status: String,
    cost: Decimal,
    technician_name: String,
    parts_used: Json<Vec<InventoryItem>>,
    notes: Option<String>,
}

impl MaintenanceRow {
    fn into_model(self) -> AppResult<MaintenanceRecord> {
        let status = MaintenanceStatus::from_str(&self.status).map_err(AppError::Database)?;
        let maintenance_type =
            MaintenanceType::from_str(&self.maintenance_type).map_err(AppError::Database)?;
        Ok(MaintenanceRecord {
            id: self.id,
            vehicle_id: self.vehicle_id,
            date: self.date,
            maintenance_type,
            description: self.description,
            status,
            cost: self.cost,
            technician_name: self.technician_name,
            parts_used: self.parts_used.0,
            notes: self.notes,
        })
    }
}

pub struct MaintenanceRepository {
    pool: PgPool,
}

impl MaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<MaintenanceRecord>> {
        let rows =
            sqlx::query_as::<_, MaintenanceRow>("SELECT * FROM maintenance_records ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| {
                    AppError::Database(format!("Error listing maintenance records: {}", e))
                })?;

        rows.into_iter().map(MaintenanceRow::into_model).collect()
    }

    pub async fn create(&self, record: &MaintenanceRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO maintenance_records (id, vehicle_id, date, maintenance_type, description, status, cost, technician_name, parts_used, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(&record.id)
        .bind(&record.vehicle_id)
        .bind(&record.date)
        .bind(record.maintenance_type.to_string())
        .bind(&record.description)
        .bind(record.status.to_string())
        .bind(record.cost)
        .bind(&record.technician_name)
        .bind(Json(&record.parts_used))
        .bind(&record.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating maintenance record: {}", e)))?;

        Ok(())
    }

    pub async fn update(&self, record: &MaintenanceRecord) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE maintenance_records
            SET vehicle_id = $2, date = $3, maintenance_type = $4, description = $5, status = $6, cost = $7, technician_name = $8, parts_used = $9, notes = $10
            WHERE id = $1
            "#,
        )
        .bind(&record.id)
        .bind(&record.vehicle_id)
        .bind(&record.date)
        .bind(record.maintenance_type.to_string())
        .bind(&record.description)
        .bind(record.status.to_string())
        .bind(record.cost)
        .bind(&record.technician_name)
        .bind(Json(&record.parts_used))
        .bind(&record.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating maintenance record: {}", e)))?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting maintenance record: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
