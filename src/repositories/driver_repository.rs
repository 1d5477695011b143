//! Repositorio de conductores

use sqlx::PgPool;
use std::str::FromStr;

use crate::models::{Driver, DriverStatus};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, sqlx::FromRow)]
struct DriverRow {
    id: String,
    name: String,
    license_number: String,
    license_expiry: String,
    contact_number: String,
    email: String,
    status: String,
    assigned_vehicle_id: Option<String>,
    rating: f64,
    total_trips: i32,
    join_date: String,
    emergency_contact: String,
}

impl DriverRow {
    fn into_model(self) -> AppResult<Driver> {
        let status = DriverStatus::from_str(&self.status).map_err(AppError::Database)?;
        Ok(Driver {
            id: self.id,
            name: self.name,
            license_number: self.license_number,
            license_expiry: self.license_expiry,
            contact_number: self.contact_number,
            email: self.email,
            status,
            assigned_vehicle_id: self.assigned_vehicle_id,
            rating: self.rating,
            total_trips: self.total_trips,
            join_date: self.join_date,
            emergency_contact: self.emergency_contact,
        })
    }
}

pub struct DriverRepository {
    pool: PgPool,
}

impl DriverRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Driver>> {
        let rows = sqlx::query_as::<_, DriverRow>("SELECT * FROM drivers ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing drivers: {}", e)))?;

        rows.into_iter().map(DriverRow::into_model).collect()
    }

    pub async fn create(&self, driver: &Driver) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO drivers (id, name, license_number, license_expiry, contact_number, email, status, assigned_vehicle_id, rating, total_trips, join_date, emergency_contact)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&driver.id)
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(&driver.license_expiry)
        .bind(&driver.contact_number)
        .bind(&driver.email)
        .bind(driver.status.to_string())
        .bind(&driver.assigned_vehicle_id)
        .bind(driver.rating)
        .bind(driver.total_trips)
        .bind(&driver.join_date)
        .bind(&driver.emergency_contact)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating driver: {}", e)))?;

        Ok(())
    }

    pub async fn update(&self, driver: &Driver) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE drivers
            SET name = $2, license_number = $3, license_expiry = $4, contact_number = $5, email = $6, status = $7, assigned_vehicle_id = $8, rating = $9, total_trips = $10, join_date = $11, emergency_contact = $12
            WHERE id = $1
            "#,
        )
        .bind(&driver.id)
        .bind(&driver.name)
        .bind(&driver.license_number)
        .bind(&driver.license_expiry)
        .bind(&driver.contact_number)
        .bind(&driver.email)
        .bind(driver.status.to_string())
        .bind(&driver.assigned_vehicle_id)
        .bind(driver.rating)
        .bind(driver.total_trips)
        .bind(&driver.join_date)
        .bind(&driver.emergency_contact)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating driver: {}", e)))?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM drivers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting driver: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
