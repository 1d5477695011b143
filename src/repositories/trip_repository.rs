//! Repositorio de viajes

use sqlx::PgPool;
use std::str::FromStr;

use crate::models::{Trip, TripStatus};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, sqlx::FromRow)]
struct TripRow {
    id: String,
    vehicle_id: String,
    driver_id: String,
    start_time: String,
    end_time: Option<String>,
    start_location: String,
    end_location: String,
    distance: f64,
    status: String,
    purpose: String,
    fuel_consumed: Option<f64>,
    notes: Option<String>,
}

impl TripRow {
    fn into_model(self) -> AppResult<Trip> {
        let status = TripStatus::from_str(&self.status).map_err(AppError::Database)?;
        Ok(Trip {
            id: self.id,
            vehicle_id: self.vehicle_id,
            driver_id: self.driver_id,
            start_time: self.start_time,
            end_time: self.end_time,
            start_location: self.start_location,
            end_location: self.end_location,
            distance: self.distance,
            status,
            purpose: self.purpose,
            fuel_consumed: self.fuel_consumed,
            notes: self.notes,
        })
    }
}

pub struct TripRepository {
    pool: PgPool,
}

impl TripRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Trip>> {
        let rows = sqlx::query_as::<_, TripRow>("SELECT * FROM trips ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing trips: {}", e)))?;

        rows.into_iter().map(TripRow::into_model).collect()
    }

    pub async fn create(&self, trip: &Trip) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO trips (id, vehicle_id, driver_id, start_time, end_time, start_location, end_location, distance, status, purpose, fuel_consumed, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(&trip.id)
        .bind(&trip.vehicle_id)
        .bind(&trip.driver_id)
        .bind(&trip.start_time)
        .bind(&trip.end_time)
        .bind(&trip.start_location)
        .bind(&trip.end_location)
        .bind(trip.distance)
        .bind(trip.status.to_string())
        .bind(&trip.purpose)
        .bind(trip.fuel_consumed)
        .bind(&trip.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating trip: {}", e)))?;

        Ok(())
    }

    pub async fn update(&self, trip: &Trip) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE trips
            SET vehicle_id = $2, driver_id = $3, start_time = $4, end_time = $5, start_location = $6, end_location = $7, distance = $8, status = $9, purpose = $10, fuel_consumed = $11, notes = $12
            WHERE id = $1
            "#,
        )
        .bind(&trip.id)
        .bind(&trip.vehicle_id)
        .bind(&trip.driver_id)
        .bind(&trip.start_time)
        .bind(&trip.end_time)
        .bind(&trip.start_location)
        .bind(&trip.end_location)
        .bind(trip.distance)
        .bind(trip.status.to_string())
        .bind(&trip.purpose)
        .bind(trip.fuel_consumed)
        .bind(&trip.notes)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating trip: {}", e)))?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM trips WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting trip: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
