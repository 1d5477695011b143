//! Repositorio de vehículos
//!
//! Colaborador de persistencia: CRUD plano sobre la tabla `vehicles`,
//! clave primaria el id opaco asignado por el contenedor de estado.

use sqlx::PgPool;
use std::str::FromStr;

use crate::models::{Vehicle, VehicleStatus, VehicleType};
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, sqlx::FromRow)]
struct VehicleRow {
    id: String,
    make: String,
    model: String,
    year: i32,
    license_plate: String,
    status: String,
    fuel_level: f64,
    mileage: f64,
    fuel_efficiency: f64,
    vehicle_type: String,
    last_service: String,
    next_service: Option<String>,
    insurance_expiry: String,
    registration_expiry: String,
    assigned_driver_id: Option<String>,
}

impl VehicleRow {
    fn into_model(self) -> AppResult<Vehicle> {
        let status = VehicleStatus::from_str(&self.status).map_err(AppError::Database)?;
        let vehicle_type = VehicleType::from_str(&self.vehicle_type).map_err(AppError::Database)?;
        Ok(Vehicle {
            id: self.id,
            make: self.make,
            model: self.model,
            year: self.year,
            license_plate: self.license_plate,
            status,
            fuel_level: self.fuel_level,
            mileage: self.mileage,
            fuel_efficiency: self.fuel_efficiency,
            vehicle_type,
            last_service: self.last_service,
            next_service: self.next_service,
            insurance_expiry: self.insurance_expiry,
            registration_expiry: self.registration_expiry,
            assigned_driver_id: self.assigned_driver_id,
        })
    }
}

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Vehicle>> {
        let rows = sqlx::query_as::<_, VehicleRow>("SELECT * FROM vehicles ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error listing vehicles: {}", e)))?;

        rows.into_iter().map(VehicleRow::into_model).collect()
    }

    pub async fn create(&self, vehicle: &Vehicle) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO vehicles (id, make, model, year, license_plate, status, fuel_level, mileage, fuel_efficiency, vehicle_type, last_service, next_service, insurance_expiry, registration_expiry, assigned_driver_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.license_plate)
        .bind(vehicle.status.to_string())
        .bind(vehicle.fuel_level)
        .bind(vehicle.mileage)
        .bind(vehicle.fuel_efficiency)
        .bind(vehicle.vehicle_type.to_string())
        .bind(&vehicle.last_service)
        .bind(&vehicle.next_service)
        .bind(&vehicle.insurance_expiry)
        .bind(&vehicle.registration_expiry)
        .bind(&vehicle.assigned_driver_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error creating vehicle: {}", e)))?;

        Ok(())
    }

    pub async fn update(&self, vehicle: &Vehicle) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE vehicles
            SET make = $2, model = $3, year = $4, license_plate = $5, status = $6, fuel_level = $7, mileage = $8, fuel_efficiency = $9, vehicle_type = $10, last_service = $11, next_service = $12, insurance_expiry = $13, registration_expiry = $14, assigned_driver_id = $15
            WHERE id = $1
            "#,
        )
        .bind(&vehicle.id)
        .bind(&vehicle.make)
        .bind(&vehicle.model)
        .bind(vehicle.year)
        .bind(&vehicle.license_plate)
        .bind(vehicle.status.to_string())
        .bind(vehicle.fuel_level)
        .bind(vehicle.mileage)
        .bind(vehicle.fuel_efficiency)
        .bind(vehicle.vehicle_type.to_string())
        .bind(&vehicle.last_service)
        .bind(&vehicle.next_service)
        .bind(&vehicle.insurance_expiry)
        .bind(&vehicle.registration_expiry)
        .bind(&vehicle.assigned_driver_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Database(format!("Error updating vehicle: {}", e)))?;

        Ok(())
    }

    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Error deleting vehicle: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
