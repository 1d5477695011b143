//! DTOs de Vehicle y la respuesta genérica de la API

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Vehicle, VehicleStatus, VehicleType};

/// Request para crear un nuevo vehículo
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(range(min = 1900, max = 2030))]
    pub year: i32,

    #[validate(length(min = 1, max = 20))]
    pub license_plate: String,

    pub vehicle_type: VehicleType,

    pub status: Option<VehicleStatus>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub fuel_level: Option<f64>,

    #[validate(range(min = 0.0))]
    pub mileage: Option<f64>,

    #[validate(range(min = 0.0))]
    pub fuel_efficiency: Option<f64>,

    pub last_service: String,
    pub next_service: Option<String>,
    pub insurance_expiry: String,
    pub registration_expiry: String,
    pub assigned_driver_id: Option<String>,
}

impl CreateVehicleRequest {
    pub fn into_model(self) -> Vehicle {
        Vehicle {
            id: String::new(),
            make: self.make,
            model: self.model,
            year: self.year,
            license_plate: self.license_plate,
            status: self.status.unwrap_or(VehicleStatus::Available),
            fuel_level: self.fuel_level.unwrap_or(100.0),
            mileage: self.mileage.unwrap_or(0.0),
            fuel_efficiency: self.fuel_efficiency.unwrap_or(0.0),
            vehicle_type: self.vehicle_type,
            last_service: self.last_service,
            next_service: self.next_service,
            insurance_expiry: self.insurance_expiry,
            registration_expiry: self.registration_expiry,
            assigned_driver_id: self.assigned_driver_id,
        }
    }
}

/// Request para actualizar un vehículo existente - campos parciales
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    #[validate(range(min = 1900, max = 2030))]
    pub year: Option<i32>,

    #[validate(length(min = 1, max = 20))]
    pub license_plate: Option<String>,

    pub vehicle_type: Option<VehicleType>,

    pub status: Option<VehicleStatus>,

    #[validate(range(min = 0.0, max = 100.0))]
    pub fuel_level: Option<f64>,

    #[validate(range(min = 0.0))]
    pub mileage: Option<f64>,

    #[validate(range(min = 0.0))]
    pub fuel_efficiency: Option<f64>,

    pub last_service: Option<String>,
    pub next_service: Option<String>,
    pub insurance_expiry: Option<String>,
    pub registration_expiry: Option<String>,
    pub assigned_driver_id: Option<String>,
}

/// Filtros para el listado de vehículos
#[derive(Debug, Default, Deserialize)]
pub struct VehicleFilters {
    pub status: Option<VehicleStatus>,
    pub vehicle_type: Option<VehicleType>,
    pub search: Option<String>,
}

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}
