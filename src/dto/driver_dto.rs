//! DTOs de Driver

use serde::Deserialize;
use validator::Validate;

use crate::models::{Driver, DriverStatus};

/// Request para registrar un conductor
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub license_number: String,

    pub license_expiry: String,

    #[validate(length(min = 1, max = 30))]
    pub contact_number: String,

    #[validate(email)]
    pub email: String,

    pub status: Option<DriverStatus>,

    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,

    pub join_date: String,

    #[validate(length(min = 1, max = 30))]
    pub emergency_contact: String,
}

impl CreateDriverRequest {
    pub fn into_model(self) -> Driver {
        Driver {
            id: String::new(),
            name: self.name,
            license_number: self.license_number,
            license_expiry: self.license_expiry,
            contact_number: self.contact_number,
            email: self.email,
            status: self.status.unwrap_or(DriverStatus::Available),
            assigned_vehicle_id: None,
            rating: self.rating.unwrap_or(0.0),
            total_trips: 0,
            join_date: self.join_date,
            emergency_contact: self.emergency_contact,
        }
    }
}

/// Request para actualizar un conductor - campos parciales
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub license_number: Option<String>,

    pub license_expiry: Option<String>,

    #[validate(length(min = 1, max = 30))]
    pub contact_number: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    pub status: Option<DriverStatus>,

    #[validate(range(min = 0.0, max = 5.0))]
    pub rating: Option<f64>,

    pub emergency_contact: Option<String>,
}

/// Filtros para el listado de conductores
#[derive(Debug, Default, Deserialize)]
pub struct DriverFilters {
    pub status: Option<DriverStatus>,
    pub search: Option<String>,
}
