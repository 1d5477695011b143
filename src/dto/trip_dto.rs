//! DTOs de Trip
//!
//! Un viaje siempre se crea en estado `planned`; las transiciones
//! posteriores van por los endpoints de ciclo de vida, nunca por un update
//! de campos.

use serde::Deserialize;
use validator::Validate;

use crate::models::{Trip, TripStatus};

/// Request para planificar un viaje
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTripRequest {
    pub vehicle_id: String,
    pub driver_id: String,

    pub start_time: String,
    pub end_time: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub start_location: String,

    #[validate(length(min = 1, max = 200))]
    pub end_location: String,

    #[validate(range(min = 0.0))]
    pub distance: Option<f64>,

    #[validate(length(min = 1, max = 200))]
    pub purpose: String,

    pub notes: Option<String>,
}

impl CreateTripRequest {
    pub fn into_model(self) -> Trip {
        Trip {
            id: String::new(),
            vehicle_id: self.vehicle_id,
            driver_id: self.driver_id,
            start_time: self.start_time,
            end_time: self.end_time,
            start_location: self.start_location,
            end_location: self.end_location,
            distance: self.distance.unwrap_or(0.0),
            status: TripStatus::Planned,
            purpose: self.purpose,
            fuel_consumed: None,
            notes: self.notes,
        }
    }
}

/// Filtros para el listado de viajes
#[derive(Debug, Default, Deserialize)]
pub struct TripFilters {
    pub status: Option<TripStatus>,
    pub vehicle_id: Option<String>,
    pub driver_id: Option<String>,
    pub search: Option<String>,
}
