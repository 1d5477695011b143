//! Modelo de Driver

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Estado del conductor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DriverStatus {
    Available,
    OnTrip,
    OffDuty,
}

impl fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::OnTrip => "on-trip",
            Self::OffDuty => "off-duty",
        };
        f.write_str(s)
    }
}

impl FromStr for DriverStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "on-trip" => Ok(Self::OnTrip),
            "off-duty" => Ok(Self::OffDuty),
            other => Err(format!("estado de conductor desconocido: '{}'", other)),
        }
    }
}

/// Driver principal. Invariante: un conductor en un viaje activo tiene estado `on-trip`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub license_number: String,
    pub license_expiry: String,
    pub contact_number: String,
    pub email: String,
    pub status: DriverStatus,
    pub assigned_vehicle_id: Option<String>,
    pub rating: f64,
    pub total_trips: i32,
    pub join_date: String,
    pub emergency_contact: String,
}
