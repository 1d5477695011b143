//! Modelo de Trip
//!
//! El ciclo de vida es lineal: planned → in-progress → completed, con
//! cancelación posible desde planned o in-progress. `completed` y
//! `cancelled` son estados terminales.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Estado del viaje
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TripStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl TripStatus {
    /// Un estado terminal no admite ninguna transición posterior
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Planned => "planned",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for TripStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("estado de viaje desconocido: '{}'", other)),
        }
    }
}

/// Trip principal - referencia un vehículo y un conductor por id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: String,
    pub vehicle_id: String,
    pub driver_id: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub start_location: String,
    pub end_location: String,
    pub distance: f64,
    pub status: TripStatus,
    pub purpose: String,
    pub fuel_consumed: Option<f64>,
    pub notes: Option<String>,
}
