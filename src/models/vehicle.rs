//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y su enum de estado.
//! Las fechas se guardan como strings `YYYY-MM-DD`; una fecha mal formada
//! no debe tumbar a ningún consumidor (ver motor de alertas).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Estado del vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleStatus {
    Available,
    InUse,
    Maintenance,
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Available => "available",
            Self::InUse => "in-use",
            Self::Maintenance => "maintenance",
        };
        f.write_str(s)
    }
}

impl FromStr for VehicleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "in-use" => Ok(Self::InUse),
            "maintenance" => Ok(Self::Maintenance),
            other => Err(format!("estado de vehículo desconocido: '{}'", other)),
        }
    }
}

/// Tipo de vehículo
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VehicleType {
    Sedan,
    Suv,
    Truck,
    Van,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Sedan => "sedan",
            Self::Suv => "suv",
            Self::Truck => "truck",
            Self::Van => "van",
        };
        f.write_str(s)
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sedan" => Ok(Self::Sedan),
            "suv" => Ok(Self::Suv),
            "truck" => Ok(Self::Truck),
            "van" => Ok(Self::Van),
            other => Err(format!("tipo de vehículo desconocido: '{}'", other)),
        }
    }
}

/// Vehicle principal. El id lo asigna el contenedor de estado (`v1`, `v2`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub fuel_level: f64,
    pub mileage: f64,
    pub fuel_efficiency: f64,
    pub vehicle_type: VehicleType,
    pub last_service: String,
    pub next_service: Option<String>,
    pub insurance_expiry: String,
    pub registration_expiry: String,
    pub assigned_driver_id: Option<String>,
}
