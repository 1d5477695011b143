//! Modelo de MaintenanceRecord
//!
//! Mismo perfil de ciclo de vida que Trip: scheduled → in-progress →
//! completed, cancelable desde cualquier estado no terminal.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::inventory::InventoryItem;

/// Estado del registro de mantenimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for MaintenanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for MaintenanceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("estado de mantenimiento desconocido: '{}'", other)),
        }
    }
}

/// Tipo de mantenimiento
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaintenanceType {
    Routine,
    Repair,
    Inspection,
}

impl fmt::Display for MaintenanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Routine => "routine",
            Self::Repair => "repair",
            Self::Inspection => "inspection",
        };
        f.write_str(s)
    }
}

impl FromStr for MaintenanceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "routine" => Ok(Self::Routine),
            "repair" => Ok(Self::Repair),
            "inspection" => Ok(Self::Inspection),
            other => Err(format!("tipo de mantenimiento desconocido: '{}'", other)),
        }
    }
}

/// Registro de mantenimiento - referencia un vehículo por id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: String,
    pub vehicle_id: String,
    pub date: String,
    pub maintenance_type: MaintenanceType,
    pub description: String,
    pub status: MaintenanceStatus,
    pub cost: Decimal,
    pub technician_name: String,
    pub parts_used: Vec<InventoryItem>,
    pub notes: Option<String>,
}
