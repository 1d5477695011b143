//! DTOs de MaintenanceRecord

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::{InventoryItem, MaintenanceRecord, MaintenanceStatus, MaintenanceType};

/// Request para agendar un mantenimiento
#[derive(Debug, Deserialize, Validate)]
pub struct CreateMaintenanceRequest {
    pub vehicle_id: String,

    pub date: String,

    pub maintenance_type: MaintenanceType,

    #[validate(length(min = 1, max = 500))]
    pub description: String,

    /// Por defecto `scheduled`; crearlo directamente `in-progress` marca el
    /// vehículo como en mantenimiento
    pub status: Option<MaintenanceStatus>,

    pub cost: Option<Decimal>,

    #[validate(length(min = 1, max = 100))]
    pub technician_name: String,

    pub parts_used: Option<Vec<InventoryItem>>,

    pub notes: Option<String>,
}

impl CreateMaintenanceRequest {
    pub fn into_model(self) -> MaintenanceRecord {
        MaintenanceRecord {
            id: String::new(),
            vehicle_id: self.vehicle_id,
            date: self.date,
            maintenance_type: self.maintenance_type,
            description: self.description,
            status: self.status.unwrap_or(MaintenanceStatus::Scheduled),
            cost: self.cost.unwrap_or_default(),
            technician_name: self.technician_name,
            parts_used: self.parts_used.unwrap_or_default(),
            notes: self.notes,
        }
    }
}

/// Request para la transición de estado de un registro
#[derive(Debug, Deserialize)]
pub struct UpdateMaintenanceStatusRequest {
    pub status: MaintenanceStatus,
}

/// Filtros para el listado de mantenimientos
#[derive(Debug, Default, Deserialize)]
pub struct MaintenanceFilters {
    pub status: Option<MaintenanceStatus>,
    pub vehicle_id: Option<String>,
}
