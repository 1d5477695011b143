//! DTOs de Alert
//!
//! No hay request de creación: las alertas solo las sintetiza el motor de
//! derivación.

use serde::Deserialize;

use crate::models::{AlertSeverity, AlertStatus, AlertType};

/// Filtros para el listado de alertas
#[derive(Debug, Default, Deserialize)]
pub struct AlertFilters {
    #[serde(rename = "type")]
    pub alert_type: Option<AlertType>,
    pub severity: Option<AlertSeverity>,
    pub status: Option<AlertStatus>,
}
