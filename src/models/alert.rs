//! Modelo de Alert
//!
//! Las alertas son registros derivados: las sintetiza el motor de alertas,
//! nunca las crea un usuario. La unicidad se garantiza por (type, related_id)
//! mientras el estado sea distinto de `resolved`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tipo de alerta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertType {
    Maintenance,
    Inventory,
    License,
    Insurance,
    Registration,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Maintenance => "maintenance",
            Self::Inventory => "inventory",
            Self::License => "license",
            Self::Insurance => "insurance",
            Self::Registration => "registration",
        };
        f.write_str(s)
    }
}

impl FromStr for AlertType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "maintenance" => Ok(Self::Maintenance),
            "inventory" => Ok(Self::Inventory),
            "license" => Ok(Self::License),
            "insurance" => Ok(Self::Insurance),
            "registration" => Ok(Self::Registration),
            other => Err(format!("tipo de alerta desconocido: '{}'", other)),
        }
    }
}

/// Severidad de la alerta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// Estado de la alerta: new → acknowledged → resolved; `resolved` es terminal
/// y la alerta queda elegible para su eliminación del conjunto activo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlertStatus {
    New,
    Acknowledged,
    Resolved,
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::New => "new",
            Self::Acknowledged => "acknowledged",
            Self::Resolved => "resolved",
        };
        f.write_str(s)
    }
}

/// Alert derivada
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub alert_type: AlertType,
    pub severity: AlertSeverity,
    pub message: String,
    pub date: String,
    pub status: AlertStatus,
    pub related_id: Option<String>,
}
