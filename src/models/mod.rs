//! Modelos del sistema
//!
//! Este módulo contiene los modelos de dominio. Cada campo de estado es un
//! enum cerrado con su escritura de wire (`in-use`, `on-trip`, ...); la
//! validez de las transiciones se aplica centralmente en el coordinador de
//! ciclo de vida, no en los llamadores.

pub mod alert;
pub mod driver;
pub mod inventory;
pub mod maintenance;
pub mod trip;
pub mod vehicle;

pub use alert::{Alert, AlertSeverity, AlertStatus, AlertType};
pub use driver::{Driver, DriverStatus};
pub use inventory::{InventoryCategory, InventoryItem};
pub use maintenance::{MaintenanceRecord, MaintenanceStatus, MaintenanceType};
pub use trip::{Trip, TripStatus};
pub use vehicle::{Vehicle, VehicleStatus, VehicleType};
