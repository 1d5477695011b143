//! Controllers de la aplicación
//!
//! Capa de negocio entre los handlers HTTP y el contenedor de estado: valida
//! la petición, muta el store bajo el write lock (cascadas y re-escaneo de
//! alertas incluidos) y despacha la persistencia fire-and-forget.

pub mod alert_controller;
pub mod dashboard_controller;
pub mod driver_controller;
pub mod inventory_controller;
pub mod maintenance_controller;
pub mod trip_controller;
pub mod vehicle_controller;
