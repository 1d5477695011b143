//! Repositorios de persistencia
//!
//! Un repositorio por tipo de entidad con el contrato plano
//! list/create/update/delete. Desde la perspectiva del contenedor de estado
//! las escrituras son fire-and-forget: un fallo remoto se loguea y el estado
//! local ya aplicado no se revierte.

pub mod driver_repository;
pub mod inventory_repository;
pub mod maintenance_repository;
pub mod trip_repository;
pub mod vehicle_repository;

pub use driver_repository::DriverRepository;
pub use inventory_repository::InventoryRepository;
pub use maintenance_repository::MaintenanceRepository;
pub use trip_repository::TripRepository;
pub use vehicle_repository::VehicleRepository;
