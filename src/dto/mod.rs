//! DTOs de la API
//!
//! Requests de creación/actualización con sus validaciones, filtros de
//! listado y la respuesta genérica `ApiResponse`.

pub mod alert_dto;
pub mod dashboard_dto;
pub mod driver_dto;
pub mod inventory_dto;
pub mod maintenance_dto;
pub mod trip_dto;
pub mod vehicle_dto;
