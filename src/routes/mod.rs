//! Rutas de la API
//!
//! Un router por entidad, anidados bajo `/api`.

pub mod alert_routes;
pub mod dashboard_routes;
pub mod driver_routes;
pub mod inventory_routes;
pub mod maintenance_routes;
pub mod trip_routes;
pub mod vehicle_routes;

use axum::Router;

use crate::state::AppState;

/// Crear el router principal de la API
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/api/vehicles", vehicle_routes::create_vehicle_router())
        .nest("/api/drivers", driver_routes::create_driver_router())
        .nest("/api/trips", trip_routes::create_trip_router())
        .nest("/api/maintenance", maintenance_routes::create_maintenance_router())
        .nest("/api/inventory", inventory_routes::create_inventory_router())
        .nest("/api/alerts", alert_routes::create_alert_router())
        .nest("/api/dashboard", dashboard_routes::create_dashboard_router())
}
