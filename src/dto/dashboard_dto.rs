//! DTOs del dashboard

use serde::Serialize;

/// Contadores agregados para la vista principal
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_vehicles: usize,
    pub available_vehicles: usize,
    pub in_use_vehicles: usize,
    pub maintenance_vehicles: usize,
    pub total_drivers: usize,
    pub active_trips: usize,
    pub new_alerts: usize,
    pub low_stock_items: usize,
}
