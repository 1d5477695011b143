//! Controller del dashboard

use crate::dto::dashboard_dto::DashboardStats;
use crate::models::{AlertStatus, DriverStatus, TripStatus, VehicleStatus};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct DashboardController {
    state: AppState,
}

impl DashboardController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn stats(&self) -> AppResult<DashboardStats> {
        let store = self.state.store.read().await;

        let count_vehicles = |status: VehicleStatus| {
            store.vehicles.iter().filter(|v| v.status == status).count()
        };

        Ok(DashboardStats {
            total_vehicles: store.vehicles.len(),
            available_vehicles: count_vehicles(VehicleStatus::Available),
            in_use_vehicles: count_vehicles(VehicleStatus::InUse),
            maintenance_vehicles: count_vehicles(VehicleStatus::Maintenance),
            total_drivers: store
                .drivers
                .iter()
                .filter(|d| d.status != DriverStatus::OffDuty)
                .count(),
            active_trips: store
                .trips
                .iter()
                .filter(|t| t.status == TripStatus::InProgress)
                .count(),
            new_alerts: store
                .alerts
                .iter()
                .filter(|a| a.status == AlertStatus::New)
                .count(),
            low_stock_items: store.inventory.iter().filter(|i| i.is_low_stock()).count(),
        })
    }
}
