//! Controller de mantenimiento

use chrono::Utc;
use tracing::warn;
use validator::Validate;

use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceFilters, UpdateMaintenanceStatusRequest,
};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::{MaintenanceRecord, Vehicle};
use crate::repositories::{MaintenanceRepository, VehicleRepository};
use crate::services::{alerts, lifecycle};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct MaintenanceController {
    state: AppState,
}

impl MaintenanceController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, filters: MaintenanceFilters) -> AppResult<Vec<MaintenanceRecord>> {
        let store = self.state.store.read().await;
        let records = store
            .maintenance_records
            .iter()
            .filter(|m| filters.status.map_or(true, |s| m.status == s))
            .filter(|m| filters.vehicle_id.as_deref().map_or(true, |v| m.vehicle_id == v))
            .cloned()
            .collect();
        Ok(records)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<MaintenanceRecord> {
        let store = self.state.store.read().await;
        store
            .maintenance_record(id)
            .cloned()
            .ok_or_else(|| not_found_error("Maintenance record", id))
    }

    /// Agenda un mantenimiento. Creado directamente `in-progress`, el
    /// vehículo pasa a `maintenance` en el mismo write lock.
    pub async fn create(
        &self,
        request: CreateMaintenanceRequest,
    ) -> AppResult<ApiResponse<MaintenanceRecord>> {
        request.validate()?;

        let (created, vehicle) = {
            let mut store = self.state.store.write().await;
            let id = lifecycle::schedule_maintenance(&mut store, request.into_model())?;
            alerts::refresh(&mut store, Utc::now().date_naive());

            let created = store.maintenance_record(&id).cloned();
            let vehicle = created
                .as_ref()
                .and_then(|r| store.vehicle(&r.vehicle_id))
                .cloned();
            (created, vehicle)
        };
        let created = created.ok_or_else(|| {
            AppError::Internal("registro de mantenimiento recién insertado no encontrado".to_string())
        })?;

        let pool = self.state.pool.clone();
        let snapshot = created.clone();
        tokio::spawn(async move {
            if let Err(e) = MaintenanceRepository::new(pool.clone()).create(&snapshot).await {
                warn!(
                    "Persistencia del mantenimiento '{}' falló, estado local se mantiene: {}",
                    snapshot.id, e
                );
            }
            persist_vehicle(pool, vehicle).await;
        });

        Ok(ApiResponse::success_with_message(
            created,
            "Mantenimiento agendado exitosamente".to_string(),
        ))
    }

    pub async fn update_status(
        &self,
        id: &str,
        request: UpdateMaintenanceStatusRequest,
    ) -> AppResult<ApiResponse<MaintenanceRecord>> {
        let (updated, vehicle) = {
            let mut store = self.state.store.write().await;
            lifecycle::update_maintenance_status(&mut store, id, request.status)?;
            alerts::refresh(&mut store, Utc::now().date_naive());

            let updated = store.maintenance_record(id).cloned();
            let vehicle = updated
                .as_ref()
                .and_then(|r| store.vehicle(&r.vehicle_id))
                .cloned();
            (updated, vehicle)
        };
        let updated = updated.ok_or_else(|| {
            AppError::Internal("registro de mantenimiento desaparecido tras la transición".to_string())
        })?;

        let pool = self.state.pool.clone();
        let snapshot = updated.clone();
        tokio::spawn(async move {
            if let Err(e) = MaintenanceRepository::new(pool.clone()).update(&snapshot).await {
                warn!(
                    "Actualización remota del mantenimiento '{}' falló, estado local se mantiene: {}",
                    snapshot.id, e
                );
            }
            persist_vehicle(pool, vehicle).await;
        });

        Ok(ApiResponse::success_with_message(
            updated,
            "Estado de mantenimiento actualizado".to_string(),
        ))
    }

    /// Elimina un registro; si estaba `in-progress` el vehículo se libera
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let (removed, vehicle) = {
            let mut store = self.state.store.write().await;
            let removed = lifecycle::remove_maintenance_record(&mut store, id)?;
            alerts::refresh(&mut store, Utc::now().date_naive());
            let vehicle = store.vehicle(&removed.vehicle_id).cloned();
            (removed, vehicle)
        };

        let pool = self.state.pool.clone();
        tokio::spawn(async move {
            match MaintenanceRepository::new(pool.clone()).delete(&removed.id).await {
                Ok(found) => {
                    if !found {
                        warn!(
                            "Mantenimiento '{}' no existía en el almacén de respaldo",
                            removed.id
                        );
                    }
                }
                Err(e) => warn!(
                    "Borrado remoto del mantenimiento '{}' falló, estado local se mantiene: {}",
                    removed.id, e
                ),
            }
            persist_vehicle(pool, vehicle).await;
        });
        Ok(())
    }
}

async fn persist_vehicle(pool: sqlx::PgPool, vehicle: Option<Vehicle>) {
    if let Some(vehicle) = vehicle {
        if let Err(e) = VehicleRepository::new(pool).update(&vehicle).await {
            warn!(
                "Actualización remota del vehículo '{}' falló, estado local se mantiene: {}",
                vehicle.id, e
            );
        }
    }
}
