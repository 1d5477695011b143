//! Controller de vehículos
//!
//! Las mutaciones se aplican primero al contenedor en memoria (junto con el
//! re-escaneo de alertas, bajo el mismo write lock) y después se despacha la
//! escritura remota en background. Un fallo remoto no revierte lo local.

use chrono::Utc;
use tracing::warn;
use validator::Validate;

use crate::dto::vehicle_dto::{
    ApiResponse, CreateVehicleRequest, UpdateVehicleRequest, VehicleFilters,
};
use crate::models::Vehicle;
use crate::repositories::VehicleRepository;
use crate::services::alerts;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleController {
    state: AppState,
}

impl VehicleController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, filters: VehicleFilters) -> AppResult<Vec<Vehicle>> {
        let store = self.state.store.read().await;
        let vehicles = store
            .vehicles
            .iter()
            .filter(|v| filters.status.map_or(true, |s| v.status == s))
            .filter(|v| filters.vehicle_type.map_or(true, |t| v.vehicle_type == t))
            .filter(|v| matches_search(v, filters.search.as_deref()))
            .cloned()
            .collect();
        Ok(vehicles)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Vehicle> {
        let store = self.state.store.read().await;
        store
            .vehicle(id)
            .cloned()
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;

        let created = {
            let mut store = self.state.store.write().await;
            let id = store.add_vehicle(request.into_model());
            alerts::refresh(&mut store, Utc::now().date_naive());
            store.vehicle(&id).cloned()
        };
        let created = created
            .ok_or_else(|| AppError::Internal("vehículo recién insertado no encontrado".to_string()))?;

        self.persist_create(created.clone());
        Ok(ApiResponse::success_with_message(
            created,
            "Vehículo creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateVehicleRequest,
    ) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;

        let updated = {
            let mut store = self.state.store.write().await;
            let vehicle = store
                .vehicle_mut(id)
                .ok_or_else(|| not_found_error("Vehicle", id))?;

            if let Some(make) = request.make {
                vehicle.make = make;
            }
            if let Some(model) = request.model {
                vehicle.model = model;
            }
            if let Some(year) = request.year {
                vehicle.year = year;
            }
            if let Some(license_plate) = request.license_plate {
                vehicle.license_plate = license_plate;
            }
            if let Some(vehicle_type) = request.vehicle_type {
                vehicle.vehicle_type = vehicle_type;
            }
            if let Some(status) = request.status {
                vehicle.status = status;
            }
            if let Some(fuel_level) = request.fuel_level {
                vehicle.fuel_level = fuel_level;
            }
            if let Some(mileage) = request.mileage {
                vehicle.mileage = mileage;
            }
            if let Some(fuel_efficiency) = request.fuel_efficiency {
                vehicle.fuel_efficiency = fuel_efficiency;
            }
            if let Some(last_service) = request.last_service {
                vehicle.last_service = last_service;
            }
            if let Some(next_service) = request.next_service {
                vehicle.next_service = Some(next_service);
            }
            if let Some(insurance_expiry) = request.insurance_expiry {
                vehicle.insurance_expiry = insurance_expiry;
            }
            if let Some(registration_expiry) = request.registration_expiry {
                vehicle.registration_expiry = registration_expiry;
            }
            if let Some(assigned_driver_id) = request.assigned_driver_id {
                vehicle.assigned_driver_id = Some(assigned_driver_id);
            }
            let updated = vehicle.clone();

            alerts::refresh(&mut store, Utc::now().date_naive());
            updated
        };

        self.persist_update(updated.clone());
        Ok(ApiResponse::success_with_message(
            updated,
            "Vehículo actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        {
            let mut store = self.state.store.write().await;
            store
                .remove_vehicle(id)
                .ok_or_else(|| not_found_error("Vehicle", id))?;
        }

        let repo = VehicleRepository::new(self.state.pool.clone());
        let id = id.to_string();
        tokio::spawn(async move {
            match repo.delete(&id).await {
                Ok(found) => {
                    if !found {
                        warn!("Vehículo '{}' no existía en el almacén de respaldo", id);
                    }
                }
                Err(e) => warn!(
                    "Borrado remoto del vehículo '{}' falló, estado local se mantiene: {}",
                    id, e
                ),
            }
        });
        Ok(())
    }

    fn persist_create(&self, vehicle: Vehicle) {
        let repo = VehicleRepository::new(self.state.pool.clone());
        tokio::spawn(async move {
            if let Err(e) = repo.create(&vehicle).await {
                warn!(
                    "Persistencia del vehículo '{}' falló, estado local se mantiene: {}",
                    vehicle.id, e
                );
            }
        });
    }

    fn persist_update(&self, vehicle: Vehicle) {
        let repo = VehicleRepository::new(self.state.pool.clone());
        tokio::spawn(async move {
            if let Err(e) = repo.update(&vehicle).await {
                warn!(
                    "Actualización remota del vehículo '{}' falló, estado local se mantiene: {}",
                    vehicle.id, e
                );
            }
        });
    }
}

fn matches_search(vehicle: &Vehicle, search: Option<&str>) -> bool {
    let Some(term) = search else { return true };
    let term = term.to_lowercase();
    vehicle.make.to_lowercase().contains(&term)
        || vehicle.model.to_lowercase().contains(&term)
        || vehicle.license_plate.to_lowercase().contains(&term)
}
