//! Controller de viajes
//!
//! Las transiciones de estado pasan siempre por el coordinador de ciclo de
//! vida; este controller solo valida la petición, toma el write lock y
//! despacha la persistencia de los registros afectados (viaje, vehículo y
//! conductor) en background.

use chrono::Utc;
use tracing::warn;
use validator::Validate;

use crate::dto::trip_dto::{CreateTripRequest, TripFilters};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::{Driver, DriverStatus, Trip, Vehicle, VehicleStatus};
use crate::repositories::{DriverRepository, TripRepository, VehicleRepository};
use crate::services::{alerts, lifecycle};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct TripController {
    state: AppState,
}

impl TripController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, filters: TripFilters) -> AppResult<Vec<Trip>> {
        let store = self.state.store.read().await;
        let trips = store
            .trips
            .iter()
            .filter(|t| filters.status.map_or(true, |s| t.status == s))
            .filter(|t| filters.vehicle_id.as_deref().map_or(true, |v| t.vehicle_id == v))
            .filter(|t| filters.driver_id.as_deref().map_or(true, |d| t.driver_id == d))
            .filter(|t| matches_search(t, filters.search.as_deref()))
            .cloned()
            .collect();
        Ok(trips)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Trip> {
        let store = self.state.store.read().await;
        store
            .trip(id)
            .cloned()
            .ok_or_else(|| not_found_error("Trip", id))
    }

    /// Planifica un viaje. El vehículo y el conductor deben existir y estar
    /// disponibles en el momento de la planificación.
    pub async fn create(&self, request: CreateTripRequest) -> AppResult<ApiResponse<Trip>> {
        request.validate()?;

        let created = {
            let mut store = self.state.store.write().await;

            let vehicle = store
                .vehicle(&request.vehicle_id)
                .ok_or_else(|| not_found_error("Vehicle", &request.vehicle_id))?;
            if vehicle.status != VehicleStatus::Available {
                return Err(AppError::Validation(format!(
                    "El vehículo '{}' no está disponible",
                    vehicle.id
                )));
            }
            let driver = store
                .driver(&request.driver_id)
                .ok_or_else(|| not_found_error("Driver", &request.driver_id))?;
            if driver.status != DriverStatus::Available {
                return Err(AppError::Validation(format!(
                    "El conductor '{}' no está disponible",
                    driver.id
                )));
            }

            let id = store.add_trip(request.into_model());
            store.trip(&id).cloned()
        };
        let created = created
            .ok_or_else(|| AppError::Internal("viaje recién insertado no encontrado".to_string()))?;

        let repo = TripRepository::new(self.state.pool.clone());
        let snapshot = created.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.create(&snapshot).await {
                warn!(
                    "Persistencia del viaje '{}' falló, estado local se mantiene: {}",
                    snapshot.id, e
                );
            }
        });

        Ok(ApiResponse::success_with_message(
            created,
            "Viaje planificado exitosamente".to_string(),
        ))
    }

    pub async fn start(&self, id: &str) -> AppResult<ApiResponse<Trip>> {
        self.transition(id, lifecycle::start_trip, "Viaje iniciado").await
    }

    pub async fn complete(&self, id: &str) -> AppResult<ApiResponse<Trip>> {
        self.transition(id, lifecycle::complete_trip, "Viaje completado").await
    }

    pub async fn cancel(&self, id: &str) -> AppResult<ApiResponse<Trip>> {
        self.transition(id, lifecycle::cancel_trip, "Viaje cancelado").await
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        {
            let mut store = self.state.store.write().await;
            store
                .remove_trip(id)
                .ok_or_else(|| not_found_error("Trip", id))?;
        }

        let repo = TripRepository::new(self.state.pool.clone());
        let id = id.to_string();
        tokio::spawn(async move {
            match repo.delete(&id).await {
                Ok(found) => {
                    if !found {
                        warn!("Viaje '{}' no existía en el almacén de respaldo", id);
                    }
                }
                Err(e) => warn!(
                    "Borrado remoto del viaje '{}' falló, estado local se mantiene: {}",
                    id, e
                ),
            }
        });
        Ok(())
    }

    /// Aplica una transición de ciclo de vida y persiste los registros
    /// afectados. La cascada ya dejó el store consistente; aquí solo se
    /// toman snapshots.
    async fn transition(
        &self,
        id: &str,
        apply: fn(&mut crate::store::FleetStore, &str) -> AppResult<()>,
        message: &str,
    ) -> AppResult<ApiResponse<Trip>> {
        let (trip, vehicle, driver) = {
            let mut store = self.state.store.write().await;
            apply(&mut store, id)?;
            alerts::refresh(&mut store, Utc::now().date_naive());

            let trip = store.trip(id).cloned();
            let vehicle = trip
                .as_ref()
                .and_then(|t| store.vehicle(&t.vehicle_id))
                .cloned();
            let driver = trip
                .as_ref()
                .and_then(|t| store.driver(&t.driver_id))
                .cloned();
            (trip, vehicle, driver)
        };
        let trip = trip
            .ok_or_else(|| AppError::Internal("viaje desaparecido tras la transición".to_string()))?;

        self.persist_transition(trip.clone(), vehicle, driver);
        Ok(ApiResponse::success_with_message(trip, message.to_string()))
    }

    fn persist_transition(&self, trip: Trip, vehicle: Option<Vehicle>, driver: Option<Driver>) {
        let pool = self.state.pool.clone();
        tokio::spawn(async move {
            if let Err(e) = TripRepository::new(pool.clone()).update(&trip).await {
                warn!(
                    "Actualización remota del viaje '{}' falló, estado local se mantiene: {}",
                    trip.id, e
                );
            }
            if let Some(vehicle) = vehicle {
                if let Err(e) = VehicleRepository::new(pool.clone()).update(&vehicle).await {
                    warn!(
                        "Actualización remota del vehículo '{}' falló, estado local se mantiene: {}",
                        vehicle.id, e
                    );
                }
            }
            if let Some(driver) = driver {
                if let Err(e) = DriverRepository::new(pool).update(&driver).await {
                    warn!(
                        "Actualización remota del conductor '{}' falló, estado local se mantiene: {}",
                        driver.id, e
                    );
                }
            }
        });
    }
}

fn matches_search(trip: &Trip, search: Option<&str>) -> bool {
    let Some(term) = search else { return true };
    let term = term.to_lowercase();
    trip.start_location.to_lowercase().contains(&term)
        || trip.end_location.to_lowercase().contains(&term)
}
