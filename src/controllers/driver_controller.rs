//! Controller de conductores

use chrono::Utc;
use tracing::warn;
use validator::Validate;

use crate::dto::driver_dto::{CreateDriverRequest, DriverFilters, UpdateDriverRequest};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::Driver;
use crate::repositories::DriverRepository;
use crate::services::alerts;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct DriverController {
    state: AppState,
}

impl DriverController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, filters: DriverFilters) -> AppResult<Vec<Driver>> {
        let store = self.state.store.read().await;
        let drivers = store
            .drivers
            .iter()
            .filter(|d| filters.status.map_or(true, |s| d.status == s))
            .filter(|d| matches_search(d, filters.search.as_deref()))
            .cloned()
            .collect();
        Ok(drivers)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Driver> {
        let store = self.state.store.read().await;
        store
            .driver(id)
            .cloned()
            .ok_or_else(|| not_found_error("Driver", id))
    }

    pub async fn create(&self, request: CreateDriverRequest) -> AppResult<ApiResponse<Driver>> {
        request.validate()?;

        let created = {
            let mut store = self.state.store.write().await;
            let id = store.add_driver(request.into_model());
            alerts::refresh(&mut store, Utc::now().date_naive());
            store.driver(&id).cloned()
        };
        let created = created
            .ok_or_else(|| AppError::Internal("conductor recién insertado no encontrado".to_string()))?;

        self.persist_create(created.clone());
        Ok(ApiResponse::success_with_message(
            created,
            "Conductor registrado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateDriverRequest,
    ) -> AppResult<ApiResponse<Driver>> {
        request.validate()?;

        let updated = {
            let mut store = self.state.store.write().await;
            let driver = store
                .driver_mut(id)
                .ok_or_else(|| not_found_error("Driver", id))?;

            if let Some(name) = request.name {
                driver.name = name;
            }
            if let Some(license_number) = request.license_number {
                driver.license_number = license_number;
            }
            if let Some(license_expiry) = request.license_expiry {
                driver.license_expiry = license_expiry;
            }
            if let Some(contact_number) = request.contact_number {
                driver.contact_number = contact_number;
            }
            if let Some(email) = request.email {
                driver.email = email;
            }
            if let Some(status) = request.status {
                driver.status = status;
            }
            if let Some(rating) = request.rating {
                driver.rating = rating;
            }
            if let Some(emergency_contact) = request.emergency_contact {
                driver.emergency_contact = emergency_contact;
            }
            let updated = driver.clone();

            alerts::refresh(&mut store, Utc::now().date_naive());
            updated
        };

        self.persist_update(updated.clone());
        Ok(ApiResponse::success_with_message(
            updated,
            "Conductor actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        {
            let mut store = self.state.store.write().await;
            store
                .remove_driver(id)
                .ok_or_else(|| not_found_error("Driver", id))?;
        }

        let repo = DriverRepository::new(self.state.pool.clone());
        let id = id.to_string();
        tokio::spawn(async move {
            match repo.delete(&id).await {
                Ok(found) => {
                    if !found {
                        warn!("Conductor '{}' no existía en el almacén de respaldo", id);
                    }
                }
                Err(e) => warn!(
                    "Borrado remoto del conductor '{}' falló, estado local se mantiene: {}",
                    id, e
                ),
            }
        });
        Ok(())
    }

    fn persist_create(&self, driver: Driver) {
        let repo = DriverRepository::new(self.state.pool.clone());
        tokio::spawn(async move {
            if let Err(e) = repo.create(&driver).await {
                warn!(
                    "Persistencia del conductor '{}' falló, estado local se mantiene: {}",
                    driver.id, e
                );
            }
        });
    }

    fn persist_update(&self, driver: Driver) {
        let repo = DriverRepository::new(self.state.pool.clone());
        tokio::spawn(async move {
            if let Err(e) = repo.update(&driver).await {
                warn!(
                    "Actualización remota del conductor '{}' falló, estado local se mantiene: {}",
                    driver.id, e
                );
            }
        });
    }
}

fn matches_search(driver: &Driver, search: Option<&str>) -> bool {
    let Some(term) = search else { return true };
    let term = term.to_lowercase();
    driver.name.to_lowercase().contains(&term)
        || driver.license_number.to_lowercase().contains(&term)
}
