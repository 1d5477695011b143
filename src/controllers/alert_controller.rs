//! Controller de alertas
//!
//! Las alertas viven solo en el contenedor de estado; no hay repositorio.
//! `resolve` programa la eliminación del conjunto activo tras el periodo de
//! gracia configurado.

use std::time::Duration;

use crate::dto::alert_dto::AlertFilters;
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::Alert;
use crate::services::alerts;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppResult};

pub struct AlertController {
    state: AppState,
}

impl AlertController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, filters: AlertFilters) -> AppResult<Vec<Alert>> {
        let store = self.state.store.read().await;
        let alerts = store
            .alerts
            .iter()
            .filter(|a| filters.alert_type.map_or(true, |t| a.alert_type == t))
            .filter(|a| filters.severity.map_or(true, |s| a.severity == s))
            .filter(|a| filters.status.map_or(true, |s| a.status == s))
            .cloned()
            .collect();
        Ok(alerts)
    }

    pub async fn acknowledge(&self, id: &str) -> AppResult<ApiResponse<Alert>> {
        let mut store = self.state.store.write().await;
        alerts::acknowledge(&mut store, id)?;
        let alert = store
            .alert(id)
            .cloned()
            .ok_or_else(|| not_found_error("Alert", id))?;
        Ok(ApiResponse::success_with_message(
            alert,
            "Alerta reconocida".to_string(),
        ))
    }

    pub async fn resolve(&self, id: &str) -> AppResult<ApiResponse<Alert>> {
        let alert = {
            let mut store = self.state.store.write().await;
            alerts::resolve(&mut store, id)?;
            store
                .alert(id)
                .cloned()
                .ok_or_else(|| not_found_error("Alert", id))?
        };

        // eliminación diferida del conjunto activo
        let state = self.state.clone();
        let alert_id = id.to_string();
        let grace = state.config.alert_grace_period_secs;
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_secs(grace)).await;
            let mut store = state.store.write().await;
            store.remove_alert(&alert_id);
        });

        Ok(ApiResponse::success_with_message(
            alert,
            "Alerta resuelta".to_string(),
        ))
    }
}
