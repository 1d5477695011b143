//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El contenedor de dominio es single-writer:
//! un único `RwLock` protege el `FleetStore` completo, así que cada mutación
//! (incluidas sus cascadas y el re-escaneo de alertas) es atómica para los
//! lectores.

use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::environment::EnvironmentConfig;
use crate::store::FleetStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub store: Arc<RwLock<FleetStore>>,
}

impl AppState {
    pub fn new(pool: PgPool, config: EnvironmentConfig, store: FleetStore) -> Self {
        Self {
            pool,
            config,
            store: Arc::new(RwLock::new(store)),
        }
    }
}
