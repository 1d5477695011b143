use anyhow::Result;
use axum::{response::Json, routing::get, Router};
use dotenvy::dotenv;
use serde_json::json;
use std::net::SocketAddr;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use fleet_management::config::environment::EnvironmentConfig;
use fleet_management::database;
use fleet_management::middleware::cors::{cors_middleware, cors_middleware_with_origins};
use fleet_management::repositories::{
    DriverRepository, MaintenanceRepository, TripRepository, VehicleRepository,
};
use fleet_management::routes;
use fleet_management::state::AppState;
use fleet_management::store::FleetStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    info!("🚛 Fleet Management - API de administración de flota");
    info!("====================================================");

    // Inicializar base de datos
    let pool = match database::create_pool(None).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    // Carga inicial del contenedor de estado. Solo vehículos, conductores,
    // viajes y mantenimientos se consultan; inventario y alertas empiezan
    // vacíos en cada sesión.
    let vehicles = VehicleRepository::new(pool.clone()).list().await?;
    let drivers = DriverRepository::new(pool.clone()).list().await?;
    let trips = TripRepository::new(pool.clone()).list().await?;
    let maintenance_records = MaintenanceRepository::new(pool.clone()).list().await?;
    info!(
        "📦 Estado cargado: {} vehículos, {} conductores, {} viajes, {} mantenimientos",
        vehicles.len(),
        drivers.len(),
        trips.len(),
        maintenance_records.len()
    );

    let config = EnvironmentConfig::default();
    let store = FleetStore::load(vehicles, drivers, trips, maintenance_records);
    let app_state = AppState::new(pool, config.clone(), store);

    let cors = if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&config.cors_origins)
    };

    let app = Router::new()
        .route("/health", get(health_endpoint))
        .merge(routes::create_api_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("🚗 Vehicles:");
    info!("   POST /api/vehicles - Crear vehículo");
    info!("   GET  /api/vehicles - Listar vehículos (filtros: status, vehicle_type, search)");
    info!("   GET  /api/vehicles/:id - Obtener vehículo");
    info!("   PUT  /api/vehicles/:id - Actualizar vehículo");
    info!("   DELETE /api/vehicles/:id - Eliminar vehículo");
    info!("🧑 Drivers:");
    info!("   POST /api/drivers - Registrar conductor");
    info!("   GET  /api/drivers - Listar conductores (filtros: status, search)");
    info!("   GET  /api/drivers/:id - Obtener conductor");
    info!("   PUT  /api/drivers/:id - Actualizar conductor");
    info!("   DELETE /api/drivers/:id - Eliminar conductor");
    info!("🗺️ Trips:");
    info!("   POST /api/trips - Planificar viaje");
    info!("   GET  /api/trips - Listar viajes (filtros: status, vehicle_id, driver_id, search)");
    info!("   POST /api/trips/:id/start - Iniciar viaje");
    info!("   POST /api/trips/:id/complete - Completar viaje");
    info!("   POST /api/trips/:id/cancel - Cancelar viaje");
    info!("🔧 Maintenance:");
    info!("   POST /api/maintenance - Agendar mantenimiento");
    info!("   GET  /api/maintenance - Listar mantenimientos (filtros: status, vehicle_id)");
    info!("   PUT  /api/maintenance/:id/status - Transición de estado");
    info!("   DELETE /api/maintenance/:id - Eliminar registro");
    info!("📦 Inventory:");
    info!("   POST /api/inventory - Alta de artículo");
    info!("   GET  /api/inventory - Listar inventario (filtros: category, search, low_stock)");
    info!("   PUT  /api/inventory/:id - Actualizar artículo");
    info!("   DELETE /api/inventory/:id - Eliminar artículo");
    info!("🔔 Alerts:");
    info!("   GET  /api/alerts - Listar alertas (filtros: type, severity, status)");
    info!("   POST /api/alerts/:id/acknowledge - Reconocer alerta");
    info!("   POST /api/alerts/:id/resolve - Resolver alerta");
    info!("📊 Dashboard:");
    info!("   GET  /api/dashboard/stats - Contadores agregados");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Health check simple
async fn health_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "service": "fleet-management",
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
