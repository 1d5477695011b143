use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::controllers::maintenance_controller::MaintenanceController;
use crate::dto::maintenance_dto::{
    CreateMaintenanceRequest, MaintenanceFilters, UpdateMaintenanceStatusRequest,
};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::MaintenanceRecord;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_record))
        .route("/", get(list_records))
        .route("/:id", get(get_record))
        .route("/:id", delete(delete_record))
        .route("/:id/status", put(update_status))
}

async fn create_record(
    State(state): State<AppState>,
    Json(request): Json<CreateMaintenanceRequest>,
) -> Result<Json<ApiResponse<MaintenanceRecord>>, AppError> {
    let controller = MaintenanceController::new(state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_records(
    State(state): State<AppState>,
    Query(filters): Query<MaintenanceFilters>,
) -> Result<Json<Vec<MaintenanceRecord>>, AppError> {
    let controller = MaintenanceController::new(state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MaintenanceRecord>, AppError> {
    let controller = MaintenanceController::new(state);
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateMaintenanceStatusRequest>,
) -> Result<Json<ApiResponse<MaintenanceRecord>>, AppError> {
    let controller = MaintenanceController::new(state);
    let response = controller.update_status(&id, request).await?;
    Ok(Json(response))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = MaintenanceController::new(state);
    controller.delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Registro de mantenimiento eliminado exitosamente"
    })))
}
