use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::alert_controller::AlertController;
use crate::dto::alert_dto::AlertFilters;
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::Alert;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alert_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alerts))
        .route("/:id/acknowledge", post(acknowledge_alert))
        .route("/:id/resolve", post(resolve_alert))
}

async fn list_alerts(
    State(state): State<AppState>,
    Query(filters): Query<AlertFilters>,
) -> Result<Json<Vec<Alert>>, AppError> {
    let controller = AlertController::new(state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn acknowledge_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Alert>>, AppError> {
    let controller = AlertController::new(state);
    let response = controller.acknowledge(&id).await?;
    Ok(Json(response))
}

async fn resolve_alert(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Alert>>, AppError> {
    let controller = AlertController::new(state);
    let response = controller.resolve(&id).await?;
    Ok(Json(response))
}
