use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde_json::json;

use crate::controllers::trip_controller::TripController;
use crate::dto::trip_dto::{CreateTripRequest, TripFilters};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::Trip;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_trip_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_trip))
        .route("/", get(list_trips))
        .route("/:id", get(get_trip))
        .route("/:id", delete(delete_trip))
        .route("/:id/start", post(start_trip))
        .route("/:id/complete", post(complete_trip))
        .route("/:id/cancel", post(cancel_trip))
}

async fn create_trip(
    State(state): State<AppState>,
    Json(request): Json<CreateTripRequest>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = TripController::new(state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_trips(
    State(state): State<AppState>,
    Query(filters): Query<TripFilters>,
) -> Result<Json<Vec<Trip>>, AppError> {
    let controller = TripController::new(state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    let controller = TripController::new(state);
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn start_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = TripController::new(state);
    let response = controller.start(&id).await?;
    Ok(Json(response))
}

async fn complete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = TripController::new(state);
    let response = controller.complete(&id).await?;
    Ok(Json(response))
}

async fn cancel_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Trip>>, AppError> {
    let controller = TripController::new(state);
    let response = controller.cancel(&id).await?;
    Ok(Json(response))
}

async fn delete_trip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = TripController::new(state);
    controller.delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Viaje eliminado exitosamente"
    })))
}
