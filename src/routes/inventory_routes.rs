use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;

use crate::controllers::inventory_controller::InventoryController;
use crate::dto::inventory_dto::{
    CreateInventoryItemRequest, InventoryFilters, UpdateInventoryItemRequest,
};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::InventoryItem;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_inventory_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_item))
        .route("/", get(list_items))
        .route("/:id", get(get_item))
        .route("/:id", put(update_item))
        .route("/:id", delete(delete_item))
}

async fn create_item(
    State(state): State<AppState>,
    Json(request): Json<CreateInventoryItemRequest>,
) -> Result<Json<ApiResponse<InventoryItem>>, AppError> {
    let controller = InventoryController::new(state);
    let response = controller.create(request).await?;
    Ok(Json(response))
}

async fn list_items(
    State(state): State<AppState>,
    Query(filters): Query<InventoryFilters>,
) -> Result<Json<Vec<InventoryItem>>, AppError> {
    let controller = InventoryController::new(state);
    let response = controller.list(filters).await?;
    Ok(Json(response))
}

async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InventoryItem>, AppError> {
    let controller = InventoryController::new(state);
    let response = controller.get_by_id(&id).await?;
    Ok(Json(response))
}

async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateInventoryItemRequest>,
) -> Result<Json<ApiResponse<InventoryItem>>, AppError> {
    let controller = InventoryController::new(state);
    let response = controller.update(&id, request).await?;
    Ok(Json(response))
}

async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let controller = InventoryController::new(state);
    controller.delete(&id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Artículo de inventario eliminado exitosamente"
    })))
}
