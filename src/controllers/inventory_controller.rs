//! Controller de inventario
//!
//! Cualquier mutación de stock re-escanea alertas bajo el mismo write lock:
//! bajar de `minimum_quantity` produce la alerta de stock en el mismo
//! request que la provocó.

use chrono::Utc;
use tracing::warn;
use validator::Validate;

use crate::dto::inventory_dto::{
    CreateInventoryItemRequest, InventoryFilters, UpdateInventoryItemRequest,
};
use crate::dto::vehicle_dto::ApiResponse;
use crate::models::InventoryItem;
use crate::repositories::InventoryRepository;
use crate::services::alerts;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct InventoryController {
    state: AppState,
}

impl InventoryController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self, filters: InventoryFilters) -> AppResult<Vec<InventoryItem>> {
        let store = self.state.store.read().await;
        let items = store
            .inventory
            .iter()
            .filter(|i| filters.category.map_or(true, |c| i.category == c))
            .filter(|i| filters.low_stock.map_or(true, |low| i.is_low_stock() == low))
            .filter(|i| matches_search(i, filters.search.as_deref()))
            .cloned()
            .collect();
        Ok(items)
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<InventoryItem> {
        let store = self.state.store.read().await;
        store
            .inventory_item(id)
            .cloned()
            .ok_or_else(|| not_found_error("Inventory item", id))
    }

    pub async fn create(
        &self,
        request: CreateInventoryItemRequest,
    ) -> AppResult<ApiResponse<InventoryItem>> {
        request.validate()?;

        let created = {
            let mut store = self.state.store.write().await;
            let id = store.add_inventory_item(request.into_model());
            alerts::refresh(&mut store, Utc::now().date_naive());
            store.inventory_item(&id).cloned()
        };
        let created = created
            .ok_or_else(|| AppError::Internal("artículo recién insertado no encontrado".to_string()))?;

        self.persist_create(created.clone());
        Ok(ApiResponse::success_with_message(
            created,
            "Artículo de inventario creado exitosamente".to_string(),
        ))
    }

    pub async fn update(
        &self,
        id: &str,
        request: UpdateInventoryItemRequest,
    ) -> AppResult<ApiResponse<InventoryItem>> {
        request.validate()?;

        let updated = {
            let mut store = self.state.store.write().await;
            let item = store
                .inventory_item_mut(id)
                .ok_or_else(|| not_found_error("Inventory item", id))?;

            if let Some(name) = request.name {
                item.name = name;
            }
            if let Some(category) = request.category {
                item.category = category;
            }
            if let Some(quantity) = request.quantity {
                item.quantity = quantity;
            }
            if let Some(minimum_quantity) = request.minimum_quantity {
                item.minimum_quantity = minimum_quantity;
            }
            if let Some(unit_price) = request.unit_price {
                item.unit_price = unit_price;
            }
            if let Some(location) = request.location {
                item.location = location;
            }
            if let Some(supplier) = request.supplier {
                item.supplier = supplier;
            }
            if let Some(last_restocked) = request.last_restocked {
                item.last_restocked = last_restocked;
            }
            if let Some(compatible_vehicles) = request.compatible_vehicles {
                item.compatible_vehicles = compatible_vehicles;
            }
            let updated = item.clone();

            alerts::refresh(&mut store, Utc::now().date_naive());
            updated
        };

        self.persist_update(updated.clone());
        Ok(ApiResponse::success_with_message(
            updated,
            "Artículo de inventario actualizado exitosamente".to_string(),
        ))
    }

    pub async fn delete(&self, id: &str) -> AppResult<()> {
        {
            let mut store = self.state.store.write().await;
            store
                .remove_inventory_item(id)
                .ok_or_else(|| not_found_error("Inventory item", id))?;
        }

        let repo = InventoryRepository::new(self.state.pool.clone());
        let id = id.to_string();
        tokio::spawn(async move {
            match repo.delete(&id).await {
                Ok(found) => {
                    if !found {
                        warn!("Artículo '{}' no existía en el almacén de respaldo", id);
                    }
                }
                Err(e) => warn!(
                    "Borrado remoto del artículo '{}' falló, estado local se mantiene: {}",
                    id, e
                ),
            }
        });
        Ok(())
    }

    fn persist_create(&self, item: InventoryItem) {
        let repo = InventoryRepository::new(self.state.pool.clone());
        tokio::spawn(async move {
            if let Err(e) = repo.create(&item).await {
                warn!(
                    "Persistencia del artículo '{}' falló, estado local se mantiene: {}",
                    item.id, e
                );
            }
        });
    }

    fn persist_update(&self, item: InventoryItem) {
        let repo = InventoryRepository::new(self.state.pool.clone());
        tokio::spawn(async move {
            if let Err(e) = repo.update(&item).await {
                warn!(
                    "Actualización remota del artículo '{}' falló, estado local se mantiene: {}",
                    item.id, e
                );
            }
        });
    }
}

fn matches_search(item: &InventoryItem, search: Option<&str>) -> bool {
    let Some(term) = search else { return true };
    let term = term.to_lowercase();
    item.name.to_lowercase().contains(&term) || item.supplier.to_lowercase().contains(&term)
}
