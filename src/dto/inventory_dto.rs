//! DTOs de InventoryItem

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::{InventoryCategory, InventoryItem};

/// Request para dar de alta un artículo de inventario
#[derive(Debug, Deserialize, Validate)]
pub struct CreateInventoryItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,

    pub category: InventoryCategory,

    #[validate(range(min = 0))]
    pub quantity: i32,

    #[validate(range(min = 0))]
    pub minimum_quantity: i32,

    pub unit_price: Option<Decimal>,

    #[validate(length(min = 1, max = 50))]
    pub location: String,

    #[validate(length(min = 1, max = 100))]
    pub supplier: String,

    pub last_restocked: Option<String>,

    pub compatible_vehicles: Option<Vec<String>>,
}

impl CreateInventoryItemRequest {
    pub fn into_model(self) -> InventoryItem {
        InventoryItem {
            id: String::new(),
            name: self.name,
            category: self.category,
            quantity: self.quantity,
            minimum_quantity: self.minimum_quantity,
            unit_price: self.unit_price.unwrap_or_default(),
            location: self.location,
            supplier: self.supplier,
            last_restocked: self.last_restocked.unwrap_or_default(),
            compatible_vehicles: self.compatible_vehicles.unwrap_or_default(),
        }
    }
}

/// Request para actualizar un artículo - campos parciales
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInventoryItemRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,

    pub category: Option<InventoryCategory>,

    #[validate(range(min = 0))]
    pub quantity: Option<i32>,

    #[validate(range(min = 0))]
    pub minimum_quantity: Option<i32>,

    pub unit_price: Option<Decimal>,

    #[validate(length(min = 1, max = 50))]
    pub location: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub supplier: Option<String>,

    pub last_restocked: Option<String>,

    pub compatible_vehicles: Option<Vec<String>>,
}

/// Filtros para el listado de inventario
#[derive(Debug, Default, Deserialize)]
pub struct InventoryFilters {
    pub category: Option<InventoryCategory>,
    pub search: Option<String>,
    /// Solo artículos en condición de stock bajo
    pub low_stock: Option<bool>,
}
