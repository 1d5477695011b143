//! Modelo de InventoryItem
//!
//! El inventario no tiene campo de estado: "stock bajo" es una condición
//! derivada (`quantity <= minimum_quantity`), nunca un estado guardado.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Categoría del artículo de inventario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InventoryCategory {
    Part,
    Supply,
    Tool,
}

impl fmt::Display for InventoryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Part => "part",
            Self::Supply => "supply",
            Self::Tool => "tool",
        };
        f.write_str(s)
    }
}

impl FromStr for InventoryCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "part" => Ok(Self::Part),
            "supply" => Ok(Self::Supply),
            "tool" => Ok(Self::Tool),
            other => Err(format!("categoría de inventario desconocida: '{}'", other)),
        }
    }
}

/// Artículo de inventario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    pub category: InventoryCategory,
    pub quantity: i32,
    pub minimum_quantity: i32,
    pub unit_price: Decimal,
    pub location: String,
    pub supplier: String,
    pub last_restocked: String,
    pub compatible_vehicles: Vec<String>,
}

impl InventoryItem {
    /// Condición derivada de stock bajo
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.minimum_quantity
    }
}
