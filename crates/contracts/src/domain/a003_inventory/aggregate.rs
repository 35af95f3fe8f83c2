use serde::{Deserialize, Serialize};

use crate::domain::a001_product::ProductRef;
use crate::domain::a002_warehouse::WarehouseRef;

/// Остаток товара на складе (таблица inventory)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub id: String,
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity: i64,
    pub last_updated: String,
}

/// Остаток с раскрытыми ссылками на товар и склад
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryWithDetails {
    #[serde(flatten)]
    pub inventory: Inventory,
    pub product: Option<ProductRef>,
    pub warehouse: Option<WarehouseRef>,
}

/// Установка количества для пары товар + склад
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryUpdate {
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity: i64,
}

impl InventoryUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if self.product_id.trim().is_empty() {
            return Err("product_id is required".into());
        }
        if self.warehouse_id.trim().is_empty() {
            return Err("warehouse_id is required".into());
        }
        Ok(())
    }
}
