use serde::{Deserialize, Serialize};

pub const DEFAULT_WAREHOUSE_NAME: &str = "Main Warehouse";
pub const DEFAULT_WAREHOUSE_LOCATION: &str = "Default Location";

/// Склад (таблица warehouses)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: String,
    pub name: String,
    pub location: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWarehouse {
    pub name: String,
    #[serde(default)]
    pub location: String,
}

impl NewWarehouse {
    pub fn default_warehouse() -> Self {
        Self {
            name: DEFAULT_WAREHOUSE_NAME.to_string(),
            location: DEFAULT_WAREHOUSE_LOCATION.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Warehouse name is required".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseRef {
    pub id: String,
    pub name: String,
}

impl From<&Warehouse> for WarehouseRef {
    fn from(w: &Warehouse) -> Self {
        Self {
            id: w.id.clone(),
            name: w.name.clone(),
        }
    }
}
