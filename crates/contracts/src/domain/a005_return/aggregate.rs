use serde::{Deserialize, Serialize};

use crate::domain::a001_product::ProductRef;
use crate::domain::a004_sale::SaleRef;

/// Возврат по продаже (таблица returns)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleReturn {
    pub id: String,
    pub sale_id: String,
    pub return_date: String,
    pub reason: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReturn {
    pub sale_id: String,
    pub return_date: String,
    #[serde(default)]
    pub reason: Option<String>,
    pub status: String,
}

/// Строка возврата (таблица return_items)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnItem {
    pub id: String,
    pub return_id: String,
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReturnItem {
    pub product_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnItemWithProduct {
    #[serde(flatten)]
    pub item: ReturnItem,
    pub product: Option<ProductRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnWithItems {
    #[serde(flatten)]
    pub sale_return: SaleReturn,
    pub items: Vec<ReturnItemWithProduct>,
    pub sale: Option<SaleRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateReturnRequest {
    #[serde(rename = "return")]
    pub return_data: NewReturn,
    #[serde(default)]
    pub items: Vec<NewReturnItem>,
}

impl CreateReturnRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.return_data.sale_id.trim().is_empty() {
            return Err("sale_id is required".into());
        }
        if self.return_data.return_date.trim().is_empty() {
            return Err("return_date is required".into());
        }
        if self.return_data.status.trim().is_empty() {
            return Err("status is required".into());
        }
        if self.items.iter().any(|i| i.product_id.trim().is_empty()) {
            return Err("product_id is required for every return item".into());
        }
        Ok(())
    }
}
