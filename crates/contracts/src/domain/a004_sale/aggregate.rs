use serde::{Deserialize, Serialize};

use crate::domain::a001_product::ProductRef;

/// Продажа (таблица sales)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
    pub order_number: String,
    pub customer_name: Option<String>,
    pub sale_date: String,
    pub total_amount: f64,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSale {
    pub order_number: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    pub sale_date: String,
    #[serde(default)]
    pub total_amount: f64,
    pub status: String,
}

/// Строка продажи (таблица sale_items)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSaleItem {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleItemWithProduct {
    #[serde(flatten)]
    pub item: SaleItem,
    pub product: Option<ProductRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleWithItems {
    #[serde(flatten)]
    pub sale: Sale,
    pub items: Vec<SaleItemWithProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRef {
    pub order_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateSaleRequest {
    pub sale: NewSale,
    #[serde(default)]
    pub items: Vec<NewSaleItem>,
}

impl CreateSaleRequest {
    pub fn validate(&self) -> Result<(), String> {
        if self.sale.order_number.trim().is_empty() {
            return Err("order_number is required".into());
        }
        if self.sale.sale_date.trim().is_empty() {
            return Err("sale_date is required".into());
        }
        if self.sale.status.trim().is_empty() {
            return Err("status is required".into());
        }
        if self.items.iter().any(|i| i.product_id.trim().is_empty()) {
            return Err("product_id is required for every sale item".into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateSaleStatus {
    pub status: String,
}
