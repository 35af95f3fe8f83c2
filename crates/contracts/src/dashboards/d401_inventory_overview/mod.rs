use serde::{Deserialize, Serialize};

use super::d400_msku_analytics::AggregateBucket;

/// Показатели главной страницы по текущим остаткам
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryOverview {
    pub total_products: usize,
    pub unique_mskus: usize,
    pub total_quantity: f64,
    pub top_msku: Option<String>,
    pub ai_queries: usize,
    pub by_msku: Vec<AggregateBucket>,
}
