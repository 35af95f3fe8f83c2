use serde::{Deserialize, Serialize};

/// Итог по одному MSKU
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateBucket {
    pub msku: String,
    pub total_quantity: f64,
    /// Доля от общего количества, %
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_rows: usize,
    pub bucket_count: usize,
    pub total_quantity: f64,
    pub top_bucket: Option<AggregateBucket>,
}

/// Данные для графиков: группы по убыванию количества и сводка
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MskuAnalytics {
    pub buckets: Vec<AggregateBucket>,
    pub summary: AnalyticsSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MskuAnalyticsRequest {
    #[serde(rename = "csvText")]
    pub csv_text: String,
    /// Сначала применить текущую таблицу сопоставления SKU
    #[serde(rename = "applyMapping", default)]
    pub apply_mapping: bool,
}
