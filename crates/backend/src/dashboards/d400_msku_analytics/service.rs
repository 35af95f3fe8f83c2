use contracts::dashboards::d400_msku_analytics::MskuAnalytics;
use contracts::domain::a006_sku_mapping::SkuMapping;
use contracts::shared::{CsvRow, MappedRow};

use super::aggregator;
use crate::domain::a006_sku_mapping::apply_mapping;

/// Аналитика по строкам CSV.
///
/// С таблицей сопоставления MSKU вычисляется заново, без неё берётся
/// колонка MSKU самого файла.
pub fn msku_analytics(rows: Vec<CsvRow>, mapping: Option<&SkuMapping>) -> MskuAnalytics {
    let mapped: Vec<MappedRow> = match mapping {
        Some(mapping) => apply_mapping(rows, mapping),
        None => rows.into_iter().map(MappedRow::from_mapped_csv).collect(),
    };
    let analytics = aggregator::aggregate(&mapped);
    tracing::debug!(
        "MSKU analytics: {} rows, {} buckets",
        analytics.summary.total_rows,
        analytics.summary.bucket_count
    );
    analytics
}
