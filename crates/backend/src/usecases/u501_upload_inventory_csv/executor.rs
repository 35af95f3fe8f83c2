use std::collections::HashMap;
use std::sync::Arc;

use contracts::domain::a001_product::NewProduct;
use contracts::domain::a003_inventory::InventoryUpdate;
use contracts::domain::a006_sku_mapping::UNMAPPED;
use contracts::shared::CsvRow;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_upload_inventory_csv::{
    LastUploadResponse, UploadInventoryCsv, UploadRequest, UploadResult,
};
use sea_orm::DatabaseConnection;
use thiserror::Error;

use crate::domain::{a001_product, a002_warehouse, a003_inventory};
use crate::shared::csv_ingest::parse_csv_text;
use crate::shared::local_store::{LocalStore, LAST_CSV_DATA_KEY};

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Целое из начала строки (знак и цифры после пробелов), иначе 0.
/// "12.7" → 12, "5 pcs" → 5, "abc" → 0
pub fn parse_int_prefix(raw: Option<&str>) -> i64 {
    let Some(text) = raw.map(str::trim_start) else {
        return 0;
    };
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    match digits[..end].parse::<i64>() {
        Ok(v) if negative => -v,
        Ok(v) => v,
        Err(_) => 0,
    }
}

/// Кандидат в товары из строки CSV. `None` — в строке нет SKU.
/// Имя: ProductName, Name, иначе сам SKU
fn product_candidate(row: &CsvRow) -> Option<NewProduct> {
    let sku = row.sku().map(str::trim).filter(|s| !s.is_empty())?;
    Some(NewProduct {
        sku: sku.to_string(),
        msku: row.msku().unwrap_or(UNMAPPED).to_string(),
        name: row.product_name().unwrap_or(sku).to_string(),
        description: Some(row.description().unwrap_or_default().to_string()),
    })
}

/// Executor загрузки остатков из CSV
pub struct UploadExecutor {
    db: DatabaseConnection,
    local_store: Arc<dyn LocalStore>,
}

impl UploadExecutor {
    pub fn new(db: DatabaseConnection, local_store: Arc<dyn LocalStore>) -> Self {
        Self { db, local_store }
    }

    pub async fn execute(&self, request: UploadRequest) -> Result<UploadResult, UploadError> {
        tracing::info!(
            "{}: file {}",
            UploadInventoryCsv::full_name(),
            request.file_name.as_deref().unwrap_or("<inline>")
        );

        let rows = parse_csv_text(&request.csv_text)
            .map_err(|e| UploadError::Validation(format!("Invalid CSV: {}", e)))?;
        if rows.is_empty() {
            return Err(UploadError::Validation("No data to save".into()));
        }

        let mut candidates = Vec::with_capacity(rows.len());
        let mut quantities: HashMap<String, i64> = HashMap::new();
        let mut skipped_rows = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            match product_candidate(row) {
                Some(candidate) => {
                    quantities.insert(candidate.sku.clone(), parse_int_prefix(row.quantity_raw()));
                    candidates.push(candidate);
                }
                None => skipped_rows.push(index + 1),
            }
        }
        if !skipped_rows.is_empty() {
            tracing::warn!("Skipped {} rows without SKU", skipped_rows.len());
        }

        let warehouse = a002_warehouse::service::ensure_default(&self.db).await?;
        let imported = a001_product::service::bulk_import(&self.db, candidates).await?;
        let created_count = imported.created.len();
        let updated_count = imported.updated.len();
        let products = imported.into_products();

        // Количество сопоставляется по SKU, а не по позиции строки
        let updates: Vec<InventoryUpdate> = products
            .iter()
            .map(|p| InventoryUpdate {
                product_id: p.id.clone(),
                warehouse_id: warehouse.id.clone(),
                quantity: quantities.get(&p.sku).copied().unwrap_or(0),
            })
            .collect();
        let inventory_updates = a003_inventory::service::bulk_update(&self.db, &updates).await?;

        self.mirror_rows(&rows);

        let message = success_message(rows.len());
        tracing::info!("{}", message);

        Ok(UploadResult {
            imported_count: products.len(),
            created_count,
            updated_count,
            skipped_rows,
            inventory_updates,
            warehouse_id: warehouse.id,
            message,
        })
    }

    /// Копия строк под `lastCSVData`; ошибка записи не отменяет загрузку
    fn mirror_rows(&self, rows: &[CsvRow]) {
        let result = serde_json::to_string(rows)
            .map_err(anyhow::Error::from)
            .and_then(|json| self.local_store.set_item(LAST_CSV_DATA_KEY, &json));
        if let Err(e) = result {
            tracing::warn!("Failed to store last CSV data: {}", e);
        }
    }
}

/// Последняя загруженная таблица; нечитаемая запись — пустой список
pub fn last_upload(local_store: &dyn LocalStore) -> anyhow::Result<LastUploadResponse> {
    let rows = match local_store.get_item(LAST_CSV_DATA_KEY)? {
        Some(json) => serde_json::from_str::<Vec<CsvRow>>(&json).unwrap_or_else(|e| {
            tracing::warn!("Stored CSV data is unreadable: {}", e);
            Vec::new()
        }),
        None => Vec::new(),
    };
    Ok(LastUploadResponse { rows })
}

/// Число строк без разделителей разрядов
fn success_message(rows: usize) -> String {
    format!(
        "Data saved successfully! {} records imported to database.",
        rows
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::local_store::MemoryLocalStore;

    #[test]
    fn test_parse_int_prefix() {
        assert_eq!(parse_int_prefix(Some("42")), 42);
        assert_eq!(parse_int_prefix(Some(" 12.7")), 12);
        assert_eq!(parse_int_prefix(Some("5 pcs")), 5);
        assert_eq!(parse_int_prefix(Some("-3")), -3);
        assert_eq!(parse_int_prefix(Some("abc")), 0);
        assert_eq!(parse_int_prefix(Some("")), 0);
        assert_eq!(parse_int_prefix(None), 0);
    }

    #[test]
    fn test_product_candidate_fallbacks() {
        let row: CsvRow = [("sku", "GLD"), ("Quantity", "5")].into_iter().collect();
        let candidate = product_candidate(&row).unwrap();
        assert_eq!(candidate.sku, "GLD");
        assert_eq!(candidate.msku, UNMAPPED);
        assert_eq!(candidate.name, "GLD");
        assert_eq!(candidate.description.as_deref(), Some(""));

        let row: CsvRow = [
            ("SKU", "RDB"),
            ("MSKU", "Red Banana"),
            ("Name", "Banana"),
            ("description", "Yellow"),
        ]
        .into_iter()
        .collect();
        let candidate = product_candidate(&row).unwrap();
        assert_eq!(candidate.msku, "Red Banana");
        assert_eq!(candidate.name, "Banana");
        assert_eq!(candidate.description.as_deref(), Some("Yellow"));
    }

    #[test]
    fn test_success_message_has_plain_count() {
        assert_eq!(
            success_message(1234),
            "Data saved successfully! 1234 records imported to database."
        );
        assert_eq!(
            success_message(4),
            "Data saved successfully! 4 records imported to database."
        );
    }

    #[test]
    fn test_row_without_sku_is_skipped() {
        let row: CsvRow = [("SKU", "  "), ("Quantity", "5")].into_iter().collect();
        assert!(product_candidate(&row).is_none());
    }

    #[test]
    fn test_last_upload_tolerates_garbage() {
        let store = MemoryLocalStore::new();
        assert!(last_upload(&store).unwrap().rows.is_empty());
        store.set_item(LAST_CSV_DATA_KEY, "{broken").unwrap();
        assert!(last_upload(&store).unwrap().rows.is_empty());
        store
            .set_item(LAST_CSV_DATA_KEY, r#"[{"SKU":"GLD","Quantity":"5"}]"#)
            .unwrap();
        assert_eq!(last_upload(&store).unwrap().rows[0].sku(), Some("GLD"));
    }
}
