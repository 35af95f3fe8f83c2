use serde::{Deserialize, Serialize};

use crate::shared::CsvRow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    /// Строк с SKU, записанных в базу
    pub imported_count: usize,
    pub created_count: usize,
    pub updated_count: usize,
    /// Номера строк (с 1, без заголовка), пропущенных из-за пустого SKU
    pub skipped_rows: Vec<usize>,
    pub inventory_updates: usize,
    pub warehouse_id: String,
    pub message: String,
}

/// Последняя загруженная таблица (копия в локальном хранилище)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LastUploadResponse {
    pub rows: Vec<CsvRow>,
}
