use serde::{Deserialize, Serialize};

use crate::shared::{MappedRow, OrderedStringMap};

/// Значение MSKU для SKU, которого нет в таблице сопоставления
pub const UNMAPPED: &str = "UNMAPPED";

/// Встроенный набор сопоставлений (восстанавливается при сбросе)
const DEFAULT_ENTRIES: &[(&str, &str)] = &[
    ("GLD", "Golden Apple"),
    ("Golden Apple", "Golden Apple"),
    ("GA123", "Golden Apple"),
    ("RDB", "Red Banana"),
    ("Red Banana", "Red Banana"),
];

/// Пара SKU → MSKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkuMapEntry {
    pub sku: String,
    pub msku: String,
}

/// Таблица сопоставления SKU → MSKU.
///
/// Хранится и передаётся целиком как JSON-объект `{"SKU": "MSKU", ...}`,
/// порядок записей сохраняется.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkuMapping(OrderedStringMap);

impl SkuMapping {
    pub fn builtin_default() -> Self {
        SkuMapping(DEFAULT_ENTRIES.iter().copied().collect())
    }

    pub fn get(&self, sku: &str) -> Option<&str> {
        self.0.get(sku)
    }

    /// MSKU для SKU или UNMAPPED
    pub fn resolve(&self, sku: &str) -> &str {
        self.0.get(sku.trim()).unwrap_or(UNMAPPED)
    }

    pub fn insert(&mut self, sku: impl Into<String>, msku: impl Into<String>) {
        self.0.insert(sku, msku);
    }

    pub fn remove(&mut self, sku: &str) -> Option<String> {
        self.0.remove(sku)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter()
    }

    pub fn entries(&self) -> Vec<SkuMapEntry> {
        self.0
            .iter()
            .map(|(sku, msku)| SkuMapEntry {
                sku: sku.to_string(),
                msku: msku.to_string(),
            })
            .collect()
    }
}

fn is_valid_sku_format(sku: &str) -> bool {
    sku.chars().count() >= 2
        && sku
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || c == '-')
}

/// Проверка пары перед записью. Значения проверяются после trim
pub fn validate_entry(sku: &str, msku: &str) -> Result<(), String> {
    let sku = sku.trim();
    let msku = msku.trim();
    if sku.is_empty() || msku.is_empty() {
        return Err("Both SKU and MSKU fields are required".into());
    }
    if !is_valid_sku_format(sku) {
        return Err("SKU must contain at least 2 alphanumeric characters".into());
    }
    Ok(())
}

/// Сброс к встроенному набору требует явного подтверждения
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResetMappingRequest {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyMappingRequest {
    #[serde(rename = "csvText")]
    pub csv_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyMappingResponse {
    pub rows: Vec<MappedRow>,
    pub unmapped_count: usize,
}
