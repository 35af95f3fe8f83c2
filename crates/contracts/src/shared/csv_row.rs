use serde::{Deserialize, Serialize};

use super::ordered_map::OrderedStringMap;

pub const SKU_COLUMN: &str = "SKU";
pub const MSKU_COLUMN: &str = "MSKU";
pub const QUANTITY_COLUMN: &str = "Quantity";

/// Строка CSV: колонка → значение, в порядке заголовка файла
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CsvRow(OrderedStringMap);

impl CsvRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.0.get(column)
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.0.insert(column, value);
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Первое непустое значение среди перечисленных колонок
    pub fn first_non_empty(&self, columns: &[&str]) -> Option<&str> {
        columns
            .iter()
            .filter_map(|c| self.get(c))
            .find(|v| !v.is_empty())
    }

    pub fn sku(&self) -> Option<&str> {
        self.first_non_empty(&["SKU", "sku"])
    }

    pub fn msku(&self) -> Option<&str> {
        self.first_non_empty(&["MSKU", "msku"])
    }

    pub fn quantity_raw(&self) -> Option<&str> {
        self.first_non_empty(&["Quantity", "quantity"])
    }

    pub fn product_name(&self) -> Option<&str> {
        self.first_non_empty(&["ProductName", "Name"])
    }

    pub fn description(&self) -> Option<&str> {
        self.first_non_empty(&["Description", "description"])
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CsvRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        CsvRow(iter.into_iter().collect())
    }
}

/// Строка CSV с проставленным MSKU
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MappedRow(CsvRow);

impl MappedRow {
    /// Проставляет MSKU; существующая колонка MSKU перезаписывается на месте
    pub fn new(mut row: CsvRow, msku: impl Into<String>) -> Self {
        row.set(MSKU_COLUMN, msku);
        Self(row)
    }

    /// Строка из файла, уже прошедшего сопоставление.
    /// Пустой или отсутствующий MSKU превращается в UNMAPPED
    pub fn from_mapped_csv(row: CsvRow) -> Self {
        let msku = match row.get(MSKU_COLUMN) {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => crate::domain::a006_sku_mapping::UNMAPPED.to_string(),
        };
        Self::new(row, msku)
    }

    pub fn msku(&self) -> &str {
        self.0.get(MSKU_COLUMN).unwrap_or_default()
    }

    pub fn row(&self) -> &CsvRow {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_variant_fallback() {
        let row: CsvRow = vec![("sku", "A1"), ("Name", "Widget"), ("quantity", "4")]
            .into_iter()
            .collect();
        assert_eq!(row.sku(), Some("A1"));
        assert_eq!(row.product_name(), Some("Widget"));
        assert_eq!(row.quantity_raw(), Some("4"));
        assert_eq!(row.msku(), None);
    }

    #[test]
    fn test_empty_value_falls_through() {
        let row: CsvRow = vec![("SKU", ""), ("sku", "B2")].into_iter().collect();
        assert_eq!(row.sku(), Some("B2"));
    }

    #[test]
    fn test_mapped_row_overwrites_existing_msku_in_place() {
        let row: CsvRow = vec![("MSKU", "old"), ("SKU", "A")].into_iter().collect();
        let mapped = MappedRow::new(row, "new");
        let columns: Vec<&str> = mapped.row().columns().collect();
        assert_eq!(columns, vec!["MSKU", "SKU"]);
        assert_eq!(mapped.msku(), "new");
    }

    #[test]
    fn test_from_mapped_csv_defaults_to_unmapped() {
        let row: CsvRow = vec![("MSKU", ""), ("Quantity", "3")].into_iter().collect();
        assert_eq!(MappedRow::from_mapped_csv(row).msku(), "UNMAPPED");
    }
}
