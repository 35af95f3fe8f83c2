use contracts::domain::a006_sku_mapping::{SkuMapping, UNMAPPED};
use contracts::shared::csv_row::SKU_COLUMN;
use contracts::shared::{CsvRow, MappedRow};

/// Проставляет MSKU каждой строке по колонке `SKU`.
///
/// Длина и порядок сохраняются; таблица только читается.
/// Нет колонки или значения — строка получает UNMAPPED.
pub fn apply_mapping(rows: Vec<CsvRow>, mapping: &SkuMapping) -> Vec<MappedRow> {
    rows.into_iter()
        .map(|row| {
            let msku = mapping
                .resolve(row.get(SKU_COLUMN).unwrap_or_default())
                .to_string();
            MappedRow::new(row, msku)
        })
        .collect()
}

pub fn count_unmapped(rows: &[MappedRow]) -> usize {
    rows.iter().filter(|r| r.msku() == UNMAPPED).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> CsvRow {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_apply_default_mapping() {
        let rows = vec![
            row(&[("SKU", "GLD"), ("Quantity", "5")]),
            row(&[("SKU", " RDB "), ("Quantity", "3")]),
            row(&[("SKU", "XYZ"), ("Quantity", "1")]),
        ];
        let mapped = apply_mapping(rows, &SkuMapping::builtin_default());
        assert_eq!(mapped.len(), 3);
        assert_eq!(mapped[0].msku(), "Golden Apple");
        assert_eq!(mapped[1].msku(), "Red Banana");
        assert_eq!(mapped[2].msku(), UNMAPPED);
        assert_eq!(mapped[1].row().get("SKU"), Some(" RDB "));
        assert_eq!(count_unmapped(&mapped), 1);
    }

    #[test]
    fn test_missing_sku_column_is_unmapped() {
        let mapped = apply_mapping(
            vec![row(&[("sku", "GLD"), ("Quantity", "5")])],
            &SkuMapping::builtin_default(),
        );
        assert_eq!(mapped[0].msku(), UNMAPPED);
    }

    #[test]
    fn test_existing_msku_overwritten_in_place() {
        let mapped = apply_mapping(
            vec![row(&[("SKU", "GLD"), ("MSKU", "old"), ("Quantity", "2")])],
            &SkuMapping::builtin_default(),
        );
        let columns: Vec<&str> = mapped[0].row().columns().collect();
        assert_eq!(columns, vec!["SKU", "MSKU", "Quantity"]);
        assert_eq!(mapped[0].msku(), "Golden Apple");
    }

    #[test]
    fn test_empty_mapping() {
        let mapped = apply_mapping(vec![row(&[("SKU", "GLD")])], &SkuMapping::default());
        assert_eq!(mapped[0].msku(), UNMAPPED);
        assert!(apply_mapping(Vec::new(), &SkuMapping::default()).is_empty());
    }
}
