use contracts::dashboards::d400_msku_analytics::{AggregateBucket, AnalyticsSummary, MskuAnalytics};
use contracts::domain::a006_sku_mapping::UNMAPPED;
use contracts::shared::csv_row::QUANTITY_COLUMN;
use contracts::shared::MappedRow;

/// Количество из ячейки: trim + число; пусто, мусор, NaN и ±inf дают 0
pub fn parse_quantity(raw: Option<&str>) -> f64 {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Группировка по MSKU и сумма количества
pub fn aggregate(rows: &[MappedRow]) -> MskuAnalytics {
    aggregate_pairs(
        rows.iter().map(|r| {
            (
                r.msku().to_string(),
                parse_quantity(r.row().get(QUANTITY_COLUMN)),
            )
        }),
        rows.len(),
    )
}

/// Общая часть для CSV и остатков из базы: пары (группа, количество).
///
/// Группы сортируются по убыванию суммы; при равенстве остаётся порядок
/// первого появления. Пустая группа считается UNMAPPED.
pub fn aggregate_pairs<I>(pairs: I, total_rows: usize) -> MskuAnalytics
where
    I: IntoIterator<Item = (String, f64)>,
{
    let mut buckets: Vec<AggregateBucket> = Vec::new();
    for (msku, quantity) in pairs {
        let msku = if msku.is_empty() {
            UNMAPPED.to_string()
        } else {
            msku
        };
        match buckets.iter_mut().find(|b| b.msku == msku) {
            Some(bucket) => bucket.total_quantity += quantity,
            None => buckets.push(AggregateBucket {
                msku,
                total_quantity: quantity,
                percentage: 0.0,
            }),
        }
    }

    // sort_by стабильна: равные суммы сохраняют порядок появления
    buckets.sort_by(|a, b| {
        b.total_quantity
            .partial_cmp(&a.total_quantity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let total_quantity: f64 = buckets.iter().map(|b| b.total_quantity).sum();
    if total_quantity != 0.0 {
        for bucket in &mut buckets {
            bucket.percentage = bucket.total_quantity / total_quantity * 100.0;
        }
    }

    let summary = AnalyticsSummary {
        total_rows,
        bucket_count: buckets.len(),
        total_quantity,
        top_bucket: buckets.first().cloned(),
    };

    MskuAnalytics { buckets, summary }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::CsvRow;

    fn mapped(msku: &str, quantity: &str) -> MappedRow {
        let row: CsvRow = [("SKU", "x"), ("Quantity", quantity)].into_iter().collect();
        MappedRow::new(row, msku)
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity(Some(" 5 ")), 5.0);
        assert_eq!(parse_quantity(Some("2.5")), 2.5);
        assert_eq!(parse_quantity(Some("abc")), 0.0);
        assert_eq!(parse_quantity(Some("")), 0.0);
        assert_eq!(parse_quantity(Some("NaN")), 0.0);
        assert_eq!(parse_quantity(Some("inf")), 0.0);
        assert_eq!(parse_quantity(None), 0.0);
    }

    #[test]
    fn test_aggregate_groups_and_sorts() {
        let rows = vec![
            mapped("Golden Apple", "5"),
            mapped("Red Banana", "3"),
            mapped("Golden Apple", "2"),
        ];
        let result = aggregate(&rows);
        assert_eq!(result.buckets.len(), 2);
        assert_eq!(result.buckets[0].msku, "Golden Apple");
        assert_eq!(result.buckets[0].total_quantity, 7.0);
        assert_eq!(result.buckets[1].total_quantity, 3.0);
        assert_eq!(result.summary.total_rows, 3);
        assert_eq!(result.summary.total_quantity, 10.0);
        assert_eq!(result.buckets[0].percentage, 70.0);
        assert_eq!(
            result.summary.top_bucket.as_ref().map(|b| b.msku.as_str()),
            Some("Golden Apple")
        );
    }

    #[test]
    fn test_ties_keep_first_encounter_order() {
        let rows = vec![mapped("B", "1"), mapped("A", "1"), mapped("C", "4")];
        let result = aggregate(&rows);
        let order: Vec<&str> = result.buckets.iter().map(|b| b.msku.as_str()).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_bad_quantities_count_as_zero() {
        let rows = vec![mapped("A", "n/a"), mapped("", "4")];
        let result = aggregate(&rows);
        assert_eq!(result.buckets[0].msku, UNMAPPED);
        assert_eq!(result.buckets[1].total_quantity, 0.0);
        assert_eq!(result.buckets[1].percentage, 0.0);
    }

    #[test]
    fn test_empty_input() {
        let result = aggregate(&[]);
        assert!(result.buckets.is_empty());
        assert_eq!(result.summary, AnalyticsSummary::default());
    }
}
