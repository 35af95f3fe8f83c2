use std::collections::HashSet;

use contracts::dashboards::d401_inventory_overview::InventoryOverview;
use contracts::domain::a003_inventory::InventoryWithDetails;
use sea_orm::DatabaseConnection;

use crate::dashboards::d400_msku_analytics::aggregate_pairs;
use crate::domain::a003_inventory;
use crate::shared::format::{format_count, format_quantity};

const UNKNOWN_GROUP: &str = "Unknown";

/// Группа для графика: MSKU товара, иначе SKU, иначе Unknown
fn chart_group(item: &InventoryWithDetails) -> String {
    item.product
        .as_ref()
        .and_then(|p| {
            [p.msku.as_str(), p.sku.as_str()]
                .into_iter()
                .find(|v| !v.is_empty())
        })
        .unwrap_or(UNKNOWN_GROUP)
        .to_string()
}

pub fn build_overview(items: &[InventoryWithDetails], ai_queries: usize) -> InventoryOverview {
    let total_products = items
        .iter()
        .map(|i| i.product.as_ref().map(|p| p.sku.as_str()))
        .collect::<HashSet<_>>()
        .len();
    let unique_mskus = items
        .iter()
        .map(|i| {
            i.product
                .as_ref()
                .map(|p| p.msku.as_str())
                .filter(|m| !m.is_empty())
                .unwrap_or(UNKNOWN_GROUP)
        })
        .collect::<HashSet<_>>()
        .len();

    let analytics = aggregate_pairs(
        items
            .iter()
            .map(|i| (chart_group(i), i.inventory.quantity as f64)),
        items.len(),
    );

    InventoryOverview {
        total_products,
        unique_mskus,
        total_quantity: analytics.summary.total_quantity,
        top_msku: analytics.summary.top_bucket.map(|b| b.msku),
        ai_queries,
        by_msku: analytics.buckets,
    }
}

pub async fn get_overview(
    db: &DatabaseConnection,
    ai_queries: usize,
) -> anyhow::Result<InventoryOverview> {
    let items = a003_inventory::service::list_all(db).await?;
    let overview = build_overview(&items, ai_queries);
    tracing::info!(
        "Inventory overview: {} products, {} MSKU, {} units",
        format_count(overview.total_products),
        format_count(overview.unique_mskus),
        format_quantity(overview.total_quantity)
    );
    Ok(overview)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::ProductRef;
    use contracts::domain::a003_inventory::Inventory;

    fn item(sku: &str, msku: &str, quantity: i64) -> InventoryWithDetails {
        InventoryWithDetails {
            inventory: Inventory {
                id: format!("inv-{}", sku),
                product_id: format!("p-{}", sku),
                warehouse_id: "w1".into(),
                quantity,
                last_updated: "2024-01-01T00:00:00+00:00".into(),
            },
            product: Some(ProductRef {
                id: format!("p-{}", sku),
                sku: sku.into(),
                msku: msku.into(),
                name: sku.into(),
            }),
            warehouse: None,
        }
    }

    #[test]
    fn test_overview_metrics() {
        let items = vec![
            item("GLD", "Golden Apple", 5),
            item("GA123", "Golden Apple", 2),
            item("RDB", "Red Banana", 3),
            item("XYZ", "", 1),
        ];
        let overview = build_overview(&items, 4);
        assert_eq!(overview.total_products, 4);
        assert_eq!(overview.unique_mskus, 3);
        assert_eq!(overview.total_quantity, 11.0);
        assert_eq!(overview.top_msku.as_deref(), Some("Golden Apple"));
        assert_eq!(overview.ai_queries, 4);
        // без MSKU группа по SKU
        assert!(overview.by_msku.iter().any(|b| b.msku == "XYZ"));
    }

    #[test]
    fn test_empty_inventory() {
        let overview = build_overview(&[], 0);
        assert_eq!(overview.total_products, 0);
        assert!(overview.top_msku.is_none());
        assert!(overview.by_msku.is_empty());
    }
}
