use contracts::domain::a003_inventory::{Inventory, InventoryUpdate, InventoryWithDetails};
use sea_orm::DatabaseConnection;

use super::repository;

/// Размер пачки при массовом обновлении остатков
pub const INVENTORY_BATCH_SIZE: usize = 50;

/// Upsert по паре (товар, склад); `last_updated` ставится всегда
pub async fn update_quantity(
    db: &DatabaseConnection,
    product_id: &str,
    warehouse_id: &str,
    quantity: i64,
) -> anyhow::Result<Inventory> {
    let inventory = match repository::find_pair(db, product_id, warehouse_id).await? {
        Some(existing) => repository::set_quantity(db, existing, quantity).await?,
        None => repository::insert(db, product_id, warehouse_id, quantity).await?,
    };
    Ok(inventory)
}

/// Пачки по INVENTORY_BATCH_SIZE последовательно.
/// Первая ошибка прерывает обработку, уже записанное не откатывается
pub async fn bulk_update(db: &DatabaseConnection, updates: &[InventoryUpdate]) -> anyhow::Result<usize> {
    let mut applied = 0;
    for (batch_index, batch) in updates.chunks(INVENTORY_BATCH_SIZE).enumerate() {
        tracing::debug!(
            "Inventory batch {} ({} items)",
            batch_index + 1,
            batch.len()
        );
        for update in batch {
            update_quantity(db, &update.product_id, &update.warehouse_id, update.quantity).await?;
            applied += 1;
        }
    }
    Ok(applied)
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<InventoryWithDetails>> {
    Ok(repository::list_all(db).await?)
}

pub async fn list_by_product(
    db: &DatabaseConnection,
    product_id: &str,
) -> anyhow::Result<Vec<InventoryWithDetails>> {
    Ok(repository::list_by_product(db, product_id).await?)
}

pub async fn list_by_warehouse(
    db: &DatabaseConnection,
    warehouse_id: &str,
) -> anyhow::Result<Vec<InventoryWithDetails>> {
    Ok(repository::list_by_warehouse(db, warehouse_id).await?)
}
