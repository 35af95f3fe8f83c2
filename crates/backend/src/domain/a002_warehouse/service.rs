use contracts::domain::a002_warehouse::{NewWarehouse, Warehouse, WarehouseUpdate};
use sea_orm::DatabaseConnection;

use super::repository;

/// Склад по умолчанию: первый существующий, иначе создаётся
/// "Main Warehouse" / "Default Location"
pub async fn ensure_default(db: &DatabaseConnection) -> anyhow::Result<Warehouse> {
    if let Some(existing) = repository::first(db).await? {
        return Ok(existing);
    }
    let created = repository::insert(db, &NewWarehouse::default_warehouse()).await?;
    tracing::info!("Created default warehouse {}", created.id);
    Ok(created)
}

pub async fn create(db: &DatabaseConnection, warehouse: NewWarehouse) -> anyhow::Result<Warehouse> {
    warehouse
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    Ok(repository::insert(db, &warehouse).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    changes: WarehouseUpdate,
) -> anyhow::Result<Option<Warehouse>> {
    Ok(repository::update(db, id, &changes).await?)
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> anyhow::Result<bool> {
    Ok(repository::delete(db, id).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> anyhow::Result<Option<Warehouse>> {
    Ok(repository::get_by_id(db, id).await?)
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Warehouse>> {
    Ok(repository::list_all(db).await?)
}
