use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::a001_product::ProductRef;
use contracts::domain::a002_warehouse::WarehouseRef;
use contracts::domain::a003_inventory::{Inventory, InventoryWithDetails};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use crate::domain::{a001_product, a002_warehouse};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: String,
    pub warehouse_id: String,
    pub quantity: i64,
    pub last_updated: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Inventory {
    fn from(m: Model) -> Self {
        Inventory {
            id: m.id,
            product_id: m.product_id,
            warehouse_id: m.warehouse_id,
            quantity: m.quantity,
            last_updated: m.last_updated,
        }
    }
}

/// Раскрытие ссылок на товар и склад (один уровень, двумя запросами)
async fn with_details(
    db: &DatabaseConnection,
    models: Vec<Model>,
) -> Result<Vec<InventoryWithDetails>, DbErr> {
    let product_ids: Vec<String> = models.iter().map(|m| m.product_id.clone()).collect();
    let warehouse_ids: Vec<String> = models.iter().map(|m| m.warehouse_id.clone()).collect();

    let products: HashMap<String, ProductRef> = a001_product::repository::find_by_ids(db, &product_ids)
        .await?
        .iter()
        .map(|p| (p.id.clone(), ProductRef::from(p)))
        .collect();
    let warehouses: HashMap<String, WarehouseRef> =
        a002_warehouse::repository::find_by_ids(db, &warehouse_ids)
            .await?
            .iter()
            .map(|w| (w.id.clone(), WarehouseRef::from(w)))
            .collect();

    Ok(models
        .into_iter()
        .map(|m| InventoryWithDetails {
            product: products.get(&m.product_id).cloned(),
            warehouse: warehouses.get(&m.warehouse_id).cloned(),
            inventory: m.into(),
        })
        .collect())
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<InventoryWithDetails>, DbErr> {
    let models = Entity::find().all(db).await?;
    with_details(db, models).await
}

pub async fn list_by_product(
    db: &DatabaseConnection,
    product_id: &str,
) -> Result<Vec<InventoryWithDetails>, DbErr> {
    let models = Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .all(db)
        .await?;
    with_details(db, models).await
}

pub async fn list_by_warehouse(
    db: &DatabaseConnection,
    warehouse_id: &str,
) -> Result<Vec<InventoryWithDetails>, DbErr> {
    let models = Entity::find()
        .filter(Column::WarehouseId.eq(warehouse_id))
        .all(db)
        .await?;
    with_details(db, models).await
}

/// Запись для пары (товар, склад) — уникальна по схеме
pub async fn find_pair(
    db: &DatabaseConnection,
    product_id: &str,
    warehouse_id: &str,
) -> Result<Option<Model>, DbErr> {
    Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .filter(Column::WarehouseId.eq(warehouse_id))
        .one(db)
        .await
}

pub async fn insert(
    db: &DatabaseConnection,
    product_id: &str,
    warehouse_id: &str,
    quantity: i64,
) -> Result<Inventory, DbErr> {
    let active = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        product_id: Set(product_id.to_string()),
        warehouse_id: Set(warehouse_id.to_string()),
        quantity: Set(quantity),
        last_updated: Set(Utc::now().to_rfc3339()),
    };
    let model = active.insert(db).await?;
    Ok(model.into())
}

pub async fn set_quantity(
    db: &DatabaseConnection,
    existing: Model,
    quantity: i64,
) -> Result<Inventory, DbErr> {
    let mut active: ActiveModel = existing.into();
    active.quantity = Set(quantity);
    active.last_updated = Set(Utc::now().to_rfc3339());
    let model = active.update(db).await?;
    Ok(model.into())
}
