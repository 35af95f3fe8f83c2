use chrono::Utc;
use contracts::domain::a002_warehouse::{NewWarehouse, Warehouse, WarehouseUpdate};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::{unique_keys, MAX_IN_LIST};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "warehouses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub location: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Warehouse {
    fn from(m: Model) -> Self {
        Warehouse {
            id: m.id,
            name: m.name,
            location: m.location,
            created_at: m.created_at,
        }
    }
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Warehouse>, DbErr> {
    let models = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

/// Самый ранний склад
pub async fn first(db: &DatabaseConnection) -> Result<Option<Warehouse>, DbErr> {
    let model = Entity::find()
        .order_by_asc(Column::CreatedAt)
        .one(db)
        .await?;
    Ok(model.map(Into::into))
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Warehouse>, DbErr> {
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Into::into))
}

pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[String],
) -> Result<Vec<Warehouse>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for chunk in unique_keys(ids).chunks(MAX_IN_LIST) {
        let models = Entity::find()
            .filter(Column::Id.is_in(chunk.iter().cloned()))
            .all(db)
            .await?;
        found.extend(models.into_iter().map(Into::into));
    }
    Ok(found)
}

pub async fn insert(db: &DatabaseConnection, warehouse: &NewWarehouse) -> Result<Warehouse, DbErr> {
    let active = ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        name: Set(warehouse.name.clone()),
        location: Set(warehouse.location.clone()),
        created_at: Set(Utc::now().to_rfc3339()),
    };
    let model = active.insert(db).await?;
    Ok(model.into())
}

pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    changes: &WarehouseUpdate,
) -> Result<Option<Warehouse>, DbErr> {
    let Some(existing) = Entity::find_by_id(id.to_string()).one(db).await? else {
        return Ok(None);
    };

    let mut active: ActiveModel = existing.into();
    if let Some(name) = &changes.name {
        active.name = Set(name.clone());
    }
    if let Some(location) = &changes.location {
        active.location = Set(location.clone());
    }
    let model = active.update(db).await?;
    Ok(Some(model.into()))
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
