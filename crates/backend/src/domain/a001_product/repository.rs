use std::collections::HashMap;

use chrono::Utc;
use contracts::domain::a001_product::{NewProduct, Product, ProductUpdate};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use uuid::Uuid;

use crate::shared::data::db::{unique_keys, INSERT_BATCH_ROWS, MAX_IN_LIST};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub sku: String,
    pub msku: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            id: m.id,
            sku: m.sku,
            msku: m.msku,
            name: m.name,
            description: m.description,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

fn new_active_model(product: &NewProduct, now: &str) -> ActiveModel {
    ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        sku: Set(product.sku.clone()),
        msku: Set(product.msku.clone()),
        name: Set(product.name.clone()),
        description: Set(product.description.clone()),
        created_at: Set(now.to_string()),
        updated_at: Set(now.to_string()),
    }
}

pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Product>, DbErr> {
    let models = Entity::find().order_by_asc(Column::Sku).all(db).await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Product>, DbErr> {
    let model = Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Into::into))
}

/// Поиск по SKU: точное совпадение с учётом регистра
pub async fn get_by_sku(db: &DatabaseConnection, sku: &str) -> Result<Option<Product>, DbErr> {
    let model = Entity::find().filter(Column::Sku.eq(sku)).one(db).await?;
    Ok(model.map(Into::into))
}

pub async fn find_by_skus<C: ConnectionTrait>(
    db: &C,
    skus: &[String],
) -> Result<Vec<Product>, DbErr> {
    if skus.is_empty() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for chunk in unique_keys(skus).chunks(MAX_IN_LIST) {
        let models = Entity::find()
            .filter(Column::Sku.is_in(chunk.iter().cloned()))
            .all(db)
            .await?;
        found.extend(models.into_iter().map(Into::into));
    }
    Ok(found)
}

/// Товары по списку id (для раскрытия ссылок в остатках, продажах, возвратах)
pub async fn find_by_ids<C: ConnectionTrait>(
    db: &C,
    ids: &[String],
) -> Result<Vec<Product>, DbErr> {
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

pub async fn insert(db: &DatabaseConnection, product: &NewProduct) -> Result<Product, DbErr> {
    let now = Utc::now().to_rfc3339();
    let model = new_active_model(product, &now).insert(db).await?;
    Ok(model.into())
}

/// Пакетная вставка в одной транзакции, частями по INSERT_BATCH_ROWS строк.
/// Возвращает созданные записи в порядке входа
pub async fn insert_many(
    db: &DatabaseConnection,
    products: &[NewProduct],
) -> Result<Vec<Product>, DbErr> {
    if products.is_empty() {
        return Ok(Vec::new());
    }
    let now = Utc::now().to_rfc3339();
    let mut ids = Vec::with_capacity(products.len());

    let txn = db.begin().await?;
    for chunk in products.chunks(INSERT_BATCH_ROWS) {
        let active_models: Vec<ActiveModel> = chunk
            .iter()
            .map(|p| {
                let model = new_active_model(p, &now);
                if let ActiveValue::Set(id) = &model.id {
                    ids.push(id.clone());
                }
                model
            })
            .collect();
        Entity::insert_many(active_models)
            .exec_without_returning(&txn)
            .await?;
    }
    txn.commit().await?;

    let position: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    let mut inserted = find_by_ids(db, &ids).await?;
    inserted.sort_by_key(|p| position.get(p.id.as_str()).copied());
    Ok(inserted)
}

/// Частичное обновление, `updated_at` проставляется всегда.
/// `None` — записи с таким id нет
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    changes: &ProductUpdate,
) -> Result<Option<Product>, DbErr> {
    let Some(existing) = Entity::find_by_id(id.to_string()).one(db).await? else {
        return Ok(None);
    };

    let mut active: ActiveModel = existing.into();
    if let Some(sku) = &changes.sku {
        active.sku = Set(sku.clone());
    }
    if let Some(msku) = &changes.msku {
        active.msku = Set(msku.clone());
    }
    if let Some(name) = &changes.name {
        active.name = Set(name.clone());
    }
    if let Some(description) = &changes.description {
        active.description = Set(Some(description.clone()));
    }
    active.updated_at = Set(Utc::now().to_rfc3339());

    let model = active.update(db).await?;
    Ok(Some(model.into()))
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> Result<bool, DbErr> {
    let result = Entity::delete_by_id(id.to_string()).exec(db).await?;
    Ok(result.rows_affected > 0)
}
