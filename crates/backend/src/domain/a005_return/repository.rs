use contracts::domain::a005_return::{NewReturn, NewReturnItem, ReturnItem, SaleReturn};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::{unique_keys, INSERT_BATCH_ROWS, MAX_IN_LIST};

mod sale_return {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "returns")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub sale_id: String,
        pub return_date: String,
        pub reason: Option<String>,
        pub status: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

mod return_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "return_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub return_id: String,
        pub product_id: String,
        pub quantity: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<sale_return::Model> for SaleReturn {
    fn from(m: sale_return::Model) -> Self {
        SaleReturn {
            id: m.id,
            sale_id: m.sale_id,
            return_date: m.return_date,
            reason: m.reason,
            status: m.status,
        }
    }
}

impl From<return_item::Model> for ReturnItem {
    fn from(m: return_item::Model) -> Self {
        ReturnItem {
            id: m.id,
            return_id: m.return_id,
            product_id: m.product_id,
            quantity: m.quantity,
        }
    }
}

/// Все возвраты, новые (по return_date) первыми
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<SaleReturn>, DbErr> {
    let models = sale_return::Entity::find()
        .order_by_desc(sale_return::Column::ReturnDate)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn list_by_sale_id(
    db: &DatabaseConnection,
    sale_id: &str,
) -> Result<Vec<SaleReturn>, DbErr> {
    let models = sale_return::Entity::find()
        .filter(sale_return::Column::SaleId.eq(sale_id))
        .order_by_desc(sale_return::Column::ReturnDate)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<SaleReturn>, DbErr> {
    let model = sale_return::Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Into::into))
}

pub async fn insert<C: ConnectionTrait>(db: &C, new_return: &NewReturn) -> Result<SaleReturn, DbErr> {
    let active = sale_return::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        sale_id: Set(new_return.sale_id.clone()),
        return_date: Set(new_return.return_date.clone()),
        reason: Set(new_return.reason.clone()),
        status: Set(new_return.status.clone()),
    };
    let model = active.insert(db).await?;
    Ok(model.into())
}

/// Строки нескольких возвратов одним запросом
pub async fn find_items_by_return_ids<C: ConnectionTrait>(
    db: &C,
    return_ids: &[String],
) -> Result<Vec<ReturnItem>, DbErr> {
    if return_ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for chunk in unique_keys(return_ids).chunks(MAX_IN_LIST) {
        let models = return_item::Entity::find()
            .filter(return_item::Column::ReturnId.is_in(chunk.iter().cloned()))
            .all(db)
            .await?;
        found.extend(models.into_iter().map(Into::into));
    }
    Ok(found)
}

pub async fn insert_items<C: ConnectionTrait>(
    db: &C,
    return_id: &str,
    items: &[NewReturnItem],
) -> Result<(), DbErr> {
    if items.is_empty() {
        return Ok(());
    }
    let active_models: Vec<return_item::ActiveModel> = items
        .iter()
        .map(|item| return_item::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            return_id: Set(return_id.to_string()),
            product_id: Set(item.product_id.clone()),
            quantity: Set(item.quantity),
        })
        .collect();
    for chunk in active_models.chunks(INSERT_BATCH_ROWS) {
        return_item::Entity::insert_many(chunk.to_vec())
            .exec_without_returning(db)
            .await?;
    }
    Ok(())
}
