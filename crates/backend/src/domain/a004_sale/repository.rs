use contracts::domain::a004_sale::{NewSale, NewSaleItem, Sale, SaleItem};
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::shared::data::db::{unique_keys, INSERT_BATCH_ROWS, MAX_IN_LIST};

pub mod sale {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "sales")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub order_number: String,
        pub customer_name: Option<String>,
        pub sale_date: String,
        pub total_amount: f64,
        pub status: String,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub mod sale_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "sale_items")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub sale_id: String,
        pub product_id: String,
        pub quantity: i64,
        pub unit_price: f64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

impl From<sale::Model> for Sale {
    fn from(m: sale::Model) -> Self {
        Sale {
            id: m.id,
            order_number: m.order_number,
            customer_name: m.customer_name,
            sale_date: m.sale_date,
            total_amount: m.total_amount,
            status: m.status,
        }
    }
}

impl From<sale_item::Model> for SaleItem {
    fn from(m: sale_item::Model) -> Self {
        SaleItem {
            id: m.id,
            sale_id: m.sale_id,
            product_id: m.product_id,
            quantity: m.quantity,
            unit_price: m.unit_price,
        }
    }
}

// ============================================================================
// Sales
// ============================================================================

/// Все продажи, новые (по sale_date) первыми
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Sale>, DbErr> {
    let models = sale::Entity::find()
        .order_by_desc(sale::Column::SaleDate)
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn get_by_id<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<Sale>, DbErr> {
    let model = sale::Entity::find_by_id(id.to_string()).one(db).await?;
    Ok(model.map(Into::into))
}

pub async fn find_by_ids<C: ConnectionTrait>(db: &C, ids: &[String]) -> Result<Vec<Sale>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut found = Vec::new();
    for chunk in unique_keys(ids).chunks(MAX_IN_LIST) {
        let models = sale::Entity::find()
            .filter(sale::Column::Id.is_in(chunk.iter().cloned()))
            .all(db)
            .await?;
        found.extend(models.into_iter().map(Into::into));
    }
    Ok(found)
}

pub async fn insert<C: ConnectionTrait>(db: &C, new_sale: &NewSale) -> Result<Sale, DbErr> {
    let active = sale::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        order_number: Set(new_sale.order_number.clone()),
        customer_name: Set(new_sale.customer_name.clone()),
        sale_date: Set(new_sale.sale_date.clone()),
        total_amount: Set(new_sale.total_amount),
        status: Set(new_sale.status.clone()),
    };
    let model = active.insert(db).await?;
    Ok(model.into())
}

pub async fn update_status(
    db: &DatabaseConnection,
    id: &str,
    status: &str,
) -> Result<Option<Sale>, DbErr> {
    let Some(existing) = sale::Entity::find_by_id(id.to_string()).one(db).await? else {
        return Ok(None);
    };
    let mut active: sale::ActiveModel = existing.into();
    active.status = Set(status.to_string());
    let model = active.update(db).await?;
    Ok(Some(model.into()))
}

// ============================================================================
// Sale items
// ============================================================================

pub async fn find_items_by_sale_id<C: ConnectionTrait>(
    db: &C,
    sale_id: &str,
) -> Result<Vec<SaleItem>, DbErr> {
    let models = sale_item::Entity::find()
        .filter(sale_item::Column::SaleId.eq(sale_id))
        .all(db)
        .await?;
    Ok(models.into_iter().map(Into::into).collect())
}

pub async fn insert_items<C: ConnectionTrait>(
    db: &C,
    sale_id: &str,
    items: &[NewSaleItem],
) -> Result<(), DbErr> {
    if items.is_empty() {
        return Ok(());
    }
    let active_models: Vec<sale_item::ActiveModel> = items
        .iter()
        .map(|item| sale_item::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            sale_id: Set(sale_id.to_string()),
            product_id: Set(item.product_id.clone()),
            quantity: Set(item.quantity),
            unit_price: Set(item.unit_price),
        })
        .collect();
    for chunk in active_models.chunks(INSERT_BATCH_ROWS) {
        sale_item::Entity::insert_many(chunk.to_vec())
            .exec_without_returning(db)
            .await?;
    }
    Ok(())
}
