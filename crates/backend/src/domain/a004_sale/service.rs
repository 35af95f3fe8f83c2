use std::collections::HashMap;

use contracts::domain::a001_product::ProductRef;
use contracts::domain::a004_sale::{
    CreateSaleRequest, Sale, SaleItem, SaleItemWithProduct, SaleWithItems,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use super::repository;
use crate::domain::a001_product;

/// Строки с раскрытым товаром (общая логика для продаж и возвратов)
pub(crate) async fn product_refs<C: ConnectionTrait>(
    db: &C,
    product_ids: Vec<String>,
) -> anyhow::Result<HashMap<String, ProductRef>> {
    Ok(a001_product::repository::find_by_ids(db, &product_ids)
        .await?
        .iter()
        .map(|p| (p.id.clone(), ProductRef::from(p)))
        .collect())
}

async fn items_with_products<C: ConnectionTrait>(
    db: &C,
    items: Vec<SaleItem>,
) -> anyhow::Result<Vec<SaleItemWithProduct>> {
    let products = product_refs(db, items.iter().map(|i| i.product_id.clone()).collect()).await?;
    Ok(items
        .into_iter()
        .map(|item| SaleItemWithProduct {
            product: products.get(&item.product_id).cloned(),
            item,
        })
        .collect())
}

async fn load_with_items<C: ConnectionTrait>(
    db: &C,
    id: &str,
) -> anyhow::Result<Option<SaleWithItems>> {
    let Some(sale) = repository::get_by_id(db, id).await? else {
        return Ok(None);
    };
    let items = repository::find_items_by_sale_id(db, id).await?;
    Ok(Some(SaleWithItems {
        sale,
        items: items_with_products(db, items).await?,
    }))
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Sale>> {
    Ok(repository::list_all(db).await?)
}

pub async fn get_with_items(
    db: &DatabaseConnection,
    id: &str,
) -> anyhow::Result<Option<SaleWithItems>> {
    load_with_items(db, id).await
}

/// Продажа и её строки одной транзакцией SQLite.
/// Вызывающий код на атомичность не полагается
pub async fn create_with_items(
    db: &DatabaseConnection,
    request: CreateSaleRequest,
) -> anyhow::Result<SaleWithItems> {
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let txn = db.begin().await?;
    let sale = repository::insert(&txn, &request.sale).await?;
    repository::insert_items(&txn, &sale.id, &request.items).await?;
    txn.commit().await?;

    tracing::info!(
        "Created sale {} ({} items)",
        sale.order_number,
        request.items.len()
    );

    load_with_items(db, &sale.id)
        .await?
        .ok_or_else(|| anyhow::anyhow!("Sale {} not found after insert", sale.id))
}

pub async fn update_status(
    db: &DatabaseConnection,
    id: &str,
    status: &str,
) -> anyhow::Result<Option<Sale>> {
    Ok(repository::update_status(db, id, status).await?)
}
