use std::collections::HashMap;

use contracts::domain::a004_sale::SaleRef;
use contracts::domain::a005_return::{
    CreateReturnRequest, ReturnItemWithProduct, ReturnWithItems, SaleReturn,
};
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use super::repository;
use crate::domain::a004_sale;

/// Раскрытие: строки (+товар) и номер заказа продажи
async fn with_items<C: ConnectionTrait>(
    db: &C,
    returns: Vec<SaleReturn>,
) -> anyhow::Result<Vec<ReturnWithItems>> {
    let return_ids: Vec<String> = returns.iter().map(|r| r.id.clone()).collect();
    let sale_ids: Vec<String> = returns.iter().map(|r| r.sale_id.clone()).collect();

    let items = repository::find_items_by_return_ids(db, &return_ids).await?;
    let products =
        a004_sale::service::product_refs(db, items.iter().map(|i| i.product_id.clone()).collect())
            .await?;
    let sales: HashMap<String, SaleRef> = a004_sale::repository::find_by_ids(db, &sale_ids)
        .await?
        .into_iter()
        .map(|s| {
            (
                s.id,
                SaleRef {
                    order_number: s.order_number,
                },
            )
        })
        .collect();

    let mut items_by_return: HashMap<String, Vec<ReturnItemWithProduct>> = HashMap::new();
    for item in items {
        let product = products.get(&item.product_id).cloned();
        items_by_return
            .entry(item.return_id.clone())
            .or_default()
            .push(ReturnItemWithProduct { item, product });
    }

    Ok(returns
        .into_iter()
        .map(|sale_return| ReturnWithItems {
            items: items_by_return.remove(&sale_return.id).unwrap_or_default(),
            sale: sales.get(&sale_return.sale_id).cloned(),
            sale_return,
        })
        .collect())
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<ReturnWithItems>> {
    let returns = repository::list_all(db).await?;
    with_items(db, returns).await
}

pub async fn list_by_sale_id(
    db: &DatabaseConnection,
    sale_id: &str,
) -> anyhow::Result<Vec<ReturnWithItems>> {
    let returns = repository::list_by_sale_id(db, sale_id).await?;
    with_items(db, returns).await
}

/// Возврат и его строки одной транзакцией SQLite.
/// Вызывающий код на атомичность не полагается
pub async fn create_with_items(
    db: &DatabaseConnection,
    request: CreateReturnRequest,
) -> anyhow::Result<ReturnWithItems> {
    request
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;

    let txn = db.begin().await?;
    let created = repository::insert(&txn, &request.return_data).await?;
    repository::insert_items(&txn, &created.id, &request.items).await?;
    txn.commit().await?;

    tracing::info!(
        "Created return {} for sale {} ({} items)",
        created.id,
        created.sale_id,
        request.items.len()
    );

    let Some(stored) = repository::get_by_id(db, &created.id).await? else {
        return Err(anyhow::anyhow!("Return {} not found after insert", created.id));
    };
    with_items(db, vec![stored])
        .await?
        .pop()
        .ok_or_else(|| anyhow::anyhow!("Return {} not found after insert", created.id))
}
