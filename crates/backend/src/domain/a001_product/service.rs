use std::collections::HashMap;

use contracts::domain::a001_product::{NewProduct, Product, ProductUpdate};
use sea_orm::DatabaseConnection;

use super::repository;

/// Разбиение кандидатов на новые и существующие (по SKU)
#[derive(Debug, Default, PartialEq)]
pub struct ProductImportPlan {
    pub to_create: Vec<NewProduct>,
    /// (id существующего товара, новые значения)
    pub to_update: Vec<(String, NewProduct)>,
}

/// Чистая функция без обращения к базе.
///
/// Повторы SKU внутри пакета схлопываются: остаётся последнее вхождение
/// на позиции первого.
pub fn plan_product_import(candidates: Vec<NewProduct>, existing: &[Product]) -> ProductImportPlan {
    let mut deduped: Vec<NewProduct> = Vec::with_capacity(candidates.len());
    let mut positions: HashMap<String, usize> = HashMap::new();
    for candidate in candidates {
        match positions.get(&candidate.sku) {
            Some(&pos) => deduped[pos] = candidate,
            None => {
                positions.insert(candidate.sku.clone(), deduped.len());
                deduped.push(candidate);
            }
        }
    }

    let existing_ids: HashMap<&str, &str> = existing
        .iter()
        .map(|p| (p.sku.as_str(), p.id.as_str()))
        .collect();

    let mut plan = ProductImportPlan::default();
    for candidate in deduped {
        match existing_ids.get(candidate.sku.as_str()) {
            Some(id) => plan.to_update.push((id.to_string(), candidate)),
            None => plan.to_create.push(candidate),
        }
    }
    plan
}

#[derive(Debug, Default)]
pub struct BulkImportResult {
    pub created: Vec<Product>,
    pub updated: Vec<Product>,
}

impl BulkImportResult {
    /// Новые, затем обновлённые
    pub fn into_products(self) -> Vec<Product> {
        let mut products = self.created;
        products.extend(self.updated);
        products
    }
}

/// Массовый импорт: одна пакетная вставка новых, по одному обновлению
/// на существующий.
/// Атомарности нет: ошибка посередине оставляет уже записанное.
pub async fn bulk_import(
    db: &DatabaseConnection,
    candidates: Vec<NewProduct>,
) -> anyhow::Result<BulkImportResult> {
    let skus: Vec<String> = candidates.iter().map(|c| c.sku.clone()).collect();
    let existing = repository::find_by_skus(db, &skus).await?;
    let plan = plan_product_import(candidates, &existing);

    tracing::info!(
        "Product import: {} to create, {} to update",
        plan.to_create.len(),
        plan.to_update.len()
    );

    let mut result = BulkImportResult {
        created: repository::insert_many(db, &plan.to_create).await?,
        updated: Vec::with_capacity(plan.to_update.len()),
    };

    for (id, product) in plan.to_update {
        match repository::update(db, &id, &ProductUpdate::from(product)).await? {
            Some(updated) => result.updated.push(updated),
            None => tracing::warn!("Product {} disappeared during import", id),
        }
    }

    Ok(result)
}

pub async fn create(db: &DatabaseConnection, product: NewProduct) -> anyhow::Result<Product> {
    product
        .validate()
        .map_err(|e| anyhow::anyhow!("Validation failed: {}", e))?;
    Ok(repository::insert(db, &product).await?)
}

pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    changes: ProductUpdate,
) -> anyhow::Result<Option<Product>> {
    Ok(repository::update(db, id, &changes).await?)
}

pub async fn delete(db: &DatabaseConnection, id: &str) -> anyhow::Result<bool> {
    Ok(repository::delete(db, id).await?)
}

pub async fn get_by_id(db: &DatabaseConnection, id: &str) -> anyhow::Result<Option<Product>> {
    Ok(repository::get_by_id(db, id).await?)
}

pub async fn get_by_sku(db: &DatabaseConnection, sku: &str) -> anyhow::Result<Option<Product>> {
    Ok(repository::get_by_sku(db, sku).await?)
}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Product>> {
    Ok(repository::list_all(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(sku: &str, name: &str) -> NewProduct {
        NewProduct {
            sku: sku.into(),
            msku: "UNMAPPED".into(),
            name: name.into(),
            description: None,
        }
    }

    fn stored(id: &str, sku: &str) -> Product {
        Product {
            id: id.into(),
            sku: sku.into(),
            msku: "UNMAPPED".into(),
            name: sku.into(),
            description: None,
            created_at: "2024-01-01T00:00:00+00:00".into(),
            updated_at: "2024-01-01T00:00:00+00:00".into(),
        }
    }

    #[test]
    fn test_plan_splits_new_and_existing() {
        let plan = plan_product_import(
            vec![candidate("A1", "Apple"), candidate("B1", "Banana")],
            &[stored("id-b1", "B1")],
        );
        assert_eq!(plan.to_create, vec![candidate("A1", "Apple")]);
        assert_eq!(
            plan.to_update,
            vec![("id-b1".to_string(), candidate("B1", "Banana"))]
        );
    }

    #[test]
    fn test_plan_collapses_duplicate_skus() {
        let plan = plan_product_import(
            vec![
                candidate("A1", "first"),
                candidate("B1", "Banana"),
                candidate("A1", "last"),
            ],
            &[],
        );
        assert_eq!(
            plan.to_create,
            vec![candidate("A1", "last"), candidate("B1", "Banana")]
        );
        assert!(plan.to_update.is_empty());
    }

    #[test]
    fn test_plan_is_case_sensitive() {
        let plan = plan_product_import(vec![candidate("gld", "x")], &[stored("id", "GLD")]);
        assert_eq!(plan.to_create.len(), 1);
    }
}
