use std::sync::Arc;

use contracts::domain::a006_sku_mapping::{validate_entry, SkuMapEntry, SkuMapping};
use thiserror::Error;

use crate::shared::local_store::{LocalStore, SKU_MAPPINGS_KEY};

#[derive(Debug, Error)]
pub enum SkuMapError {
    #[error("{0}")]
    Validation(String),

    #[error("Failed to persist SKU mappings: {0}")]
    Storage(#[source] anyhow::Error),
}

/// Таблица SKU → MSKU, сохраняемая целиком в локальное хранилище
/// под ключом `skuMappings` после каждого изменения.
pub struct SkuMapStore {
    mapping: SkuMapping,
    local_store: Arc<dyn LocalStore>,
}

impl SkuMapStore {
    /// Загрузка сохранённой таблицы. Нет записи или она не читается —
    /// берётся встроенный набор и сразу сохраняется
    pub fn load(local_store: Arc<dyn LocalStore>) -> Result<Self, SkuMapError> {
        let stored = local_store
            .get_item(SKU_MAPPINGS_KEY)
            .map_err(SkuMapError::Storage)?;

        let parsed = stored.as_deref().and_then(|json| {
            serde_json::from_str::<SkuMapping>(json)
                .map_err(|e| tracing::warn!("Stored SKU mappings are unreadable: {}", e))
                .ok()
        });

        match parsed {
            Some(mapping) => {
                tracing::info!("Loaded {} SKU mappings", mapping.len());
                Ok(Self {
                    mapping,
                    local_store,
                })
            }
            None => {
                let store = Self {
                    mapping: SkuMapping::builtin_default(),
                    local_store,
                };
                store.persist(&store.mapping)?;
                tracing::info!("Initialized default SKU mappings");
                Ok(store)
            }
        }
    }

    fn persist(&self, mapping: &SkuMapping) -> Result<(), SkuMapError> {
        let json = serde_json::to_string(mapping).map_err(|e| SkuMapError::Storage(e.into()))?;
        self.local_store
            .set_item(SKU_MAPPINGS_KEY, &json)
            .map_err(SkuMapError::Storage)
    }

    /// Запись в хранилище, затем в память: при ошибке записи состояние не меняется
    fn commit(&mut self, next: SkuMapping) -> Result<(), SkuMapError> {
        self.persist(&next)?;
        self.mapping = next;
        Ok(())
    }

    /// MSKU для SKU (после trim, с учётом регистра) или UNMAPPED
    pub fn get(&self, raw_sku: &str) -> &str {
        self.mapping.resolve(raw_sku)
    }

    /// Добавить или перезаписать пару. Порядок существующих записей сохраняется
    pub fn set(&mut self, raw_sku: &str, msku: &str) -> Result<SkuMapEntry, SkuMapError> {
        validate_entry(raw_sku, msku).map_err(SkuMapError::Validation)?;
        let entry = SkuMapEntry {
            sku: raw_sku.trim().to_string(),
            msku: msku.trim().to_string(),
        };

        let mut next = self.mapping.clone();
        next.insert(entry.sku.clone(), entry.msku.clone());
        self.commit(next)?;

        tracing::info!("SKU mapping set: {} -> {}", entry.sku, entry.msku);
        Ok(entry)
    }

    /// `false`, если такого SKU не было (хранилище не трогается)
    pub fn remove(&mut self, raw_sku: &str) -> Result<bool, SkuMapError> {
        let sku = raw_sku.trim();
        if self.mapping.get(sku).is_none() {
            return Ok(false);
        }
        let mut next = self.mapping.clone();
        next.remove(sku);
        self.commit(next)?;

        tracing::info!("SKU mapping removed: {}", sku);
        Ok(true)
    }

    pub fn reset_to_default(&mut self) -> Result<(), SkuMapError> {
        self.commit(SkuMapping::builtin_default())?;
        tracing::info!("SKU mappings reset to defaults");
        Ok(())
    }

    pub fn snapshot(&self) -> &SkuMapping {
        &self.mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::local_store::MemoryLocalStore;
    use contracts::domain::a006_sku_mapping::UNMAPPED;

    fn memory_store() -> Arc<dyn LocalStore> {
        Arc::new(MemoryLocalStore::new())
    }

    #[test]
    fn test_load_initializes_and_persists_default() {
        let local = memory_store();
        let store = SkuMapStore::load(local.clone()).unwrap();
        assert_eq!(store.snapshot().len(), 5);
        assert_eq!(store.get("GA123"), "Golden Apple");

        let saved = local.get_item(SKU_MAPPINGS_KEY).unwrap().unwrap();
        assert!(saved.starts_with(r#"{"GLD":"Golden Apple""#));
    }

    #[test]
    fn test_load_falls_back_on_garbage() {
        let local = memory_store();
        local.set_item(SKU_MAPPINGS_KEY, "not json").unwrap();
        let store = SkuMapStore::load(local.clone()).unwrap();
        assert_eq!(store.snapshot(), &SkuMapping::builtin_default());
        assert_ne!(local.get_item(SKU_MAPPINGS_KEY).unwrap().unwrap(), "not json");
    }

    #[test]
    fn test_load_keeps_stored_mapping() {
        let local = memory_store();
        local.set_item(SKU_MAPPINGS_KEY, r#"{"A1":"Apple"}"#).unwrap();
        let store = SkuMapStore::load(local).unwrap();
        assert_eq!(store.snapshot().len(), 1);
        assert_eq!(store.get("GLD"), UNMAPPED);
    }

    #[test]
    fn test_set_trims_and_persists() {
        let local = memory_store();
        let mut store = SkuMapStore::load(local.clone()).unwrap();
        let entry = store.set("  XY-1 ", " Apple ").unwrap();
        assert_eq!(entry.sku, "XY-1");
        assert_eq!(store.get("XY-1"), "Apple");

        let reloaded = SkuMapStore::load(local).unwrap();
        assert_eq!(reloaded.get("XY-1"), "Apple");
    }

    #[test]
    fn test_set_overwrites_in_place() {
        let mut store = SkuMapStore::load(memory_store()).unwrap();
        store.set("GLD", "Gold").unwrap();
        let first = store.snapshot().iter().next().unwrap();
        assert_eq!(first, ("GLD", "Gold"));
        assert_eq!(store.snapshot().len(), 5);
    }

    #[test]
    fn test_set_rejects_invalid() {
        let mut store = SkuMapStore::load(memory_store()).unwrap();
        assert!(matches!(
            store.set("", "Apple"),
            Err(SkuMapError::Validation(_))
        ));
        assert!(matches!(
            store.set("A", "Apple"),
            Err(SkuMapError::Validation(_))
        ));
        assert_eq!(store.snapshot().len(), 5);
    }

    #[test]
    fn test_remove_and_reset() {
        let mut store = SkuMapStore::load(memory_store()).unwrap();
        assert!(store.remove("RDB").unwrap());
        assert!(!store.remove("RDB").unwrap());
        assert_eq!(store.get("RDB"), UNMAPPED);

        store.set("ZZ", "Zucchini").unwrap();
        store.reset_to_default().unwrap();
        assert_eq!(store.snapshot(), &SkuMapping::builtin_default());
    }
}
