use std::collections::HashMap;
use std::sync::RwLock;

use super::LocalStore;

/// Хранилище в памяти (тесты, запуск без диска)
#[derive(Default)]
pub struct MemoryLocalStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>> {
        let items = self.items.read().unwrap();
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut items = self.items.write().unwrap();
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        let mut items = self.items.write().unwrap();
        items.remove(key);
        Ok(())
    }
}
