//! Key/value хранилище вместо browser localStorage.
//!
//! Значения — JSON-строки, запись синхронная, координации между
//! процессами нет: последний писатель побеждает.

pub mod file_store;
pub mod memory_store;

pub use file_store::FileLocalStore;
pub use memory_store::MemoryLocalStore;

/// Таблица сопоставления SKU → MSKU (JSON-объект)
pub const SKU_MAPPINGS_KEY: &str = "skuMappings";
/// История AI-вопросов (JSON-массив, до 10 записей)
pub const AI_QUERY_HISTORY_KEY: &str = "aiQueryHistory";
/// Строки последней загрузки CSV
pub const LAST_CSV_DATA_KEY: &str = "lastCSVData";

pub trait LocalStore: Send + Sync {
    fn get_item(&self, key: &str) -> anyhow::Result<Option<String>>;

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()>;

    fn remove_item(&self, key: &str) -> anyhow::Result<()>;
}
