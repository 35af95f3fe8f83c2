use std::sync::{Arc, RwLock};

use sea_orm::DatabaseConnection;

use crate::domain::a006_sku_mapping::SkuMapStore;
use crate::shared::llm::LlmProvider;
use crate::shared::local_store::LocalStore;
use crate::usecases::u501_upload_inventory_csv::UploadExecutor;
use crate::usecases::u502_ai_query::{AiQueryExecutor, QueryHistoryStore};

/// Состояние приложения: создаётся один раз при старте и передаётся
/// в handlers через `State`
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub local_store: Arc<dyn LocalStore>,
    pub sku_map: Arc<RwLock<SkuMapStore>>,
    pub ai_query: AiQueryExecutor,
}

impl AppState {
    /// Таблица SKU загружается из хранилища (или инициализируется по умолчанию)
    pub fn new(
        db: DatabaseConnection,
        local_store: Arc<dyn LocalStore>,
        llm: Arc<dyn LlmProvider>,
    ) -> anyhow::Result<Self> {
        let sku_map = SkuMapStore::load(local_store.clone())?;
        let ai_query = AiQueryExecutor::new(llm, QueryHistoryStore::new(local_store.clone()));
        Ok(Self {
            db,
            local_store,
            sku_map: Arc::new(RwLock::new(sku_map)),
            ai_query,
        })
    }

    pub fn upload_executor(&self) -> UploadExecutor {
        UploadExecutor::new(self.db.clone(), self.local_store.clone())
    }
}
