use std::sync::{Arc, Mutex};

use contracts::usecases::u502_ai_query::QueryHistory;

use crate::shared::local_store::{LocalStore, AI_QUERY_HISTORY_KEY};

/// История вопросов в локальном хранилище (`aiQueryHistory`).
///
/// Клоны делят одну блокировку: чтение-изменение-запись в `record`
/// и `clear` не перемежаются между параллельными запросами.
#[derive(Clone)]
pub struct QueryHistoryStore {
    local_store: Arc<dyn LocalStore>,
    write_lock: Arc<Mutex<()>>,
}

impl QueryHistoryStore {
    pub fn new(local_store: Arc<dyn LocalStore>) -> Self {
        Self {
            local_store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Нечитаемая запись считается пустой историей
    pub fn load(&self) -> anyhow::Result<QueryHistory> {
        let Some(json) = self.local_store.get_item(AI_QUERY_HISTORY_KEY)? else {
            return Ok(QueryHistory::default());
        };
        Ok(serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!("Stored query history is unreadable: {}", e);
            QueryHistory::default()
        }))
    }

    pub fn record(&self, question: &str) -> anyhow::Result<QueryHistory> {
        let _guard = self.write_lock.lock().unwrap();
        let mut history = self.load()?;
        history.push(question, chrono::Utc::now().timestamp_millis());
        self.local_store
            .set_item(AI_QUERY_HISTORY_KEY, &serde_json::to_string(&history)?)?;
        Ok(history)
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        let _guard = self.write_lock.lock().unwrap();
        self.local_store.remove_item(AI_QUERY_HISTORY_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::local_store::MemoryLocalStore;
    use contracts::usecases::u502_ai_query::MAX_QUERY_HISTORY;

    #[test]
    fn test_record_load_clear() {
        let store = QueryHistoryStore::new(Arc::new(MemoryLocalStore::new()));
        assert!(store.load().unwrap().is_empty());

        for i in 0..11 {
            store.record(&format!("question {}", i)).unwrap();
        }
        let history = store.load().unwrap();
        assert_eq!(history.len(), MAX_QUERY_HISTORY);
        assert_eq!(history.entries()[0].question, "question 10");

        store.clear().unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_records_are_all_kept() {
        let store = QueryHistoryStore::new(Arc::new(MemoryLocalStore::new()));

        let tasks: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                tokio::task::spawn_blocking(move || {
                    store.record(&format!("question {}", i)).unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let history = store.load().unwrap();
        assert_eq!(history.len(), 8);
        let mut questions: Vec<_> = history
            .entries()
            .iter()
            .map(|e| e.question.clone())
            .collect();
        questions.sort();
        let expected: Vec<_> = (0..8).map(|i| format!("question {}", i)).collect();
        assert_eq!(questions, expected);
    }

    #[test]
    fn test_unreadable_history_is_empty() {
        let local = Arc::new(MemoryLocalStore::new());
        local.set_item(AI_QUERY_HISTORY_KEY, "[{\"oops\":1}]").unwrap();
        let store = QueryHistoryStore::new(local);
        assert!(store.load().unwrap().is_empty());
        assert_eq!(store.record("next").unwrap().len(), 1);
    }
}
