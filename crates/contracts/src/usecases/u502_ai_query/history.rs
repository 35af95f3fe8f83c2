use serde::{Deserialize, Serialize};

pub const MAX_QUERY_HISTORY: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryHistoryEntry {
    pub question: String,
    /// Unix-время в миллисекундах
    pub timestamp: i64,
}

/// История вопросов: новые сверху, не больше MAX_QUERY_HISTORY
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryHistory(Vec<QueryHistoryEntry>);

impl QueryHistory {
    pub fn push(&mut self, question: impl Into<String>, timestamp: i64) {
        self.0.insert(
            0,
            QueryHistoryEntry {
                question: question.into(),
                timestamp,
            },
        );
        self.0.truncate(MAX_QUERY_HISTORY);
    }

    pub fn entries(&self) -> &[QueryHistoryEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
