pub mod executor;
pub mod history;
pub mod prompt;

pub use executor::{AiQueryError, AiQueryExecutor, QueryState};
pub use history::QueryHistoryStore;
