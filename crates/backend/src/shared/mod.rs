pub mod app_state;
pub mod config;
pub mod csv_ingest;
pub mod data;
pub mod format;
pub mod llm;
pub mod local_store;

pub use app_state::AppState;
