pub mod analysis;
pub mod history;
pub mod request;
pub mod response;
pub mod templates;

pub use analysis::AnalysisResult;
pub use history::{QueryHistory, QueryHistoryEntry, MAX_QUERY_HISTORY};
pub use request::{AiQueryRequest, DisplayMode};
pub use response::{AiQueryResponse, ErrorResponse, INTERNAL_SERVER_ERROR_MESSAGE};
pub use templates::{enhance_question, QUERY_TEMPLATES};

use crate::usecases::common::UseCaseMetadata;

pub struct AiQuery;

impl UseCaseMetadata for AiQuery {
    const INDEX: &'static str = "u502";
    const NAME: &'static str = "ai_query";
    const TITLE: &'static str = "Ask your data";
}
