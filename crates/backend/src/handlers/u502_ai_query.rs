use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::usecases::u502_ai_query::{
    AiQueryRequest, AiQueryResponse, QueryHistory, QUERY_TEMPLATES,
};

use super::common::{bad_request, internal, json_body, HandlerError, HandlerResult};
use crate::shared::AppState;
use crate::usecases::u502_ai_query::AiQueryError;

/// POST /api/ai-query
pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AiQueryRequest>, JsonRejection>,
) -> HandlerResult<AiQueryResponse> {
    let request = json_body(payload)?;
    match state.ai_query.execute(request).await {
        Ok(response) => Ok(Json(response)),
        Err(AiQueryError::Validation(message)) => Err(bad_request(message)),
        Err(e) => Err(internal("Error in /api/ai-query", e)),
    }
}

/// GET /api/ai-query/history
pub async fn history(State(state): State<AppState>) -> HandlerResult<QueryHistory> {
    state
        .ai_query
        .history()
        .load()
        .map(Json)
        .map_err(|e| internal("read query history", e))
}

/// DELETE /api/ai-query/history
pub async fn clear_history(State(state): State<AppState>) -> Result<StatusCode, HandlerError> {
    state
        .ai_query
        .history()
        .clear()
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| internal("clear query history", e))
}

/// GET /api/ai-query/templates
pub async fn templates() -> Json<Vec<&'static str>> {
    Json(QUERY_TEMPLATES.to_vec())
}
