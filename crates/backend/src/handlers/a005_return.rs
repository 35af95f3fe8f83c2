use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a005_return::{CreateReturnRequest, ReturnWithItems};

use super::common::{bad_request, internal, json_body, HandlerError, HandlerResult};
use crate::domain::a005_return;
use crate::shared::AppState;

/// GET /api/returns
pub async fn list_all(State(state): State<AppState>) -> HandlerResult<Vec<ReturnWithItems>> {
    a005_return::service::list_all(&state.db)
        .await
        .map(Json)
        .map_err(|e| internal("list returns", e))
}

/// POST /api/returns
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateReturnRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReturnWithItems>), HandlerError> {
    let request = json_body(payload)?;
    request.validate().map_err(bad_request)?;
    a005_return::service::create_with_items(&state.db, request)
        .await
        .map(|r| (StatusCode::CREATED, Json(r)))
        .map_err(|e| internal("create return", e))
}
