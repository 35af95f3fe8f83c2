use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use contracts::usecases::u501_upload_inventory_csv::{LastUploadResponse, UploadRequest, UploadResult};

use super::common::{bad_request, internal, json_body, HandlerResult};
use crate::shared::AppState;
use crate::usecases::u501_upload_inventory_csv::{last_upload, UploadError};

/// POST /api/upload
pub async fn upload(
    State(state): State<AppState>,
    payload: Result<Json<UploadRequest>, JsonRejection>,
) -> HandlerResult<UploadResult> {
    let request = json_body(payload)?;
    match state.upload_executor().execute(request).await {
        Ok(result) => Ok(Json(result)),
        Err(UploadError::Validation(message)) => Err(bad_request(message)),
        Err(UploadError::Internal(e)) => Err(internal("upload inventory csv", e)),
    }
}

/// GET /api/upload/last
pub async fn last(State(state): State<AppState>) -> HandlerResult<LastUploadResponse> {
    last_upload(state.local_store.as_ref())
        .map(Json)
        .map_err(|e| internal("read last upload", e))
}
