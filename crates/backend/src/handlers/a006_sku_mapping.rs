use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a006_sku_mapping::{
    ApplyMappingRequest, ApplyMappingResponse, ResetMappingRequest, SkuMapEntry, SkuMapping,
};

use super::common::{bad_request, internal, json_body, not_found, HandlerError, HandlerResult};
use crate::domain::a006_sku_mapping::{apply_mapping, count_unmapped, SkuMapError};
use crate::shared::csv_ingest::parse_csv_text;
use crate::shared::AppState;

fn map_error(e: SkuMapError) -> HandlerError {
    match e {
        SkuMapError::Validation(message) => bad_request(message),
        SkuMapError::Storage(_) => internal("sku mapping storage", e),
    }
}

/// GET /api/sku-mapping
pub async fn snapshot(State(state): State<AppState>) -> Json<SkuMapping> {
    let store = state.sku_map.read().unwrap();
    Json(store.snapshot().clone())
}

/// GET /api/sku-mapping/:sku
pub async fn get(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> HandlerResult<SkuMapEntry> {
    let store = state.sku_map.read().unwrap();
    match store.snapshot().get(sku.trim()) {
        Some(msku) => Ok(Json(SkuMapEntry {
            sku: sku.trim().to_string(),
            msku: msku.to_string(),
        })),
        None => Err(not_found("SKU mapping")),
    }
}

/// POST /api/sku-mapping, PUT /api/sku-mapping
pub async fn set(
    State(state): State<AppState>,
    payload: Result<Json<SkuMapEntry>, JsonRejection>,
) -> HandlerResult<SkuMapEntry> {
    let entry = json_body(payload)?;
    let mut store = state.sku_map.write().unwrap();
    store.set(&entry.sku, &entry.msku).map(Json).map_err(map_error)
}

/// DELETE /api/sku-mapping/:sku
pub async fn remove(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> Result<StatusCode, HandlerError> {
    let mut store = state.sku_map.write().unwrap();
    // Удаление отсутствующего SKU не ошибка
    store
        .remove(&sku)
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(map_error)
}

/// POST /api/sku-mapping/reset
pub async fn reset(
    State(state): State<AppState>,
    payload: Result<Json<ResetMappingRequest>, JsonRejection>,
) -> HandlerResult<SkuMapping> {
    let request = json_body(payload)?;
    if !request.confirm {
        return Err(bad_request("Reset requires confirmation"));
    }
    let mut store = state.sku_map.write().unwrap();
    store.reset_to_default().map_err(map_error)?;
    Ok(Json(store.snapshot().clone()))
}

/// POST /api/sku-mapping/apply
pub async fn apply(
    State(state): State<AppState>,
    payload: Result<Json<ApplyMappingRequest>, JsonRejection>,
) -> HandlerResult<ApplyMappingResponse> {
    let request = json_body(payload)?;
    let rows = parse_csv_text(&request.csv_text).map_err(|e| bad_request(e.to_string()))?;

    let store = state.sku_map.read().unwrap();
    let rows = apply_mapping(rows, store.snapshot());
    let unmapped_count = count_unmapped(&rows);
    tracing::info!(
        "Applied SKU mapping to {} rows ({} unmapped)",
        rows.len(),
        unmapped_count
    );
    Ok(Json(ApplyMappingResponse {
        rows,
        unmapped_count,
    }))
}
