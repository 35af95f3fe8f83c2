use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a004_sale::{CreateSaleRequest, Sale, SaleWithItems, UpdateSaleStatus};
use contracts::domain::a005_return::ReturnWithItems;

use super::common::{bad_request, internal, json_body, not_found, HandlerError, HandlerResult};
use crate::domain::{a004_sale, a005_return};
use crate::shared::AppState;

/// GET /api/sales
pub async fn list_all(State(state): State<AppState>) -> HandlerResult<Vec<Sale>> {
    a004_sale::service::list_all(&state.db)
        .await
        .map(Json)
        .map_err(|e| internal("list sales", e))
}

/// GET /api/sales/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<SaleWithItems> {
    match a004_sale::service::get_with_items(&state.db, &id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(not_found("Sale")),
        Err(e) => Err(internal("get sale", e)),
    }
}

/// POST /api/sales
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateSaleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SaleWithItems>), HandlerError> {
    let request = json_body(payload)?;
    request.validate().map_err(bad_request)?;
    a004_sale::service::create_with_items(&state.db, request)
        .await
        .map(|s| (StatusCode::CREATED, Json(s)))
        .map_err(|e| internal("create sale", e))
}

/// PUT /api/sales/:id/status
pub async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSaleStatus>, JsonRejection>,
) -> HandlerResult<Sale> {
    let body = json_body(payload)?;
    if body.status.trim().is_empty() {
        return Err(bad_request("status is required"));
    }
    match a004_sale::service::update_status(&state.db, &id, &body.status).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(not_found("Sale")),
        Err(e) => Err(internal("update sale status", e)),
    }
}

/// GET /api/sales/:id/returns
pub async fn list_returns(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Vec<ReturnWithItems>> {
    a005_return::service::list_by_sale_id(&state.db, &id)
        .await
        .map(Json)
        .map_err(|e| internal("list returns by sale", e))
}
