use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a002_warehouse::{NewWarehouse, Warehouse, WarehouseUpdate};

use super::common::{bad_request, internal, json_body, not_found, HandlerError, HandlerResult};
use crate::domain::a002_warehouse;
use crate::shared::AppState;

/// GET /api/warehouses
pub async fn list_all(State(state): State<AppState>) -> HandlerResult<Vec<Warehouse>> {
    a002_warehouse::service::list_all(&state.db)
        .await
        .map(Json)
        .map_err(|e| internal("list warehouses", e))
}

/// GET /api/warehouses/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Warehouse> {
    match a002_warehouse::service::get_by_id(&state.db, &id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(not_found("Warehouse")),
        Err(e) => Err(internal("get warehouse", e)),
    }
}

/// POST /api/warehouses
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewWarehouse>, JsonRejection>,
) -> Result<(StatusCode, Json<Warehouse>), HandlerError> {
    let warehouse = json_body(payload)?;
    warehouse.validate().map_err(bad_request)?;
    a002_warehouse::service::create(&state.db, warehouse)
        .await
        .map(|w| (StatusCode::CREATED, Json(w)))
        .map_err(|e| internal("create warehouse", e))
}

/// PUT /api/warehouses/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<WarehouseUpdate>, JsonRejection>,
) -> HandlerResult<Warehouse> {
    let changes = json_body(payload)?;
    match a002_warehouse::service::update(&state.db, &id, changes).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(not_found("Warehouse")),
        Err(e) => Err(internal("update warehouse", e)),
    }
}

/// DELETE /api/warehouses/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HandlerError> {
    match a002_warehouse::service::delete(&state.db, &id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Warehouse")),
        Err(e) => Err(internal("delete warehouse", e)),
    }
}

/// POST /api/warehouses/default
pub async fn ensure_default(State(state): State<AppState>) -> HandlerResult<Warehouse> {
    a002_warehouse::service::ensure_default(&state.db)
        .await
        .map(Json)
        .map_err(|e| internal("ensure default warehouse", e))
}
