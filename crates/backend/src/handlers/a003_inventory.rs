use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use contracts::domain::a003_inventory::{Inventory, InventoryUpdate, InventoryWithDetails};
use serde_json::json;

use super::common::{bad_request, internal, json_body, HandlerResult};
use crate::domain::a003_inventory;
use crate::shared::AppState;

/// GET /api/inventory
pub async fn list_all(State(state): State<AppState>) -> HandlerResult<Vec<InventoryWithDetails>> {
    a003_inventory::service::list_all(&state.db)
        .await
        .map(Json)
        .map_err(|e| internal("list inventory", e))
}

/// GET /api/inventory/product/:id
pub async fn list_by_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> HandlerResult<Vec<InventoryWithDetails>> {
    a003_inventory::service::list_by_product(&state.db, &product_id)
        .await
        .map(Json)
        .map_err(|e| internal("list inventory by product", e))
}

/// GET /api/inventory/warehouse/:id
pub async fn list_by_warehouse(
    State(state): State<AppState>,
    Path(warehouse_id): Path<String>,
) -> HandlerResult<Vec<InventoryWithDetails>> {
    a003_inventory::service::list_by_warehouse(&state.db, &warehouse_id)
        .await
        .map(Json)
        .map_err(|e| internal("list inventory by warehouse", e))
}

/// PUT /api/inventory
pub async fn update_quantity(
    State(state): State<AppState>,
    payload: Result<Json<InventoryUpdate>, JsonRejection>,
) -> HandlerResult<Inventory> {
    let update = json_body(payload)?;
    update.validate().map_err(bad_request)?;
    a003_inventory::service::update_quantity(
        &state.db,
        &update.product_id,
        &update.warehouse_id,
        update.quantity,
    )
    .await
    .map(Json)
    .map_err(|e| internal("update inventory", e))
}

/// POST /api/inventory/bulk
pub async fn bulk_update(
    State(state): State<AppState>,
    payload: Result<Json<Vec<InventoryUpdate>>, JsonRejection>,
) -> HandlerResult<serde_json::Value> {
    let updates = json_body(payload)?;
    if let Some(err) = updates.iter().find_map(|u| u.validate().err()) {
        return Err(bad_request(err));
    }
    a003_inventory::service::bulk_update(&state.db, &updates)
        .await
        .map(|applied| Json(json!({ "updated": applied })))
        .map_err(|e| internal("bulk update inventory", e))
}
