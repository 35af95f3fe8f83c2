use axum::extract::State;
use axum::Json;
use contracts::dashboards::d401_inventory_overview::InventoryOverview;

use super::common::{internal, HandlerResult};
use crate::dashboards::d401_inventory_overview::service;
use crate::shared::AppState;

/// GET /api/dashboard
pub async fn overview(State(state): State<AppState>) -> HandlerResult<InventoryOverview> {
    let ai_queries = match state.ai_query.history().load() {
        Ok(history) => history.len(),
        Err(e) => {
            tracing::warn!("Failed to read query history: {}", e);
            0
        }
    };
    service::get_overview(&state.db, ai_queries)
        .await
        .map(Json)
        .map_err(|e| internal("inventory overview", e))
}
