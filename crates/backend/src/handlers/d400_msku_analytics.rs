use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use contracts::dashboards::d400_msku_analytics::{MskuAnalytics, MskuAnalyticsRequest};

use super::common::{bad_request, json_body, HandlerResult};
use crate::dashboards::d400_msku_analytics::service;
use crate::shared::csv_ingest::parse_csv_text;
use crate::shared::AppState;

/// POST /api/analytics/msku
pub async fn msku_analytics(
    State(state): State<AppState>,
    payload: Result<Json<MskuAnalyticsRequest>, JsonRejection>,
) -> HandlerResult<MskuAnalytics> {
    let request = json_body(payload)?;
    let rows = parse_csv_text(&request.csv_text).map_err(|e| bad_request(e.to_string()))?;

    let analytics = if request.apply_mapping {
        let store = state.sku_map.read().unwrap();
        service::msku_analytics(rows, Some(store.snapshot()))
    } else {
        service::msku_analytics(rows, None)
    };
    Ok(Json(analytics))
}
