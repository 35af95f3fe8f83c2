use axum::extract::DefaultBodyLimit;
use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::shared::AppState;
use crate::system::middleware::request_logger;

/// Потолок тела для маршрутов с `csvText`: файл приходит целиком
pub const CSV_BODY_LIMIT: usize = 5 * 1024 * 1024;

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Products
        .route(
            "/api/products",
            get(handlers::a001_product::list_all).post(handlers::a001_product::create),
        )
        .route(
            "/api/products/bulk",
            post(handlers::a001_product::bulk_import),
        )
        .route(
            "/api/products/sku/:sku",
            get(handlers::a001_product::get_by_sku),
        )
        .route(
            "/api/products/:id",
            get(handlers::a001_product::get_by_id)
                .put(handlers::a001_product::update)
                .delete(handlers::a001_product::delete),
        )
        // A002 Warehouses
        .route(
            "/api/warehouses",
            get(handlers::a002_warehouse::list_all).post(handlers::a002_warehouse::create),
        )
        .route(
            "/api/warehouses/default",
            post(handlers::a002_warehouse::ensure_default),
        )
        .route(
            "/api/warehouses/:id",
            get(handlers::a002_warehouse::get_by_id)
                .put(handlers::a002_warehouse::update)
                .delete(handlers::a002_warehouse::delete),
        )
        // A003 Inventory
        .route(
            "/api/inventory",
            get(handlers::a003_inventory::list_all).put(handlers::a003_inventory::update_quantity),
        )
        .route(
            "/api/inventory/bulk",
            post(handlers::a003_inventory::bulk_update),
        )
        .route(
            "/api/inventory/product/:id",
            get(handlers::a003_inventory::list_by_product),
        )
        .route(
            "/api/inventory/warehouse/:id",
            get(handlers::a003_inventory::list_by_warehouse),
        )
        // A004 Sales
        .route(
            "/api/sales",
            get(handlers::a004_sale::list_all).post(handlers::a004_sale::create),
        )
        .route("/api/sales/:id", get(handlers::a004_sale::get_by_id))
        .route(
            "/api/sales/:id/status",
            put(handlers::a004_sale::update_status),
        )
        .route(
            "/api/sales/:id/returns",
            get(handlers::a004_sale::list_returns),
        )
        // A005 Returns
        .route(
            "/api/returns",
            get(handlers::a005_return::list_all).post(handlers::a005_return::create),
        )
        // A006 SKU mapping
        .route(
            "/api/sku-mapping",
            get(handlers::a006_sku_mapping::snapshot)
                .post(handlers::a006_sku_mapping::set)
                .put(handlers::a006_sku_mapping::set),
        )
        .route(
            "/api/sku-mapping/reset",
            post(handlers::a006_sku_mapping::reset),
        )
        .route(
            "/api/sku-mapping/apply",
            post(handlers::a006_sku_mapping::apply).layer(DefaultBodyLimit::max(CSV_BODY_LIMIT)),
        )
        .route(
            "/api/sku-mapping/:sku",
            get(handlers::a006_sku_mapping::get).delete(handlers::a006_sku_mapping::remove),
        )
        // D400 MSKU analytics
        .route(
            "/api/analytics/msku",
            post(handlers::d400_msku_analytics::msku_analytics)
                .layer(DefaultBodyLimit::max(CSV_BODY_LIMIT)),
        )
        // D401 Inventory overview
        .route(
            "/api/dashboard",
            get(handlers::d401_inventory_overview::overview),
        )
        // U501 Upload inventory CSV
        .route(
            "/api/upload",
            post(handlers::u501_upload_inventory_csv::upload)
                .layer(DefaultBodyLimit::max(CSV_BODY_LIMIT)),
        )
        .route(
            "/api/upload/last",
            get(handlers::u501_upload_inventory_csv::last),
        )
        // U502 AI query
        .route(
            "/api/ai-query",
            post(handlers::u502_ai_query::ask).layer(DefaultBodyLimit::max(CSV_BODY_LIMIT)),
        )
        .route(
            "/api/ai-query/history",
            get(handlers::u502_ai_query::history).delete(handlers::u502_ai_query::clear_history),
        )
        .route(
            "/api/ai-query/templates",
            get(handlers::u502_ai_query::templates),
        )
        .layer(middleware::from_fn(request_logger))
        .with_state(state)
}
