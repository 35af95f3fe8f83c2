use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a001_product::{NewProduct, Product, ProductUpdate};

use super::common::{bad_request, internal, json_body, not_found, HandlerError, HandlerResult};
use crate::domain::a001_product;
use crate::shared::AppState;

/// GET /api/products
pub async fn list_all(State(state): State<AppState>) -> HandlerResult<Vec<Product>> {
    a001_product::service::list_all(&state.db)
        .await
        .map(Json)
        .map_err(|e| internal("list products", e))
}

/// GET /api/products/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Product> {
    match a001_product::service::get_by_id(&state.db, &id).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(not_found("Product")),
        Err(e) => Err(internal("get product", e)),
    }
}

/// GET /api/products/sku/:sku
pub async fn get_by_sku(
    State(state): State<AppState>,
    Path(sku): Path<String>,
) -> HandlerResult<Product> {
    match a001_product::service::get_by_sku(&state.db, &sku).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(not_found("Product")),
        Err(e) => Err(internal("get product by sku", e)),
    }
}

/// POST /api/products
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), HandlerError> {
    let product = json_body(payload)?;
    product.validate().map_err(bad_request)?;
    a001_product::service::create(&state.db, product)
        .await
        .map(|p| (StatusCode::CREATED, Json(p)))
        .map_err(|e| internal("create product", e))
}

/// PUT /api/products/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> HandlerResult<Product> {
    let changes = json_body(payload)?;
    match a001_product::service::update(&state.db, &id, changes).await {
        Ok(Some(v)) => Ok(Json(v)),
        Ok(None) => Err(not_found("Product")),
        Err(e) => Err(internal("update product", e)),
    }
}

/// DELETE /api/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, HandlerError> {
    match a001_product::service::delete(&state.db, &id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found("Product")),
        Err(e) => Err(internal("delete product", e)),
    }
}

/// POST /api/products/bulk
pub async fn bulk_import(
    State(state): State<AppState>,
    payload: Result<Json<Vec<NewProduct>>, JsonRejection>,
) -> HandlerResult<Vec<Product>> {
    let products = json_body(payload)?;
    if let Some(err) = products.iter().find_map(|p| p.validate().err()) {
        return Err(bad_request(err));
    }
    a001_product::service::bulk_import(&state.db, products)
        .await
        .map(|r| Json(r.into_products()))
        .map_err(|e| internal("bulk import products", e))
}
