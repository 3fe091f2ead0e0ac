//! Product API endpoints.

use api_types::product::{ProductListResponse, ProductNew, ProductView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::EngineError;

use crate::{ServerError, categories::map_category, server::ServerState};

fn map_product(product: engine::Product) -> ProductView {
    ProductView {
        id: product.id,
        code: product.code,
        name: product.name,
        categories: product.categories.into_iter().map(map_category).collect(),
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ProductListResponse>, ServerError> {
    let products = state
        .engine
        .list_products()
        .await?
        .into_iter()
        .map(map_product)
        .collect();
    Ok(Json(ProductListResponse { products }))
}

/// Show a single product; an unknown id is a 404.
pub async fn get(
    State(state): State<ServerState>,
    Path(product_id): Path<i32>,
) -> Result<Json<ProductView>, ServerError> {
    let product = state
        .engine
        .product(product_id)
        .await?
        .ok_or_else(|| EngineError::AbsentEntity(format!("product {product_id}")))?;
    Ok(Json(map_product(product)))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductNew>,
) -> Result<(StatusCode, Json<ProductView>), ServerError> {
    let product = state
        .engine
        .register_product(
            engine::NewProduct::new(payload.code, payload.name).categories(payload.categories),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(map_product(product))))
}
