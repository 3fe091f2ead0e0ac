//! Stock API endpoints.

use api_types::stock::{StockListResponse, StockNew, StockView};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

fn map_stock(stock: engine::Stock) -> StockView {
    StockView {
        id: stock.id,
        quantity: stock.quantity,
        product_id: stock.product_id,
    }
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<StockListResponse>, ServerError> {
    let stock = state
        .engine
        .list_stock()
        .await?
        .into_iter()
        .map(map_stock)
        .collect();
    Ok(Json(StockListResponse { stock }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StockNew>,
) -> Result<(StatusCode, Json<StockView>), ServerError> {
    let stock = state
        .engine
        .register_stock(engine::NewStock {
            quantity: payload.quantity,
            product_id: payload.product_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(map_stock(stock))))
}
