//! Order API endpoints. Orders always belong to the signed-in user.

use api_types::order::{OrderListResponse, OrderNew, OrderView};
use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

fn map_order(order: engine::Order) -> OrderView {
    OrderView {
        id: order.id,
        product_id: order.product_id,
        quantity: order.quantity,
        user_id: order.user_id,
    }
}

pub async fn list(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
) -> Result<Json<OrderListResponse>, ServerError> {
    let orders = state
        .engine
        .list_orders(user.id)
        .await?
        .into_iter()
        .map(map_order)
        .collect();
    Ok(Json(OrderListResponse { orders }))
}

pub async fn create(
    Extension(user): Extension<engine::User>,
    State(state): State<ServerState>,
    Json(payload): Json<OrderNew>,
) -> Result<(StatusCode, Json<OrderView>), ServerError> {
    let order = state
        .engine
        .place_order(
            engine::NewOrder::new(payload.product_id, payload.quantity),
            user.id,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(map_order(order))))
}
