//! Client API endpoints.

use api_types::client::{ClientListResponse, ClientNew, ClientView};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

fn map_client(client: engine::Client) -> ClientView {
    ClientView {
        id: client.id,
        name: client.name,
        address: client.address,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<ClientListResponse>, ServerError> {
    let clients = state
        .engine
        .list_clients()
        .await?
        .into_iter()
        .map(map_client)
        .collect();
    Ok(Json(ClientListResponse { clients }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientNew>,
) -> Result<(StatusCode, Json<ClientView>), ServerError> {
    let client = state
        .engine
        .register_client(engine::NewClient {
            name: payload.name,
            address: payload.address,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(map_client(client))))
}
