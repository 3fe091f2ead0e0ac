//! Categories API endpoints.

use api_types::category::{CategoryListResponse, CategoryNew, CategoryView};
use axum::{Json, extract::State, http::StatusCode};

use crate::{ServerError, server::ServerState};

pub(crate) fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
    }
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<CategoryListResponse>, ServerError> {
    let categories = state
        .engine
        .list_categories()
        .await?
        .into_iter()
        .map(map_category)
        .collect();
    Ok(Json(CategoryListResponse { categories }))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryNew>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .register_category(engine::NewCategory::new(payload.name))
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}
