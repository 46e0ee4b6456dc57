//! Category API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::category as category_repo;
use crate::utils::{AppError, AppResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};

/// GET /api/categories
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    let categories = category_repo::find_all(state.pool()).await?;
    Ok(Json(categories))
}

/// GET /api/categories/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Category>> {
    let category = category_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {id}")))?;
    Ok(Json(category))
}

/// POST /api/categories (authenticated)
pub async fn create(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<Json<Category>> {
    let category = category_repo::create(state.pool(), payload).await?;
    Ok(Json(category))
}

/// PUT /api/categories/:id (authenticated)
pub async fn update(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    let category = category_repo::update(state.pool(), id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/:id (authenticated)
pub async fn delete(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    let deleted = category_repo::delete(state.pool(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Category {id}")));
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}
