//! Order API handlers
//!
//! Thin shims over the orders module; every mutation settles the order's
//! totals before the response is built.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::orders;
use crate::utils::{AppError, AppResult};
use shared::models::{
    Order, OrderCreate, OrderItem, OrderLineInput, OrderUpdate, OrderWithItems,
};

/// GET /api/orders - vendor sees company orders, customer their own
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let list = orders::list_orders(state.pool(), &user).await?;
    Ok(Json(list))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderWithItems>> {
    let order = orders::get_with_items(state.pool(), &user, id).await?;
    Ok(Json(order))
}

/// POST /api/orders - create with initial lines (at least one)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<OrderWithItems>> {
    let order = orders::create_order(state.pool(), &user, payload).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id - governorate/address/status; totals recompute
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    let order = orders::update_order(state.pool(), &user, id, payload).await?;
    Ok(Json(order))
}

/// DELETE /api/orders/:id
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    orders::delete_order(state.pool(), &user, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// POST /api/orders/:id/items - add a line or change its quantity
pub async fn upsert_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<OrderLineInput>,
) -> AppResult<Json<OrderItem>> {
    let item = orders::add_or_update_line(state.pool(), &user, id, payload).await?;
    Ok(Json(item))
}

/// DELETE /api/orders/:id/items/:item_id
pub async fn delete_item(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path((id, item_id)): Path<(i64, i64)>,
) -> AppResult<Json<serde_json::Value>> {
    // The line must actually belong to the order in the path
    let item = crate::db::repository::order::find_item_by_id(state.pool(), item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order item {item_id}")))?;
    if item.order_id != id {
        return Err(AppError::not_found(format!(
            "Order item {item_id} in order {id}"
        )));
    }

    orders::delete_line(state.pool(), &user, item_id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}
