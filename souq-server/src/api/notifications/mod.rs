//! Notification API module

use axum::{Json, Router, extract::State, routing::get};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::notification as notification_repo;
use crate::utils::AppResult;
use shared::models::Notification;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/notifications", get(list))
}

/// GET /api/notifications - the acting user's feed
async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Notification>>> {
    let items = notification_repo::find_all_for_user(state.pool(), user.id).await?;
    Ok(Json(items))
}
