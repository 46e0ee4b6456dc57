//! Notification sink
//!
//! The core only records `{title, message, recipient}` rows; delivery is
//! an external concern.

use sqlx::SqlitePool;

use crate::db::repository::notification as notification_repo;
use crate::utils::AppResult;

pub async fn send(pool: &SqlitePool, user_id: i64, title: &str, message: &str) -> AppResult<()> {
    notification_repo::insert(pool, user_id, title, message).await?;
    tracing::info!(user_id, title, "Notification recorded");
    Ok(())
}
