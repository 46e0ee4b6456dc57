//! Notification Repository

use super::{RepoError, RepoResult};
use shared::models::Notification;
use sqlx::SqlitePool;

const NOTIFICATION_SELECT: &str =
    "SELECT id, user_id, title, message, read, created_at FROM notification";

pub async fn find_all_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Notification>> {
    let sql = format!(
        "{} WHERE user_id = ? ORDER BY created_at DESC",
        NOTIFICATION_SELECT
    );
    let rows = sqlx::query_as::<_, Notification>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn insert(
    pool: &SqlitePool,
    user_id: i64,
    title: &str,
    message: &str,
) -> RepoResult<Notification> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO notification (id, user_id, title, message, read, created_at) VALUES (?1, ?2, ?3, ?4, 0, ?5)",
    )
    .bind(id)
    .bind(user_id)
    .bind(title)
    .bind(message)
    .bind(now)
    .execute(pool)
    .await?;

    let sql = format!("{} WHERE id = ?", NOTIFICATION_SELECT);
    sqlx::query_as::<_, Notification>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create notification".into()))
}
