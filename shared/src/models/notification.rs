//! Notification Model

use serde::{Deserialize, Serialize};

/// Notification entity — delivery/consumption is a client concern
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Notification {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub created_at: i64,
}
