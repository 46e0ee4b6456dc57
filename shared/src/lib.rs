//! Shared types for the Souq marketplace backend
//!
//! Data models, subscription-plan tables and small utilities used by the
//! server crate. DB row types gain `sqlx::FromRow` under the `db` feature.

pub mod models;
pub mod plan;
pub mod util;

// Re-exports
pub use plan::SubscriptionPlan;
pub use serde::{Deserialize, Serialize};
