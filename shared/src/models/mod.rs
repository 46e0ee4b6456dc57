//! Data models
//!
//! Shared between souq-server and API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY), timestamps unix millis.

pub mod category;
pub mod company;
pub mod notification;
pub mod order;
pub mod product;
pub mod transaction;
pub mod user;

// Re-exports
pub use category::*;
pub use company::*;
pub use notification::*;
pub use order::*;
pub use product::*;
pub use transaction::*;
pub use user::*;
