//! Souq Marketplace Server
//!
//! Multi-tenant marketplace backend: vendors belonging to companies list
//! products, customers place orders, payments are recorded as ledger
//! entries.
//!
//! # Module structure
//!
//! ```text
//! souq-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── auth/          # JWT verification, acting identity
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool + repositories
//! ├── pricing/       # line/order calculators, shipping table, quota
//! ├── orders/        # settlement engine (transactional orchestration)
//! ├── services/      # catalog, payment ledger, notifications
//! └── utils/         # errors, logging, time helpers
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// Load .env and initialize logging; call once at process start
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
