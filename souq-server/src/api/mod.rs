//! API routing module
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`companies`] - company management
//! - [`categories`] - category management
//! - [`products`] - product management (quota-gated creation)
//! - [`orders`] - orders, line items, settlement
//! - [`transactions`] - payment ledger + gateway callback
//! - [`notifications`] - notification feed

pub mod categories;
pub mod companies;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod products;
pub mod transactions;

use axum::Router;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(companies::router())
        .merge(categories::router())
        .merge(products::router())
        .merge(orders::router())
        .merge(transactions::router())
        .merge(notifications::router())
}

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};
