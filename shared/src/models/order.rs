//! Order Models

use serde::{Deserialize, Serialize};

/// Order status
///
/// Transitions are not validated; any value may be set administratively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OrderStatus {
    Pending,
    Paid,
    Shipped,
    Completed,
    Cancelled,
}

/// Order entity
///
/// The four aggregate money fields (`items_total`, `discount_amount`,
/// `total_after_discount`, `total_amount`) are written only by the
/// settlement engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub company_id: i64,
    pub governorate: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub shipping_cost: f64,
    pub items_total: f64,
    pub discount_amount: f64,
    pub total_after_discount: f64,
    pub total_amount: f64,
    pub status: OrderStatus,
    pub created_at: i64,
}

/// Order line item with its frozen price/discount snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    /// Snapshot: product.price * quantity at line creation/update time
    pub price: f64,
    /// Snapshot: price * product.discount / 100
    pub discount_amount: f64,
    /// Snapshot: price - discount_amount
    pub total_after_discount: f64,
    pub created_at: i64,
}

/// One product+quantity entry in an order create request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineInput {
    pub product_id: i64,
    pub quantity: i64,
}

/// Create order payload (requires at least one line)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    pub company_id: i64,
    pub governorate: Option<String>,
    pub address: Option<String>,
    pub items: Vec<OrderLineInput>,
}

/// Update order payload (totals are recomputed, never accepted)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub governorate: Option<String>,
    pub address: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Order plus its current lines (detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
