//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `stock` never goes negative; a product counts toward its company's
/// monthly quota by its creation month/year.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub company_id: i64,
    pub vendor_id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub price: f64,
    pub stock: i64,
    /// Discount percentage (0-100)
    pub discount: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
///
/// company/vendor are resolved from the acting identity, never from the
/// payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub price: f64,
    pub stock: i64,
    pub discount: Option<f64>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub discount: Option<f64>,
    pub is_active: Option<bool>,
}
