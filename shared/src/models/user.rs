//! User Model (identity projection)
//!
//! Registration, OTP and token issuance live in an external identity
//! service; the server only stores the projection it needs for ownership
//! checks.

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum Role {
    Customer,
    Vendor,
    Staff,
}

/// User entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub phone: String,
    pub email: String,
    pub role: Role,
    /// Approved company link (vendors only)
    pub company_id: Option<i64>,
    pub is_active: bool,
    pub created_at: i64,
}
