//! Transaction Model (payment ledger)

use serde::{Deserialize, Serialize};

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum PaymentMethod {
    Visa,
    Paypal,
    Fawry,
    Wallet,
}

/// Transaction status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum TransactionStatus {
    Pending,
    Success,
    Failed,
}

/// Payment ledger entry
///
/// `amount` is a snapshot of the order total at recording time — a
/// historical fact, never re-derived. `reference_id` is a unique 12-char
/// uppercase token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Transaction {
    pub id: i64,
    pub user_id: i64,
    pub order_id: Option<i64>,
    pub amount: Option<f64>,
    pub method: PaymentMethod,
    pub status: TransactionStatus,
    pub reference_id: String,
    pub created_at: i64,
}

/// Record transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionCreate {
    pub order_id: i64,
    pub method: PaymentMethod,
    pub status: Option<TransactionStatus>,
}

/// Payment gateway callback payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayResult {
    pub transaction_id: i64,
    pub status: TransactionStatus,
}
