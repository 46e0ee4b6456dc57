//! Company Model

use serde::{Deserialize, Serialize};

use crate::plan::SubscriptionPlan;

/// Company entity
///
/// `plan_price` is derived from `subscription_plan` on every write and is
/// never accepted from clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub tax_number: Option<String>,
    pub address: Option<String>,
    pub subscription_plan: SubscriptionPlan,
    pub plan_price: f64,
    pub created_at: i64,
}

/// Create company payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyCreate {
    pub name: String,
    pub tax_number: Option<String>,
    pub address: Option<String>,
    pub subscription_plan: Option<SubscriptionPlan>,
}

/// Update company payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub tax_number: Option<String>,
    pub address: Option<String>,
    pub subscription_plan: Option<SubscriptionPlan>,
}
