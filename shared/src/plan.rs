//! Subscription plans
//!
//! Plan price and monthly product quota are pure functions of the plan —
//! they are never stored independently and never client-settable.

use serde::{Deserialize, Serialize};

/// Company subscription plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum SubscriptionPlan {
    Free,
    Basic,
    Premium,
}

impl SubscriptionPlan {
    /// Monthly subscription fee
    pub fn price(&self) -> f64 {
        match self {
            SubscriptionPlan::Free => 0.0,
            SubscriptionPlan::Basic => 100.0,
            SubscriptionPlan::Premium => 300.0,
        }
    }

    /// Maximum products a company may create per calendar month.
    /// `None` = unlimited.
    pub fn monthly_product_limit(&self) -> Option<i64> {
        match self {
            SubscriptionPlan::Free => Some(10),
            SubscriptionPlan::Basic => Some(100),
            SubscriptionPlan::Premium => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Free => "free",
            SubscriptionPlan::Basic => "basic",
            SubscriptionPlan::Premium => "premium",
        }
    }
}

impl Default for SubscriptionPlan {
    fn default() -> Self {
        SubscriptionPlan::Free
    }
}

impl std::fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_prices_are_fixed() {
        assert_eq!(SubscriptionPlan::Free.price(), 0.0);
        assert_eq!(SubscriptionPlan::Basic.price(), 100.0);
        assert_eq!(SubscriptionPlan::Premium.price(), 300.0);
    }

    #[test]
    fn plan_limits() {
        assert_eq!(SubscriptionPlan::Free.monthly_product_limit(), Some(10));
        assert_eq!(SubscriptionPlan::Basic.monthly_product_limit(), Some(100));
        assert_eq!(SubscriptionPlan::Premium.monthly_product_limit(), None);
    }
}
