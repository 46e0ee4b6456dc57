//! Plan Quota Guard
//!
//! Decides whether a company may create another product this calendar
//! month. The race-free enforcement is the guarded INSERT in the product
//! repository; this pure check backs it and gives callers a friendly
//! denial before any write is attempted.

use shared::SubscriptionPlan;

/// Outcome of a quota check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaCheck {
    Allow,
    Deny { limit: i64 },
}

/// Check the plan limit against the number of products the company has
/// already created in the current calendar month. Products at or over the
/// limit deny; unlimited plans always allow.
pub fn check_quota(plan: SubscriptionPlan, created_this_month: i64) -> QuotaCheck {
    match plan.monthly_product_limit() {
        Some(limit) if created_this_month >= limit => QuotaCheck::Deny { limit },
        _ => QuotaCheck::Allow,
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_plan_boundary() {
        // Free plan allows 10 per month: the 10th product (9 existing)
        // passes, the 11th (10 existing) is denied.
        assert_eq!(check_quota(SubscriptionPlan::Free, 9), QuotaCheck::Allow);
        assert_eq!(
            check_quota(SubscriptionPlan::Free, 10),
            QuotaCheck::Deny { limit: 10 }
        );
        assert_eq!(
            check_quota(SubscriptionPlan::Free, 25),
            QuotaCheck::Deny { limit: 10 }
        );
    }

    #[test]
    fn test_basic_plan_boundary() {
        assert_eq!(check_quota(SubscriptionPlan::Basic, 99), QuotaCheck::Allow);
        assert_eq!(
            check_quota(SubscriptionPlan::Basic, 100),
            QuotaCheck::Deny { limit: 100 }
        );
    }

    #[test]
    fn test_premium_is_unlimited() {
        assert_eq!(
            check_quota(SubscriptionPlan::Premium, 199),
            QuotaCheck::Allow
        );
        assert_eq!(
            check_quota(SubscriptionPlan::Premium, 10_000),
            QuotaCheck::Allow
        );
    }
}
