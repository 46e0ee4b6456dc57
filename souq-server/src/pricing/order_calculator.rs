//! Order-Level Totals Calculator
//!
//! Aggregates an order's current lines into its four persisted totals:
//!
//! 1. items_total = Σ line.price
//! 2. discount_amount = Σ line.discount_amount
//! 3. total_after_discount = items_total − discount_amount
//! 4. total_amount = total_after_discount + shipping_cost
//!
//! Pure function; the orders module decides where `shipping_cost` comes
//! from (shipping table lookup or the order's existing value).

use rust_decimal::prelude::*;
use shared::models::OrderItem;

use super::item_calculator::{to_decimal, to_f64};

/// Result of order totals calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTotals {
    pub items_total: f64,
    pub discount_amount: f64,
    pub total_after_discount: f64,
    pub shipping_cost: f64,
    pub total_amount: f64,
}

/// Recompute order totals from its current lines and a shipping cost.
pub fn calculate_order_totals(items: &[OrderItem], shipping_cost: f64) -> OrderTotals {
    let items_total: Decimal = items.iter().map(|i| to_decimal(i.price)).sum();
    let discount_amount: Decimal = items.iter().map(|i| to_decimal(i.discount_amount)).sum();

    let total_after_discount = items_total - discount_amount;
    let shipping = to_decimal(shipping_cost);
    let total_amount = total_after_discount + shipping;

    OrderTotals {
        items_total: to_f64(items_total),
        discount_amount: to_f64(discount_amount),
        total_after_discount: to_f64(total_after_discount),
        shipping_cost: to_f64(shipping),
        total_amount: to_f64(total_amount),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, discount_amount: f64) -> OrderItem {
        OrderItem {
            id: 0,
            order_id: 0,
            product_id: 0,
            quantity: 1,
            price,
            discount_amount,
            total_after_discount: price - discount_amount,
            created_at: 0,
        }
    }

    #[test]
    fn test_single_line_with_shipping() {
        // One line 50×2=100, shipping 20 -> total 120
        let items = vec![item(100.0, 0.0)];
        let totals = calculate_order_totals(&items, 20.0);

        assert_eq!(totals.items_total, 100.0);
        assert_eq!(totals.discount_amount, 0.0);
        assert_eq!(totals.total_after_discount, 100.0);
        assert_eq!(totals.shipping_cost, 20.0);
        assert_eq!(totals.total_amount, 120.0);
    }

    #[test]
    fn test_discounted_lines_aggregate() {
        // 200 @ 10% and 100 @ 0% -> items 300, discount 20, after 280
        let items = vec![item(200.0, 20.0), item(100.0, 0.0)];
        let totals = calculate_order_totals(&items, 50.0);

        assert_eq!(totals.items_total, 300.0);
        assert_eq!(totals.discount_amount, 20.0);
        assert_eq!(totals.total_after_discount, 280.0);
        assert_eq!(totals.total_amount, 330.0);
    }

    #[test]
    fn test_empty_lines() {
        let totals = calculate_order_totals(&[], 50.0);
        assert_eq!(totals.items_total, 0.0);
        assert_eq!(totals.discount_amount, 0.0);
        assert_eq!(totals.total_after_discount, 0.0);
        assert_eq!(totals.total_amount, 50.0);
    }

    #[test]
    fn test_totals_identity_holds() {
        let items = vec![item(123.45, 12.35), item(67.89, 0.0), item(10.0, 5.0)];
        let totals = calculate_order_totals(&items, 28.0);

        // f64 re-subtraction carries binary noise; compare within a cent
        assert!(
            (totals.total_after_discount - (totals.items_total - totals.discount_amount)).abs()
                < 0.005
        );
        assert!(
            (totals.total_amount - (totals.total_after_discount + totals.shipping_cost)).abs()
                < 0.005
        );
    }
}
