//! Line Item Price Calculator
//!
//! Computes the frozen price/discount snapshot for one order line:
//! - price = product price × quantity
//! - discount_amount = price × product discount % (0 when no discount)
//! - total_after_discount = price − discount_amount
//!
//! The snapshot is recomputed whenever the line's quantity or product
//! changes; stock handling lives in the orders module, not here.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Frozen money snapshot for one order line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSnapshot {
    /// product.price * quantity
    pub price: f64,
    /// price * discount / 100
    pub discount_amount: f64,
    /// price - discount_amount
    pub total_after_discount: f64,
}

// ==================== Conversion Helpers ====================

/// Convert f64 to Decimal for calculation
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

// ==================== Line Calculation ====================

/// Compute the line snapshot from the product's current price/discount and
/// the requested quantity.
pub fn calculate_line(unit_price: f64, discount_percent: f64, quantity: i64) -> LineSnapshot {
    let price = to_decimal(unit_price) * Decimal::from(quantity);

    let discount_amount = if discount_percent > 0.0 {
        price * to_decimal(discount_percent) / Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    let total_after_discount = price - discount_amount;

    LineSnapshot {
        price: to_f64(price),
        discount_amount: to_f64(discount_amount),
        total_after_discount: to_f64(total_after_discount),
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_without_discount() {
        // price=50, quantity=2 -> 100, no discount
        let snap = calculate_line(50.0, 0.0, 2);
        assert_eq!(snap.price, 100.0);
        assert_eq!(snap.discount_amount, 0.0);
        assert_eq!(snap.total_after_discount, 100.0);
    }

    #[test]
    fn test_line_with_percentage_discount() {
        // price=200, 10% discount -> line 200, discount 20, total 180
        let snap = calculate_line(200.0, 10.0, 1);
        assert_eq!(snap.price, 200.0);
        assert_eq!(snap.discount_amount, 20.0);
        assert_eq!(snap.total_after_discount, 180.0);
    }

    #[test]
    fn test_discount_scales_with_quantity() {
        // 3 × 200 @ 10% -> 600 / 60 / 540
        let snap = calculate_line(200.0, 10.0, 3);
        assert_eq!(snap.price, 600.0);
        assert_eq!(snap.discount_amount, 60.0);
        assert_eq!(snap.total_after_discount, 540.0);
    }

    #[test]
    fn test_fractional_prices_round_half_up() {
        // 3 × 0.115 = 0.345 -> 0.35 at 2dp
        let snap = calculate_line(0.115, 0.0, 3);
        assert_eq!(snap.price, 0.35);
        assert_eq!(snap.total_after_discount, 0.35);
    }

    #[test]
    fn test_full_discount() {
        let snap = calculate_line(80.0, 100.0, 2);
        assert_eq!(snap.price, 160.0);
        assert_eq!(snap.discount_amount, 160.0);
        assert_eq!(snap.total_after_discount, 0.0);
    }

    #[test]
    fn test_zero_price_product() {
        let snap = calculate_line(0.0, 25.0, 5);
        assert_eq!(snap.price, 0.0);
        assert_eq!(snap.discount_amount, 0.0);
        assert_eq!(snap.total_after_discount, 0.0);
    }
}
