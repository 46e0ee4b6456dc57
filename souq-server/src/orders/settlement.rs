//! Order Settlement
//!
//! Recomputes an order's persisted totals from its current lines and the
//! shipping table. Runs inside the caller's transaction so a failed
//! recompute rolls back the line mutation that triggered it — a line
//! without updated order totals never becomes visible.

use sqlx::{Sqlite, Transaction};

use crate::db::repository::order as order_repo;
use crate::pricing::{self, OrderTotals};
use crate::utils::{AppError, AppResult};

/// Recompute and persist the order's aggregate fields.
///
/// With `include_shipping`, the shipping cost and coordinates are
/// re-derived from the order's governorate (unknown/missing governorate →
/// default fee, no coordinates); otherwise the order's existing shipping
/// fields are carried into the new totals unchanged.
pub async fn recompute(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
    include_shipping: bool,
) -> AppResult<OrderTotals> {
    let order = order_repo::find_by_id_tx(tx, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;

    let items = order_repo::find_items_tx(tx, order_id).await?;

    let (shipping_cost, coords) = if include_shipping {
        let quote = pricing::lookup(order.governorate.as_deref());
        (quote.cost, quote.coords)
    } else {
        let coords = match (order.latitude, order.longitude) {
            (Some(lat), Some(lng)) => Some((lat, lng)),
            _ => None,
        };
        (order.shipping_cost, coords)
    };

    let totals = pricing::calculate_order_totals(&items, shipping_cost);
    order_repo::update_totals(tx, order_id, &totals, coords).await?;

    tracing::debug!(
        order_id,
        items_total = totals.items_total,
        total_amount = totals.total_amount,
        "Order totals recomputed"
    );

    Ok(totals)
}
