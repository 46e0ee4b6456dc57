//! Order Repository
//!
//! Order aggregate fields and line snapshots are only ever written through
//! the orders module, inside a single transaction per mutating operation.
//! The plain-pool readers here serve list/detail views.

use super::{RepoError, RepoResult};
use crate::pricing::{LineSnapshot, OrderTotals};
use shared::models::{Order, OrderItem, OrderStatus, OrderUpdate};
use sqlx::{Sqlite, SqlitePool, Transaction};

const ORDER_SELECT: &str = "SELECT id, customer_id, company_id, governorate, address, latitude, longitude, shipping_cost, items_total, discount_amount, total_after_discount, total_amount, status, created_at FROM orders";

const ITEM_SELECT: &str = "SELECT id, order_id, product_id, quantity, price, discount_amount, total_after_discount, created_at FROM order_item";

// =============================================================================
// Readers (plain pool)
// =============================================================================

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE id = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all_for_customer(pool: &SqlitePool, customer_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{} WHERE customer_id = ? ORDER BY created_at DESC",
        ORDER_SELECT
    );
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(customer_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_all_for_company(pool: &SqlitePool, company_id: i64) -> RepoResult<Vec<Order>> {
    let sql = format!(
        "{} WHERE company_id = ? ORDER BY created_at DESC",
        ORDER_SELECT
    );
    let rows = sqlx::query_as::<_, Order>(&sql)
        .bind(company_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{} WHERE order_id = ? ORDER BY created_at", ITEM_SELECT);
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_item_by_id(pool: &SqlitePool, item_id: i64) -> RepoResult<Option<OrderItem>> {
    let sql = format!("{} WHERE id = ?", ITEM_SELECT);
    let row = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(item_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Orders cascade-delete their lines (FK ON DELETE CASCADE).
/// Stock is NOT restored.
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

// =============================================================================
// Writers (inside an order transaction)
// =============================================================================

pub async fn find_by_id_tx(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> RepoResult<Option<Order>> {
    let sql = format!("{} WHERE id = ?", ORDER_SELECT);
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

pub async fn find_items_tx(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
) -> RepoResult<Vec<OrderItem>> {
    let sql = format!("{} WHERE order_id = ? ORDER BY created_at", ITEM_SELECT);
    let rows = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .fetch_all(&mut **tx)
        .await?;
    Ok(rows)
}

pub async fn find_item_by_product_tx(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
    product_id: i64,
) -> RepoResult<Option<OrderItem>> {
    let sql = format!("{} WHERE order_id = ? AND product_id = ?", ITEM_SELECT);
    let row = sqlx::query_as::<_, OrderItem>(&sql)
        .bind(order_id)
        .bind(product_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// Insert the order shell (totals zeroed; settlement fills them in before
/// the transaction commits)
pub async fn insert(
    tx: &mut Transaction<'_, Sqlite>,
    customer_id: i64,
    company_id: i64,
    governorate: Option<&str>,
    address: Option<&str>,
) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO orders (id, customer_id, company_id, governorate, address, status, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(company_id)
    .bind(governorate)
    .bind(address)
    .bind(OrderStatus::Pending)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(id)
}

/// Apply a client-facing order update (governorate/address/status only —
/// never the totals)
pub async fn update_info(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    data: &OrderUpdate,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE orders SET governorate = COALESCE(?1, governorate), address = COALESCE(?2, address), status = COALESCE(?3, status) WHERE id = ?4",
    )
    .bind(&data.governorate)
    .bind(&data.address)
    .bind(data.status)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order {id} not found")));
    }
    Ok(())
}

/// Persist settlement output (the only writer of the aggregate fields)
pub async fn update_totals(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
    totals: &OrderTotals,
    coords: Option<(f64, f64)>,
) -> RepoResult<()> {
    let (latitude, longitude) = match coords {
        Some((lat, lng)) => (Some(lat), Some(lng)),
        None => (None, None),
    };
    sqlx::query(
        "UPDATE orders SET shipping_cost = ?1, items_total = ?2, discount_amount = ?3, total_after_discount = ?4, total_amount = ?5, latitude = ?6, longitude = ?7 WHERE id = ?8",
    )
    .bind(totals.shipping_cost)
    .bind(totals.items_total)
    .bind(totals.discount_amount)
    .bind(totals.total_after_discount)
    .bind(totals.total_amount)
    .bind(latitude)
    .bind(longitude)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn insert_item(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
    product_id: i64,
    quantity: i64,
    snapshot: &LineSnapshot,
) -> RepoResult<i64> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO order_item (id, order_id, product_id, quantity, price, discount_amount, total_after_discount, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(order_id)
    .bind(product_id)
    .bind(quantity)
    .bind(snapshot.price)
    .bind(snapshot.discount_amount)
    .bind(snapshot.total_after_discount)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(id)
}

/// Refresh an existing line's quantity and snapshot. Stock is untouched —
/// it was decremented once, at line creation.
pub async fn update_item(
    tx: &mut Transaction<'_, Sqlite>,
    item_id: i64,
    quantity: i64,
    snapshot: &LineSnapshot,
) -> RepoResult<()> {
    let rows = sqlx::query(
        "UPDATE order_item SET quantity = ?1, price = ?2, discount_amount = ?3, total_after_discount = ?4 WHERE id = ?5",
    )
    .bind(quantity)
    .bind(snapshot.price)
    .bind(snapshot.discount_amount)
    .bind(snapshot.total_after_discount)
    .bind(item_id)
    .execute(&mut **tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Order item {item_id} not found")));
    }
    Ok(())
}

pub async fn delete_item_tx(tx: &mut Transaction<'_, Sqlite>, item_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM order_item WHERE id = ?")
        .bind(item_id)
        .execute(&mut **tx)
        .await?;
    Ok(rows.rows_affected() > 0)
}
