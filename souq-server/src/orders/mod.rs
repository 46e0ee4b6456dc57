//! Orders Module
//!
//! The settlement engine's orchestration layer. Every mutating operation
//! here runs as a single all-or-nothing sqlx transaction:
//!
//! validate → decrement stock (line creation only) → write line →
//! recompute totals → commit.
//!
//! Product stock is mutated only by the line-creation path in this module;
//! order aggregate fields only by [`settlement::recompute`].

pub mod settlement;

use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::auth::CurrentUser;
use crate::db::repository::{company as company_repo, order as order_repo, product as product_repo};
use crate::pricing;
use crate::utils::{AppError, AppResult};
use shared::models::{
    Order, OrderCreate, OrderItem, OrderLineInput, OrderUpdate, OrderWithItems, Role,
};

/// Create an order with its initial lines.
///
/// Fails with `EmptyOrder` before touching the store when no lines are
/// given. Lines referencing a product of another company fail with
/// `ProductCompanyMismatch`; insufficient stock on any line rolls the
/// whole order back.
pub async fn create_order(
    pool: &SqlitePool,
    user: &CurrentUser,
    data: OrderCreate,
) -> AppResult<OrderWithItems> {
    if data.items.is_empty() {
        return Err(AppError::EmptyOrder);
    }

    let mut tx = pool.begin().await.map_err(map_sqlx)?;

    let company = company_repo::find_by_id_tx(&mut tx, data.company_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Company {}", data.company_id)))?;

    // All lines must reference this company's products; reject before any
    // line is persisted
    for line in &data.items {
        let product = product_repo::find_by_id_tx(&mut tx, line.product_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Product {}", line.product_id)))?;
        if product.company_id != company.id {
            return Err(AppError::ProductCompanyMismatch {
                product: product.name,
                company: company.name.clone(),
            });
        }
    }

    let order_id = order_repo::insert(
        &mut tx,
        user.id,
        company.id,
        data.governorate.as_deref(),
        data.address.as_deref(),
    )
    .await?;

    for line in &data.items {
        upsert_line_tx(&mut tx, order_id, company.id, &company.name, line).await?;
    }

    settlement::recompute(&mut tx, order_id, true).await?;

    let order = order_repo::find_by_id_tx(&mut tx, order_id)
        .await?
        .ok_or_else(|| AppError::internal("Order vanished inside its own transaction"))?;
    let items = order_repo::find_items_tx(&mut tx, order_id).await?;

    tx.commit().await.map_err(map_sqlx)?;

    tracing::info!(order_id, customer_id = user.id, "Order created");
    Ok(OrderWithItems { order, items })
}

/// Add a line to an order, or update the quantity of the existing line
/// for the same product. Triggers a totals recompute either way.
pub async fn add_or_update_line(
    pool: &SqlitePool,
    user: &CurrentUser,
    order_id: i64,
    line: OrderLineInput,
) -> AppResult<OrderItem> {
    let mut tx = pool.begin().await.map_err(map_sqlx)?;

    let order = order_repo::find_by_id_tx(&mut tx, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    require_order_mutation(user, &order)?;

    let company = company_repo::find_by_id_tx(&mut tx, order.company_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Company {}", order.company_id)))?;

    let item_id = upsert_line_tx(&mut tx, order_id, company.id, &company.name, &line).await?;

    settlement::recompute(&mut tx, order_id, true).await?;

    let item = order_repo::find_item_by_product_tx(&mut tx, order_id, line.product_id)
        .await?
        .ok_or_else(|| AppError::internal(format!("Order item {item_id} vanished")))?;

    tx.commit().await.map_err(map_sqlx)?;
    Ok(item)
}

/// Remove a line and recompute the parent order's totals.
///
/// Stock is NOT restored on deletion (matching upstream behavior; see
/// DESIGN.md).
pub async fn delete_line(pool: &SqlitePool, user: &CurrentUser, item_id: i64) -> AppResult<()> {
    let item = order_repo::find_item_by_id(pool, item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order item {item_id}")))?;

    let mut tx = pool.begin().await.map_err(map_sqlx)?;

    let order = order_repo::find_by_id_tx(&mut tx, item.order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", item.order_id)))?;
    require_order_mutation(user, &order)?;

    order_repo::delete_item_tx(&mut tx, item_id).await?;
    settlement::recompute(&mut tx, order.id, true).await?;

    tx.commit().await.map_err(map_sqlx)?;
    Ok(())
}

/// Update governorate/address/status, then recompute (a governorate
/// change moves the shipping cost and coordinates).
pub async fn update_order(
    pool: &SqlitePool,
    user: &CurrentUser,
    order_id: i64,
    data: OrderUpdate,
) -> AppResult<Order> {
    let mut tx = pool.begin().await.map_err(map_sqlx)?;

    let order = order_repo::find_by_id_tx(&mut tx, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    require_order_access(user, &order)?;

    order_repo::update_info(&mut tx, order_id, &data).await?;
    settlement::recompute(&mut tx, order_id, true).await?;

    let updated = order_repo::find_by_id_tx(&mut tx, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;

    tx.commit().await.map_err(map_sqlx)?;
    Ok(updated)
}

/// Delete an order and (by cascade) its lines. Stock is not restored.
pub async fn delete_order(pool: &SqlitePool, user: &CurrentUser, order_id: i64) -> AppResult<()> {
    let order = order_repo::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    require_order_access(user, &order)?;

    order_repo::delete(pool, order_id).await?;
    tracing::info!(order_id, "Order deleted");
    Ok(())
}

/// Fetch an order with its lines (ownership-checked detail view)
pub async fn get_with_items(
    pool: &SqlitePool,
    user: &CurrentUser,
    order_id: i64,
) -> AppResult<OrderWithItems> {
    let order = order_repo::find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {order_id}")))?;
    require_order_access(user, &order)?;

    let items = order_repo::find_items(pool, order_id).await?;
    Ok(OrderWithItems { order, items })
}

/// List orders visible to the acting identity: vendors see their
/// company's orders, customers their own.
pub async fn list_orders(pool: &SqlitePool, user: &CurrentUser) -> AppResult<Vec<Order>> {
    match user.role {
        Role::Vendor => {
            let company_id = user
                .company_id
                .ok_or_else(|| AppError::forbidden("Vendors must be linked to a company"))?;
            Ok(order_repo::find_all_for_company(pool, company_id).await?)
        }
        _ => Ok(order_repo::find_all_for_customer(pool, user.id).await?),
    }
}

// =============================================================================
// Line item engine
// =============================================================================

/// Upsert one line inside the open order transaction.
///
/// New line: check stock ("clean" step), compute the snapshot, then
/// decrement stock exactly once via the conditional update and insert the
/// line. Existing line for the same product: recompute the snapshot from
/// the product's current price/discount and the new quantity — stock is
/// never touched again.
async fn upsert_line_tx(
    tx: &mut Transaction<'_, Sqlite>,
    order_id: i64,
    company_id: i64,
    company_name: &str,
    line: &OrderLineInput,
) -> AppResult<i64> {
    if line.quantity <= 0 {
        return Err(AppError::validation(format!(
            "quantity must be positive, got {}",
            line.quantity
        )));
    }

    let product = product_repo::find_by_id_tx(tx, line.product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {}", line.product_id)))?;

    if product.company_id != company_id {
        return Err(AppError::ProductCompanyMismatch {
            product: product.name,
            company: company_name.to_string(),
        });
    }

    let snapshot = pricing::calculate_line(product.price, product.discount, line.quantity);

    match order_repo::find_item_by_product_tx(tx, order_id, line.product_id).await? {
        Some(existing) => {
            order_repo::update_item(tx, existing.id, line.quantity, &snapshot).await?;
            Ok(existing.id)
        }
        None => {
            if product.stock < line.quantity {
                return Err(AppError::InsufficientStock {
                    product: product.id,
                    requested: line.quantity,
                    available: product.stock,
                });
            }

            // Conditional decrement; zero rows means a concurrent line
            // creation won the remaining stock
            if !product_repo::decrement_stock(tx, product.id, line.quantity).await? {
                return Err(AppError::InsufficientStock {
                    product: product.id,
                    requested: line.quantity,
                    available: product.stock,
                });
            }

            let item_id =
                order_repo::insert_item(tx, order_id, product.id, line.quantity, &snapshot).await?;
            Ok(item_id)
        }
    }
}

// =============================================================================
// Ownership checks
// =============================================================================

/// Mutating line operations: owner or staff only
fn require_order_mutation(user: &CurrentUser, order: &Order) -> AppResult<()> {
    if user.role == Role::Staff || order.customer_id == user.id {
        Ok(())
    } else {
        Err(AppError::OrderNotOwned)
    }
}

/// Read/update/delete: owner, the company's vendor, or staff
fn require_order_access(user: &CurrentUser, order: &Order) -> AppResult<()> {
    let allowed = match user.role {
        Role::Staff => true,
        Role::Vendor => user.company_id == Some(order.company_id),
        Role::Customer => order.customer_id == user.id,
    };
    if allowed {
        Ok(())
    } else {
        Err(AppError::OrderNotOwned)
    }
}

fn map_sqlx(err: sqlx::Error) -> AppError {
    AppError::database(err.to_string())
}
