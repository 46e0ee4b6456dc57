//! Payment service (transaction ledger)
//!
//! Records payment attempts against orders. The amount is snapshotted
//! from the order total at recording time and never re-derived — a
//! payment amount is a historical fact. Status flips arrive through the
//! gateway callback and fan out as notifications.

use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{order as order_repo, transaction as transaction_repo};
use crate::services::notify;
use crate::utils::{AppError, AppResult};
use shared::models::{GatewayResult, Transaction, TransactionCreate, TransactionStatus};

/// Generated reference tokens are exactly this long
pub const REFERENCE_LEN: usize = 12;

/// Random unique reference token: 12 uppercase hex characters.
/// The UNIQUE column catches the negligible collision case; callers retry.
pub fn generate_reference() -> String {
    let hex = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    hex[..REFERENCE_LEN].to_string()
}

/// Record a payment attempt for an order owned by the acting user.
pub async fn record_transaction(
    pool: &SqlitePool,
    user: &CurrentUser,
    data: TransactionCreate,
) -> AppResult<Transaction> {
    let order = order_repo::find_by_id(pool, data.order_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {}", data.order_id)))?;

    if order.customer_id != user.id {
        return Err(AppError::OrderNotOwned);
    }

    let status = data.status.unwrap_or(TransactionStatus::Pending);
    let reference_id = generate_reference();

    // Amount snapshot: the order's total at this moment, frozen
    let txn = transaction_repo::insert(
        pool,
        user.id,
        Some(order.id),
        Some(order.total_amount),
        data.method,
        status,
        &reference_id,
    )
    .await?;

    notify_for_status(pool, &txn).await?;

    tracing::info!(
        transaction_id = txn.id,
        order_id = order.id,
        amount = order.total_amount,
        "Transaction recorded"
    );
    Ok(txn)
}

/// Apply a payment-gateway callback: flip the status and notify the user.
/// The stored amount is untouched even if the order total has moved since.
pub async fn apply_gateway_result(
    pool: &SqlitePool,
    result: GatewayResult,
) -> AppResult<Transaction> {
    let txn = transaction_repo::update_status(pool, result.transaction_id, result.status).await?;
    notify_for_status(pool, &txn).await?;
    Ok(txn)
}

pub async fn delete_transaction(pool: &SqlitePool, user: &CurrentUser, id: i64) -> AppResult<()> {
    let txn = transaction_repo::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Transaction {id}")))?;

    if txn.user_id != user.id {
        return Err(AppError::forbidden(
            "You are not authorized to delete this transaction",
        ));
    }

    transaction_repo::delete(pool, id).await?;
    Ok(())
}

async fn notify_for_status(pool: &SqlitePool, txn: &Transaction) -> AppResult<()> {
    let order_ref = txn
        .order_id
        .map(|id| format!("#{id}"))
        .unwrap_or_else(|| "N/A".to_string());

    match txn.status {
        TransactionStatus::Success => {
            notify::send(
                pool,
                txn.user_id,
                "Payment Successful",
                &format!("Your payment for Order {order_ref} was successful."),
            )
            .await
        }
        TransactionStatus::Failed => {
            notify::send(
                pool,
                txn.user_id,
                "Payment Failed",
                &format!("Your payment for Order {order_ref} has failed. Please try again."),
            )
            .await
        }
        TransactionStatus::Pending => Ok(()),
    }
}
