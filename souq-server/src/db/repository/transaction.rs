//! Transaction Repository (payment ledger)

use super::{RepoError, RepoResult};
use shared::models::{PaymentMethod, Transaction, TransactionStatus};
use sqlx::SqlitePool;

const TXN_SELECT: &str = "SELECT id, user_id, order_id, amount, method, status, reference_id, created_at FROM transactions";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Transaction>> {
    let sql = format!("{} WHERE id = ?", TXN_SELECT);
    let row = sqlx::query_as::<_, Transaction>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_all_for_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<Transaction>> {
    let sql = format!("{} WHERE user_id = ? ORDER BY created_at DESC", TXN_SELECT);
    let rows = sqlx::query_as::<_, Transaction>(&sql)
        .bind(user_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Insert a ledger entry. `amount` and `reference_id` arrive already
/// resolved by the payment service; a duplicate reference surfaces as
/// [`RepoError::Duplicate`] for the caller to retry with a fresh token.
pub async fn insert(
    pool: &SqlitePool,
    user_id: i64,
    order_id: Option<i64>,
    amount: Option<f64>,
    method: PaymentMethod,
    status: TransactionStatus,
    reference_id: &str,
) -> RepoResult<Transaction> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO transactions (id, user_id, order_id, amount, method, status, reference_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(user_id)
    .bind(order_id)
    .bind(amount)
    .bind(method)
    .bind(status)
    .bind(reference_id)
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create transaction".into()))
}

/// Flip the status (gateway callback path). Amount is a historical fact
/// and is never touched here.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    status: TransactionStatus,
) -> RepoResult<Transaction> {
    let rows = sqlx::query("UPDATE transactions SET status = ?1 WHERE id = ?2")
        .bind(status)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Transaction {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Transaction {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM transactions WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
