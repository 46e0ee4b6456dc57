//! Transaction API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::transaction as transaction_repo;
use crate::services::payment;
use crate::utils::{AppError, AppResult};
use shared::models::{GatewayResult, Transaction, TransactionCreate};

/// GET /api/transactions - the acting user's ledger entries
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Transaction>>> {
    let txns = transaction_repo::find_all_for_user(state.pool(), user.id).await?;
    Ok(Json(txns))
}

/// GET /api/transactions/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Transaction>> {
    let txn = transaction_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Transaction {id}")))?;
    if txn.user_id != user.id {
        return Err(AppError::not_found(format!("Transaction {id}")));
    }
    Ok(Json(txn))
}

/// POST /api/transactions - record a payment attempt
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<TransactionCreate>,
) -> AppResult<Json<Transaction>> {
    let txn = payment::record_transaction(state.pool(), &user, payload).await?;
    Ok(Json(txn))
}

/// DELETE /api/transactions/:id
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    payment::delete_transaction(state.pool(), &user, id).await?;
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// POST /api/transactions/gateway-callback - external gateway result
/// (no bearer token; the gateway authenticates out of band)
pub async fn gateway_callback(
    State(state): State<ServerState>,
    Json(payload): Json<GatewayResult>,
) -> AppResult<Json<Transaction>> {
    let txn = payment::apply_gateway_result(state.pool(), payload).await?;
    Ok(Json(txn))
}
