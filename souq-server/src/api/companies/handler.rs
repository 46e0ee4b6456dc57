//! Company API handlers
//!
//! Companies are administered by staff; plan changes re-derive the plan
//! price automatically.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::company as company_repo;
use crate::utils::{AppError, AppResult};
use shared::models::{Company, CompanyCreate, CompanyUpdate, Role};

fn require_staff(user: &CurrentUser) -> AppResult<()> {
    if user.role == Role::Staff {
        Ok(())
    } else {
        Err(AppError::forbidden("Staff only"))
    }
}

/// GET /api/companies
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Company>>> {
    let companies = company_repo::find_all(state.pool()).await?;
    Ok(Json(companies))
}

/// GET /api/companies/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Company>> {
    let company = company_repo::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Company {id}")))?;
    Ok(Json(company))
}

/// POST /api/companies
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CompanyCreate>,
) -> AppResult<Json<Company>> {
    require_staff(&user)?;
    let company = company_repo::create(state.pool(), payload).await?;
    Ok(Json(company))
}

/// PUT /api/companies/:id
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CompanyUpdate>,
) -> AppResult<Json<Company>> {
    require_staff(&user)?;
    let company = company_repo::update(state.pool(), id, payload).await?;
    Ok(Json(company))
}

/// DELETE /api/companies/:id
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<serde_json::Value>> {
    require_staff(&user)?;
    let deleted = company_repo::delete(state.pool(), id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Company {id}")));
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}
