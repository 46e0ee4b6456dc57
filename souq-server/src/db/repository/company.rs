//! Company Repository

use super::{RepoError, RepoResult};
use shared::models::{Company, CompanyCreate, CompanyUpdate};
use sqlx::{Sqlite, SqlitePool, Transaction};

const COMPANY_SELECT: &str = "SELECT id, name, tax_number, address, subscription_plan, plan_price, created_at FROM company";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Company>> {
    let sql = format!("{} ORDER BY created_at DESC", COMPANY_SELECT);
    let rows = sqlx::query_as::<_, Company>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Company>> {
    let sql = format!("{} WHERE id = ?", COMPANY_SELECT);
    let row = sqlx::query_as::<_, Company>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Read a company inside an open order transaction
pub async fn find_by_id_tx(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> RepoResult<Option<Company>> {
    let sql = format!("{} WHERE id = ?", COMPANY_SELECT);
    let row = sqlx::query_as::<_, Company>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: CompanyCreate) -> RepoResult<Company> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    let plan = data.subscription_plan.unwrap_or_default();

    // plan_price is a pure function of the plan, never client-supplied
    sqlx::query(
        "INSERT INTO company (id, name, tax_number, address, subscription_plan, plan_price, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.tax_number)
    .bind(&data.address)
    .bind(plan)
    .bind(plan.price())
    .bind(now)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create company".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CompanyUpdate) -> RepoResult<Company> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Company {id} not found")))?;

    let plan = data.subscription_plan.unwrap_or(existing.subscription_plan);

    sqlx::query(
        "UPDATE company SET name = COALESCE(?1, name), tax_number = COALESCE(?2, tax_number), address = COALESCE(?3, address), subscription_plan = ?4, plan_price = ?5 WHERE id = ?6",
    )
    .bind(&data.name)
    .bind(&data.tax_number)
    .bind(&data.address)
    .bind(plan)
    .bind(plan.price())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Company {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM company WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
