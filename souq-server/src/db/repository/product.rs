//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate, ProductUpdate};
use sqlx::{Sqlite, SqlitePool, Transaction};

const PRODUCT_SELECT: &str = "SELECT id, company_id, vendor_id, name, slug, description, category_id, price, stock, discount, is_active, created_at, updated_at FROM product";

fn validate_price(price: f64) -> RepoResult<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(RepoError::Validation(format!(
            "price must be non-negative, got {price}"
        )));
    }
    Ok(())
}

fn validate_discount(discount: f64) -> RepoResult<()> {
    if !discount.is_finite() || !(0.0..=100.0).contains(&discount) {
        return Err(RepoError::Validation(format!(
            "discount must be between 0 and 100, got {discount}"
        )));
    }
    Ok(())
}

fn validate_stock(stock: i64) -> RepoResult<()> {
    if stock < 0 {
        return Err(RepoError::Validation(format!(
            "stock cannot be negative: {stock}"
        )));
    }
    Ok(())
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE is_active = 1 ORDER BY created_at DESC",
        PRODUCT_SELECT
    );
    let rows = sqlx::query_as::<_, Product>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_company(pool: &SqlitePool, company_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE company_id = ? AND is_active = 1 ORDER BY created_at DESC",
        PRODUCT_SELECT
    );
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(company_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_category(pool: &SqlitePool, category_id: i64) -> RepoResult<Vec<Product>> {
    let sql = format!(
        "{} WHERE category_id = ? AND is_active = 1 ORDER BY created_at DESC",
        PRODUCT_SELECT
    );
    let rows = sqlx::query_as::<_, Product>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let sql = format!("{} WHERE id = ?", PRODUCT_SELECT);
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Read a product inside an open order transaction
pub async fn find_by_id_tx(
    tx: &mut Transaction<'_, Sqlite>,
    id: i64,
) -> RepoResult<Option<Product>> {
    let sql = format!("{} WHERE id = ?", PRODUCT_SELECT);
    let row = sqlx::query_as::<_, Product>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// Count company products created inside `[window_start, window_end)`.
/// Quota is a creation-time gate, so there is no update-path exclusion.
pub async fn count_created_in_window(
    pool: &SqlitePool,
    company_id: i64,
    window: (i64, i64),
) -> RepoResult<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM product WHERE company_id = ?1 AND created_at >= ?2 AND created_at < ?3",
    )
    .bind(company_id)
    .bind(window.0)
    .bind(window.1)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Insert a product, guarded by the company's monthly quota.
///
/// When `monthly_limit` is Some, the insert only succeeds while the count
/// of company products created inside `[window_start, window_end)` is
/// below the limit — count and insert are one statement, so two
/// concurrent creations cannot both slip under the cap. Returns `false`
/// when the quota blocked the insert.
pub async fn insert_guarded(
    pool: &SqlitePool,
    company_id: i64,
    vendor_id: i64,
    data: &ProductCreate,
    monthly_limit: Option<i64>,
    window: (i64, i64),
) -> RepoResult<Option<Product>> {
    validate_price(data.price)?;
    validate_stock(data.stock)?;
    let discount = data.discount.unwrap_or(0.0);
    validate_discount(discount)?;

    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let rows = match monthly_limit {
        Some(limit) => {
            sqlx::query(
                "INSERT INTO product (id, company_id, vendor_id, name, slug, description, category_id, price, stock, discount, is_active, created_at, updated_at) \
                 SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1, ?11, ?11 \
                 WHERE (SELECT COUNT(*) FROM product WHERE company_id = ?2 AND created_at >= ?12 AND created_at < ?13) < ?14",
            )
            .bind(id)
            .bind(company_id)
            .bind(vendor_id)
            .bind(&data.name)
            .bind(&data.slug)
            .bind(&data.description)
            .bind(data.category_id)
            .bind(data.price)
            .bind(data.stock)
            .bind(discount)
            .bind(now)
            .bind(window.0)
            .bind(window.1)
            .bind(limit)
            .execute(pool)
            .await?
        }
        None => {
            sqlx::query(
                "INSERT INTO product (id, company_id, vendor_id, name, slug, description, category_id, price, stock, discount, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 1, ?11, ?11)",
            )
            .bind(id)
            .bind(company_id)
            .bind(vendor_id)
            .bind(&data.name)
            .bind(&data.slug)
            .bind(&data.description)
            .bind(data.category_id)
            .bind(data.price)
            .bind(data.stock)
            .bind(discount)
            .bind(now)
            .execute(pool)
            .await?
        }
    };

    if rows.rows_affected() == 0 {
        return Ok(None);
    }

    let product = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))?;
    Ok(Some(product))
}

/// Partial update. The quota is a creation-time gate only; edits skip it.
pub async fn update(pool: &SqlitePool, id: i64, data: ProductUpdate) -> RepoResult<Product> {
    if let Some(price) = data.price {
        validate_price(price)?;
    }
    if let Some(discount) = data.discount {
        validate_discount(discount)?;
    }
    if let Some(stock) = data.stock {
        validate_stock(stock)?;
    }

    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET name = COALESCE(?1, name), slug = COALESCE(?2, slug), description = COALESCE(?3, description), category_id = COALESCE(?4, category_id), price = COALESCE(?5, price), stock = COALESCE(?6, stock), discount = COALESCE(?7, discount), is_active = COALESCE(?8, is_active), updated_at = ?9 WHERE id = ?10",
    )
    .bind(&data.name)
    .bind(&data.slug)
    .bind(&data.description)
    .bind(data.category_id)
    .bind(data.price)
    .bind(data.stock)
    .bind(data.discount)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM product WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Atomically decrement stock inside an open order transaction.
///
/// Conditional single-statement decrement: returns `false` (zero rows)
/// when remaining stock is below `quantity`, so two concurrent line
/// creations can never oversell.
pub async fn decrement_stock(
    tx: &mut Transaction<'_, Sqlite>,
    product_id: i64,
    quantity: i64,
) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET stock = stock - ?1, updated_at = ?2 WHERE id = ?3 AND stock >= ?1",
    )
    .bind(quantity)
    .bind(now)
    .bind(product_id)
    .execute(&mut **tx)
    .await?;
    Ok(rows.rows_affected() > 0)
}
