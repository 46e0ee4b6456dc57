//! Catalog service
//!
//! Product lifecycle for vendors. Creation passes the plan quota guard:
//! a fast pure check first (friendly denial, no write attempted), then
//! the guarded INSERT whose count-and-compare is a single statement —
//! two concurrent creations can never both slip under the cap.

use chrono_tz::Tz;
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{company as company_repo, product as product_repo};
use crate::pricing::{QuotaCheck, check_quota};
use crate::utils::time::month_bounds_millis;
use crate::utils::{AppError, AppResult};
use shared::models::{Product, ProductCreate, ProductUpdate, Role};

/// Create a product for the acting vendor's company.
///
/// The quota window is the current calendar month in the business
/// timezone; only brand-new products are checked, edits never are.
pub async fn create_product(
    pool: &SqlitePool,
    tz: Tz,
    user: &CurrentUser,
    data: ProductCreate,
) -> AppResult<Product> {
    if user.role != Role::Vendor {
        return Err(AppError::forbidden("Only vendors can add products"));
    }
    let company_id = user.company_id.ok_or_else(|| {
        AppError::forbidden("Vendor must be linked to a company before adding products")
    })?;

    let company = company_repo::find_by_id(pool, company_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Company {company_id}")))?;

    let plan = company.subscription_plan;
    let limit = plan.monthly_product_limit();
    let window = month_bounds_millis(shared::util::now_millis(), tz);

    if limit.is_some() {
        let existing = product_repo::count_created_in_window(pool, company_id, window).await?;
        if let QuotaCheck::Deny { limit } = check_quota(plan, existing) {
            return Err(AppError::QuotaExceeded {
                limit,
                plan: plan.to_string(),
            });
        }
    }

    match product_repo::insert_guarded(pool, company_id, user.id, &data, limit, window).await? {
        Some(product) => {
            tracing::info!(product_id = product.id, company_id, "Product created");
            Ok(product)
        }
        // The guarded insert lost a race with a concurrent creation
        None => Err(AppError::QuotaExceeded {
            limit: limit.unwrap_or_default(),
            plan: plan.to_string(),
        }),
    }
}

/// Update a product. No quota check — the quota is a creation-time gate.
pub async fn update_product(
    pool: &SqlitePool,
    user: &CurrentUser,
    product_id: i64,
    data: ProductUpdate,
) -> AppResult<Product> {
    require_product_access(pool, user, product_id).await?;
    Ok(product_repo::update(pool, product_id, data).await?)
}

pub async fn delete_product(
    pool: &SqlitePool,
    user: &CurrentUser,
    product_id: i64,
) -> AppResult<()> {
    require_product_access(pool, user, product_id).await?;
    product_repo::delete(pool, product_id).await?;
    tracing::info!(product_id, "Product deleted");
    Ok(())
}

/// Vendors may touch only their own company's products; staff anything
async fn require_product_access(
    pool: &SqlitePool,
    user: &CurrentUser,
    product_id: i64,
) -> AppResult<()> {
    let product = product_repo::find_by_id(pool, product_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {product_id}")))?;

    match user.role {
        Role::Staff => Ok(()),
        Role::Vendor if user.company_id == Some(product.company_id) => Ok(()),
        _ => Err(AppError::forbidden(
            "You are not authorized to modify this product",
        )),
    }
}
