//! Shared fixtures for integration tests
#![allow(dead_code)]

use sqlx::SqlitePool;
use tempfile::TempDir;

use souq_server::auth::CurrentUser;
use souq_server::db::DbService;
use souq_server::db::repository::{company as company_repo, product as product_repo, user as user_repo};
use shared::SubscriptionPlan;
use shared::models::{Company, CompanyCreate, Product, ProductCreate, Role, User};

/// A temp-file backed database; the TempDir guard must stay alive for the
/// duration of the test.
pub struct TestDb {
    _dir: TempDir,
    pub pool: SqlitePool,
}

pub async fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("test.db");
    let db = DbService::new(path.to_str().expect("utf-8 path"))
        .await
        .expect("open test db");
    TestDb {
        _dir: dir,
        pool: db.pool,
    }
}

pub async fn seed_company(pool: &SqlitePool, plan: SubscriptionPlan) -> Company {
    company_repo::create(
        pool,
        CompanyCreate {
            name: format!("Company-{}", shared::util::snowflake_id()),
            tax_number: None,
            address: None,
            subscription_plan: Some(plan),
        },
    )
    .await
    .expect("seed company")
}

pub async fn seed_user(pool: &SqlitePool, role: Role, company_id: Option<i64>) -> User {
    let tag = shared::util::snowflake_id();
    user_repo::create(
        pool,
        &format!("010{tag}"),
        &format!("user{tag}@test.local"),
        role,
        company_id,
    )
    .await
    .expect("seed user")
}

/// Insert a product directly (no quota gate) for order/ledger tests
pub async fn seed_product(
    pool: &SqlitePool,
    company: &Company,
    vendor: &User,
    price: f64,
    stock: i64,
    discount: f64,
) -> Product {
    let tag = shared::util::snowflake_id();
    product_repo::insert_guarded(
        pool,
        company.id,
        vendor.id,
        &ProductCreate {
            name: format!("Product-{tag}"),
            slug: format!("product-{tag}"),
            description: None,
            category_id: None,
            price,
            stock,
            discount: Some(discount),
        },
        None,
        (0, 0),
    )
    .await
    .expect("seed product")
    .expect("unlimited insert always lands")
}

pub fn acting(user: &User) -> CurrentUser {
    CurrentUser {
        id: user.id,
        role: user.role,
        company_id: user.company_id,
    }
}
