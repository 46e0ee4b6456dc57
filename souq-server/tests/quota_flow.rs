//! Plan quota enforcement tests: monthly product-creation limits per
//! subscription plan, including the exact 10th/11th boundary.

mod common;

use common::{acting, seed_company, seed_user, setup};
use chrono_tz::Africa::Cairo;
use shared::SubscriptionPlan;
use shared::models::{ProductCreate, Role};
use souq_server::services::catalog;
use souq_server::utils::AppError;

fn payload(n: usize) -> ProductCreate {
    let tag = shared::util::snowflake_id();
    ProductCreate {
        name: format!("Widget {n}"),
        slug: format!("widget-{tag}"),
        description: None,
        category_id: None,
        price: 10.0,
        stock: 100,
        discount: None,
    }
}

#[tokio::test]
async fn free_plan_allows_ten_then_denies() {
    let db = setup().await;
    let company = seed_company(&db.pool, SubscriptionPlan::Free).await;
    let vendor = seed_user(&db.pool, Role::Vendor, Some(company.id)).await;
    let user = acting(&vendor);

    // Products 1-10 land
    for n in 1..=10 {
        catalog::create_product(&db.pool, Cairo, &user, payload(n))
            .await
            .unwrap_or_else(|e| panic!("product {n} should pass the quota: {e:?}"));
    }

    // The 11th hits the monthly limit
    let err = catalog::create_product(&db.pool, Cairo, &user, payload(11))
        .await
        .unwrap_err();

    match err {
        AppError::QuotaExceeded { limit, plan } => {
            assert_eq!(limit, 10);
            assert_eq!(plan, "free");
        }
        other => panic!("expected QuotaExceeded, got {other:?}"),
    }
}

#[tokio::test]
async fn premium_plan_is_unlimited() {
    let db = setup().await;
    let company = seed_company(&db.pool, SubscriptionPlan::Premium).await;
    let vendor = seed_user(&db.pool, Role::Vendor, Some(company.id)).await;
    let user = acting(&vendor);

    for n in 1..=200 {
        catalog::create_product(&db.pool, Cairo, &user, payload(n))
            .await
            .unwrap_or_else(|e| panic!("premium product {n} should land: {e:?}"));
    }
}

#[tokio::test]
async fn quota_counts_per_company_not_per_vendor() {
    let db = setup().await;
    let company = seed_company(&db.pool, SubscriptionPlan::Free).await;
    let first = seed_user(&db.pool, Role::Vendor, Some(company.id)).await;
    let second = seed_user(&db.pool, Role::Vendor, Some(company.id)).await;

    for n in 1..=10 {
        catalog::create_product(&db.pool, Cairo, &acting(&first), payload(n))
            .await
            .unwrap();
    }

    // A different vendor of the same company is still capped
    let err = catalog::create_product(&db.pool, Cairo, &acting(&second), payload(11))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::QuotaExceeded { .. }));
}

#[tokio::test]
async fn edits_never_hit_the_quota() {
    let db = setup().await;
    let company = seed_company(&db.pool, SubscriptionPlan::Free).await;
    let vendor = seed_user(&db.pool, Role::Vendor, Some(company.id)).await;
    let user = acting(&vendor);

    let mut last = None;
    for n in 1..=10 {
        last = Some(
            catalog::create_product(&db.pool, Cairo, &user, payload(n))
                .await
                .unwrap(),
        );
    }

    // At the cap, updating an existing product still works
    let product = last.unwrap();
    let updated = catalog::update_product(
        &db.pool,
        &user,
        product.id,
        shared::models::ProductUpdate {
            name: Some("Renamed".into()),
            slug: None,
            description: None,
            category_id: None,
            price: Some(12.5),
            stock: None,
            discount: None,
            is_active: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.price, 12.5);
}

#[tokio::test]
async fn non_vendors_cannot_create_products() {
    let db = setup().await;
    let _company = seed_company(&db.pool, SubscriptionPlan::Free).await;
    let customer = seed_user(&db.pool, Role::Customer, None).await;

    let err = catalog::create_product(&db.pool, Cairo, &acting(&customer), payload(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
async fn vendor_without_company_is_rejected() {
    let db = setup().await;
    let vendor = seed_user(&db.pool, Role::Vendor, None).await;

    let err = catalog::create_product(&db.pool, Cairo, &acting(&vendor), payload(1))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
