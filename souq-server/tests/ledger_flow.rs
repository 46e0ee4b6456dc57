//! Transaction ledger tests: amount snapshotting, reference generation,
//! ownership, and gateway-callback notifications.

mod common;

use common::{acting, seed_company, seed_product, seed_user, setup};
use shared::SubscriptionPlan;
use shared::models::{
    GatewayResult, OrderCreate, OrderLineInput, PaymentMethod, Role, TransactionCreate,
    TransactionStatus,
};
use souq_server::db::repository::{notification as notification_repo, transaction as transaction_repo};
use souq_server::orders;
use souq_server::services::payment;
use souq_server::utils::AppError;

async fn order_for(
    db: &common::TestDb,
    total_product_price: f64,
    stock: i64,
) -> (shared::models::OrderWithItems, shared::models::User) {
    let company = seed_company(&db.pool, SubscriptionPlan::Free).await;
    let vendor = seed_user(&db.pool, Role::Vendor, Some(company.id)).await;
    let customer = seed_user(&db.pool, Role::Customer, None).await;
    let product = seed_product(&db.pool, &company, &vendor, total_product_price, stock, 0.0).await;

    let order = orders::create_order(
        &db.pool,
        &acting(&customer),
        OrderCreate {
            company_id: company.id,
            governorate: Some("Cairo".into()),
            address: None,
            items: vec![OrderLineInput {
                product_id: product.id,
                quantity: 1,
            }],
        },
    )
    .await
    .unwrap();

    (order, customer)
}

#[tokio::test]
async fn amount_snapshots_the_order_total() {
    let db = setup().await;
    let (created, customer) = order_for(&db, 100.0, 10).await;
    let user = acting(&customer);

    // 100 + Cairo shipping 20
    assert_eq!(created.order.total_amount, 120.0);

    let txn = payment::record_transaction(
        &db.pool,
        &user,
        TransactionCreate {
            order_id: created.order.id,
            method: PaymentMethod::Visa,
            status: None,
        },
    )
    .await
    .unwrap();

    assert_eq!(txn.amount, Some(120.0));
    assert_eq!(txn.status, TransactionStatus::Pending);

    // Changing the order afterwards must not move the recorded amount
    let product_id = created.items[0].product_id;
    orders::add_or_update_line(
        &db.pool,
        &user,
        created.order.id,
        OrderLineInput {
            product_id,
            quantity: 3,
        },
    )
    .await
    .unwrap();

    let txn = transaction_repo::find_by_id(&db.pool, txn.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(txn.amount, Some(120.0));
}

#[tokio::test]
async fn references_are_twelve_char_unique_tokens() {
    let db = setup().await;
    let (created, customer) = order_for(&db, 50.0, 100).await;
    let user = acting(&customer);

    let mut seen = std::collections::HashSet::new();
    for _ in 0..20 {
        let txn = payment::record_transaction(
            &db.pool,
            &user,
            TransactionCreate {
                order_id: created.order.id,
                method: PaymentMethod::Wallet,
                status: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(txn.reference_id.len(), 12);
        assert!(
            txn.reference_id
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        );
        assert!(seen.insert(txn.reference_id));
    }
}

#[tokio::test]
async fn recording_against_someone_elses_order_is_rejected() {
    let db = setup().await;
    let (created, _customer) = order_for(&db, 10.0, 10).await;
    let stranger = seed_user(&db.pool, Role::Customer, None).await;

    let err = payment::record_transaction(
        &db.pool,
        &acting(&stranger),
        TransactionCreate {
            order_id: created.order.id,
            method: PaymentMethod::Paypal,
            status: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::OrderNotOwned));
}

#[tokio::test]
async fn gateway_success_flips_status_and_notifies() {
    let db = setup().await;
    let (created, customer) = order_for(&db, 75.0, 10).await;
    let user = acting(&customer);

    let txn = payment::record_transaction(
        &db.pool,
        &user,
        TransactionCreate {
            order_id: created.order.id,
            method: PaymentMethod::Fawry,
            status: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(txn.status, TransactionStatus::Pending);

    let txn = payment::apply_gateway_result(
        &db.pool,
        GatewayResult {
            transaction_id: txn.id,
            status: TransactionStatus::Success,
        },
    )
    .await
    .unwrap();
    assert_eq!(txn.status, TransactionStatus::Success);

    let notifications = notification_repo::find_all_for_user(&db.pool, customer.id)
        .await
        .unwrap();
    assert!(
        notifications
            .iter()
            .any(|n| n.title == "Payment Successful")
    );
}

#[tokio::test]
async fn gateway_failure_notifies_with_retry_message() {
    let db = setup().await;
    let (created, customer) = order_for(&db, 75.0, 10).await;

    let txn = payment::record_transaction(
        &db.pool,
        &acting(&customer),
        TransactionCreate {
            order_id: created.order.id,
            method: PaymentMethod::Visa,
            status: None,
        },
    )
    .await
    .unwrap();

    payment::apply_gateway_result(
        &db.pool,
        GatewayResult {
            transaction_id: txn.id,
            status: TransactionStatus::Failed,
        },
    )
    .await
    .unwrap();

    let notifications = notification_repo::find_all_for_user(&db.pool, customer.id)
        .await
        .unwrap();
    let failed = notifications
        .iter()
        .find(|n| n.title == "Payment Failed")
        .expect("failure notification recorded");
    assert!(failed.message.contains("Please try again"));
}

#[tokio::test]
async fn unknown_transaction_in_callback_is_not_found() {
    let db = setup().await;

    let err = payment::apply_gateway_result(
        &db.pool,
        GatewayResult {
            transaction_id: 424242,
            status: TransactionStatus::Success,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, AppError::NotFound(_)));
}
