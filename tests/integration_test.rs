mod helpers;

use helpers::*;
use pricewatch_backend::error::AppError;
use sqlx::PgPool;

// ============================================================================
// Subscription Service: track
// ============================================================================

#[sqlx::test]
async fn test_track_rejects_empty_url(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let service = test_subscription_service(&db);

    let result = service.track("").await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[sqlx::test]
async fn test_track_returns_existing_product(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let service = test_subscription_service(&db);

    let created = create_test_product(&db, "https://shop.example/item/1", 100).await;

    // The scrape endpoint is unreachable, so this only succeeds because
    // an already tracked url short-circuits before scraping.
    let tracked = service
        .track("https://shop.example/item/1")
        .await
        .expect("existing product should be returned without a scrape");

    assert_products_equal(&created, &tracked);

    let count = db.product_repo.count().await.expect("count failed");
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn test_track_surfaces_scrape_failure(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let service = test_subscription_service(&db);

    let result = service.track("https://shop.example/item/404").await;
    assert!(matches!(result, Err(AppError::Scrape(_))));

    // Nothing is persisted for a failed first-time scrape
    let count = db.product_repo.count().await.expect("count failed");
    assert_eq!(count, 0);
}

// ============================================================================
// Subscription Service: subscribe / unsubscribe
// ============================================================================

#[sqlx::test]
async fn test_subscribe_rejects_invalid_email(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let service = test_subscription_service(&db);

    create_test_product(&db, "https://shop.example/item/1", 100).await;

    let result = service
        .subscribe("https://shop.example/item/1", "not-an-email")
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));

    let result = service.subscribe("https://shop.example/item/1", "").await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[sqlx::test]
async fn test_subscribe_requires_tracked_product(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let service = test_subscription_service(&db);

    let result = service
        .subscribe("https://shop.example/item/untracked", "user@example.com")
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[sqlx::test]
async fn test_subscribe_attaches_email_despite_lost_welcome_mail(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let service = test_subscription_service(&db);

    let product = create_test_product(&db, "https://shop.example/item/1", 100).await;

    // The mail endpoint is unreachable, so the Welcome onboarding mail
    // is lost; the subscription must stand regardless.
    let subscription = service
        .subscribe("https://shop.example/item/1", "user@example.com")
        .await
        .expect("subscribe should tolerate a lost welcome mail");

    assert_eq!(subscription.product_id, product.id);
    assert_eq!(subscription.email, "user@example.com");

    assert!(db
        .subscription_repo
        .is_subscribed(product.id, "user@example.com")
        .await
        .expect("is_subscribed failed"));

    // Subscribing again is idempotent
    service
        .subscribe("https://shop.example/item/1", "user@example.com")
        .await
        .expect("second subscribe failed");

    let count = db
        .subscription_repo
        .count_by_product(product.id)
        .await
        .expect("count failed");
    assert_eq!(count, 1);
}

#[sqlx::test]
async fn test_unsubscribe_through_service(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;
    let service = test_subscription_service(&db);

    let product = create_test_product(&db, "https://shop.example/item/1", 100).await;
    db.subscription_repo
        .subscribe(product.id, "user@example.com")
        .await
        .expect("subscribe failed");

    let removed = service
        .unsubscribe("https://shop.example/item/1", "user@example.com")
        .await
        .expect("unsubscribe failed");
    assert!(removed);

    let removed_again = service
        .unsubscribe("https://shop.example/item/1", "user@example.com")
        .await
        .expect("unsubscribe failed");
    assert!(!removed_again);
}
