mod helpers;

use helpers::*;
use pricewatch_backend::models::*;
use pricewatch_backend::services::pricing::compute_price_stats;
use rust_decimal::Decimal;
use sqlx::PgPool;

// ============================================================================
// Connection Pool Tests
// ============================================================================

#[sqlx::test]
async fn test_connection_pool_creation(pool: PgPool) {
    // Test that we can execute a simple query
    let result = sqlx::query("SELECT 1").execute(&pool).await;

    assert!(result.is_ok());
}

// ============================================================================
// Migration Tests
// ============================================================================

#[sqlx::test]
async fn test_migrations_ran(pool: PgPool) {
    // Verify that all tables exist
    let tables = vec!["products", "product_subscriptions"];

    for table in tables {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT FROM information_schema.tables
                WHERE table_name = $1
            )",
        )
        .bind(table)
        .fetch_one(&pool)
        .await
        .expect("information_schema query failed");

        assert!(exists, "Table {} should exist", table);
    }
}

// ============================================================================
// Product Repository Tests
// ============================================================================

#[sqlx::test]
async fn test_create_and_find_product(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;

    let created = create_test_product(&db, "https://shop.example/item/1", 100).await;

    let found = db
        .product_repo
        .find_by_url("https://shop.example/item/1")
        .await
        .expect("find_by_url failed")
        .expect("product should exist");

    assert_products_equal(&created, &found);
    assert_eq!(found.history_len(), 1);
    assert_eq!(found.lowest_price, Decimal::new(100, 0));
}

#[sqlx::test]
async fn test_duplicate_url_rejected(pool: PgPool) {
    use pricewatch_backend::error::RepositoryError;

    let db = TestDatabase::from_pool(pool).await;

    create_test_product(&db, "https://shop.example/item/1", 100).await;

    let scraped = test_scraped("https://shop.example/item/1", 90, 0, false);
    let result = db.product_repo.create(&Product::from_scrape(&scraped)).await;

    // Unique violation maps to the Duplicate variant, not a raw query error
    assert!(matches!(result, Err(RepositoryError::Duplicate(_))));
}

#[sqlx::test]
async fn test_find_one_and_update_grows_history(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;

    let previous = create_test_product(&db, "https://shop.example/item/1", 100).await;

    // Second observation at a lower price
    let scraped = test_scraped("https://shop.example/item/1", 80, 0, false);
    let mut history = previous.price_history_vec();
    history.push(PricePoint::new(scraped.current_price));
    let stats = compute_price_stats(&history).expect("non-empty history");

    let updated = db
        .product_repo
        .find_one_and_update(&previous.with_scrape(
            &scraped,
            history,
            stats.lowest,
            stats.highest,
            stats.average,
        ))
        .await
        .expect("update failed");

    assert_eq!(updated.id, previous.id);
    assert_eq!(updated.history_len(), 2);
    assert_eq!(updated.current_price, Decimal::new(80, 0));
    assert_eq!(updated.lowest_price, Decimal::new(80, 0));
    assert_eq!(updated.highest_price, Decimal::new(100, 0));
    assert_eq!(updated.average_price, Decimal::new(90, 0));
}

#[sqlx::test]
async fn test_find_all_ordering(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;

    create_test_product(&db, "https://shop.example/item/1", 10).await;
    create_test_product(&db, "https://shop.example/item/2", 20).await;

    let all = db.product_repo.find_all().await.expect("find_all failed");
    assert_eq!(all.len(), 2);

    let count = db.product_repo.count().await.expect("count failed");
    assert_eq!(count, 2);
}

// ============================================================================
// Subscription Repository Tests
// ============================================================================

#[sqlx::test]
async fn test_subscribe_is_idempotent(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;

    let product = create_test_product(&db, "https://shop.example/item/1", 100).await;

    db.subscription_repo
        .subscribe(product.id, "user@example.com")
        .await
        .expect("first subscribe failed");
    db.subscription_repo
        .subscribe(product.id, "user@example.com")
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
async fn test_emails_for_product(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;

    let product = create_test_product(&db, "https://shop.example/item/1", 100).await;

    db.subscription_repo
        .subscribe(product.id, "first@example.com")
        .await
        .expect("subscribe failed");
    db.subscription_repo
        .subscribe(product.id, "second@example.com")
        .await
        .expect("subscribe failed");

    let emails = db
        .subscription_repo
        .emails_for_product(product.id)
        .await
        .expect("emails_for_product failed");

    assert_eq!(emails, vec!["first@example.com", "second@example.com"]);

    assert!(db
        .subscription_repo
        .is_subscribed(product.id, "first@example.com")
        .await
        .expect("is_subscribed failed"));
}

#[sqlx::test]
async fn test_unsubscribe(pool: PgPool) {
    let db = TestDatabase::from_pool(pool).await;

    let product = create_test_product(&db, "https://shop.example/item/1", 100).await;

    db.subscription_repo
        .subscribe(product.id, "user@example.com")
        .await
        .expect("subscribe failed");

    let removed = db
        .subscription_repo
        .unsubscribe(product.id, "user@example.com")
        .await
        .expect("unsubscribe failed");
    assert!(removed);

    let removed_again = db
        .subscription_repo
        .unsubscribe(product.id, "user@example.com")
        .await
        .expect("unsubscribe failed");
    assert!(!removed_again);
}

#[sqlx::test]
async fn test_cascade_on_product_delete(pool: PgPool) {
    let db = TestDatabase::from_pool(pool.clone()).await;

    let product = create_test_product(&db, "https://shop.example/item/1", 100).await;
    db.subscription_repo
        .subscribe(product.id, "user@example.com")
        .await
        .expect("subscribe failed");

    sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(product.id)
        .execute(&pool)
        .await
        .expect("delete failed");

    let count = db
        .subscription_repo
        .count_by_product(product.id)
        .await
        .expect("count failed");
    assert_eq!(count, 0);
}
