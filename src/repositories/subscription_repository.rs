//! Repository for product subscription data access

use crate::error::RepositoryError;
use crate::models::Subscription;
use sqlx::PgPool;
use uuid::Uuid;

pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    /// Create a new SubscriptionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach a subscriber email to a product (idempotent)
    pub async fn subscribe(
        &self,
        product_id: Uuid,
        email: &str,
    ) -> Result<Subscription, RepositoryError> {
        let subscription = sqlx::query_as::<_, Subscription>(
            r#"
            INSERT INTO product_subscriptions (product_id, email)
            VALUES ($1, $2)
            ON CONFLICT (product_id, email) DO UPDATE
            SET email = EXCLUDED.email
            RETURNING product_id, email, subscribed_at
            "#,
        )
        .bind(product_id)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(subscription)
    }

    /// Detach a subscriber email from a product
    pub async fn unsubscribe(&self, product_id: Uuid, email: &str) -> Result<bool, RepositoryError> {
        let rows_affected = sqlx::query(
            r#"
            DELETE FROM product_subscriptions
            WHERE product_id = $1 AND email = $2
            "#,
        )
        .bind(product_id)
        .bind(email)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(rows_affected > 0)
    }

    /// Find all subscriptions for a product
    pub async fn find_by_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<Subscription>, RepositoryError> {
        let subscriptions = sqlx::query_as::<_, Subscription>(
            r#"
            SELECT product_id, email, subscribed_at
            FROM product_subscriptions
            WHERE product_id = $1
            ORDER BY subscribed_at ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(subscriptions)
    }

    /// Get the subscriber emails for a product, oldest first
    pub async fn emails_for_product(&self, product_id: Uuid) -> Result<Vec<String>, RepositoryError> {
        let emails = sqlx::query_scalar::<_, String>(
            r#"
            SELECT email
            FROM product_subscriptions
            WHERE product_id = $1
            ORDER BY subscribed_at ASC
            "#,
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(emails)
    }

    /// Check if an email is subscribed to a product
    pub async fn is_subscribed(&self, product_id: Uuid, email: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            SELECT 1
            FROM product_subscriptions
            WHERE product_id = $1 AND email = $2
            LIMIT 1
            "#,
        )
        .bind(product_id)
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(result.is_some())
    }

    /// Get subscriber count for a product
    pub async fn count_by_product(&self, product_id: Uuid) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM product_subscriptions
            WHERE product_id = $1
            "#,
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }
}
