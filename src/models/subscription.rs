use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Subscription model linking a subscriber email to a tracked product
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Subscription {
    pub product_id: Uuid,
    pub email: String,
    pub subscribed_at: NaiveDateTime,
}

impl Subscription {
    /// Create a new Subscription (typically used for creating from API input)
    pub fn new(product_id: Uuid, email: String) -> Self {
        Self {
            product_id,
            email,
            subscribed_at: chrono::Utc::now().naive_utc(),
        }
    }
}
