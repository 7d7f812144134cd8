use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::ScrapedProduct;

/// A single observed price. Immutable once recorded; stored inside the
/// product row's JSONB history column, insertion order = chronological
/// order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricePoint {
    pub price: Decimal,
    pub recorded_at: NaiveDateTime,
}

impl PricePoint {
    /// Record a price observation at the current time
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            recorded_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Product model representing a tracked product page
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: Uuid,
    pub url: String, // Unique identity key
    pub title: String,
    pub currency: String,
    pub current_price: Decimal,
    pub original_price: Decimal,
    pub discount_rate: Decimal,
    pub price_history: Value, // JSONB stored as serde_json::Value
    pub lowest_price: Decimal,
    pub highest_price: Decimal,
    pub average_price: Decimal,
    pub is_out_of_stock: bool,
    pub image_url: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Create a new Product from a first-time scrape. The history starts
    /// with a single point, so all three aggregates equal the current
    /// price.
    pub fn from_scrape(scraped: &ScrapedProduct) -> Self {
        let now = chrono::Utc::now().naive_utc();
        let history = vec![PricePoint::new(scraped.current_price)];

        Self {
            id: Uuid::new_v4(),
            url: scraped.url.clone(),
            title: scraped.title.clone(),
            currency: scraped.currency.clone(),
            current_price: scraped.current_price,
            original_price: scraped.original_price,
            discount_rate: scraped.discount_rate,
            price_history: Self::history_to_json(&history),
            lowest_price: scraped.current_price,
            highest_price: scraped.current_price,
            average_price: scraped.current_price,
            is_out_of_stock: scraped.is_out_of_stock,
            image_url: scraped.image_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Build the updated product value from the previous row, the fresh
    /// scrape, the appended history and the recomputed aggregates.
    /// Returns a new value; the previous row is left untouched.
    pub fn with_scrape(
        &self,
        scraped: &ScrapedProduct,
        history: Vec<PricePoint>,
        lowest_price: Decimal,
        highest_price: Decimal,
        average_price: Decimal,
    ) -> Self {
        Self {
            id: self.id,
            url: self.url.clone(),
            title: scraped.title.clone(),
            currency: scraped.currency.clone(),
            current_price: scraped.current_price,
            original_price: scraped.original_price,
            discount_rate: scraped.discount_rate,
            price_history: Self::history_to_json(&history),
            lowest_price,
            highest_price,
            average_price,
            is_out_of_stock: scraped.is_out_of_stock,
            image_url: scraped.image_url.clone().or_else(|| self.image_url.clone()),
            created_at: self.created_at,
            updated_at: chrono::Utc::now().naive_utc(),
        }
    }

    /// Get the price history as a vector of price points
    pub fn price_history_vec(&self) -> Vec<PricePoint> {
        serde_json::from_value(self.price_history.clone()).unwrap_or_default()
    }

    /// Serialize a price history back into the JSONB column value
    pub fn history_to_json(history: &[PricePoint]) -> Value {
        serde_json::to_value(history).unwrap_or(Value::Array(vec![]))
    }

    /// Number of recorded price points
    pub fn history_len(&self) -> usize {
        match &self.price_history {
            Value::Array(arr) => arr.len(),
            _ => 0,
        }
    }
}
