use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Freshly scraped product snapshot, as returned by the scrape
/// collaborator. Same identity key (`url`) as the persisted product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapedProduct {
    pub url: String,
    pub title: String,
    pub currency: String,
    pub current_price: Decimal,
    pub original_price: Decimal,
    /// Whole-number discount percentage (0-100)
    pub discount_rate: Decimal,
    pub is_out_of_stock: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}
