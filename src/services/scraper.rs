use crate::config::ScraperConfig;
use crate::error::{AppError, AppResult};
use crate::models::ScrapedProduct;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Client for the external scrape collaborator.
///
/// The collaborator fetches and parses the product page; this client
/// only speaks JSON to it. A failed scrape is not an error for the
/// caller, it means "no update this cycle" for that product.
pub struct ScrapeClient {
    client: Client,
    endpoint: String,
    request_timeout: Duration,
}

impl ScrapeClient {
    /// Create a new ScrapeClient from config
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Scrape a product page through the collaborator.
    ///
    /// Returns `Ok(None)` when the scrape fails (transport error or
    /// non-success status); the product is skipped for this cycle. A
    /// response that cannot be decoded is an error.
    pub async fn scrape(&self, url: &str) -> AppResult<Option<ScrapedProduct>> {
        let request_body = serde_json::json!({ "url": url });

        let response = match self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .timeout(self.request_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!("Scrape request failed for {}: {}", url, e);
                return Ok(None);
            }
        };

        if !response.status().is_success() {
            warn!("Scrape returned {} for {}", response.status(), url);
            return Ok(None);
        }

        let scraped = response
            .json::<ScrapedProduct>()
            .await
            .map_err(|e| AppError::Scrape(format!("Invalid scrape payload for {}: {}", url, e)))?;

        Ok(Some(scraped))
    }
}
