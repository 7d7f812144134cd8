use crate::error::{AppError, AppResult};
use crate::models::{NotificationKind, Product, Subscription};
use crate::repositories::{ProductRepository, SubscriptionRepository};
use crate::services::mailer::{MailClient, OutgoingMail};
use crate::services::scraper::ScrapeClient;
use std::sync::Arc;
use tracing::{info, warn};

/// Service for adding products to the watchlist and attaching
/// subscriber emails
pub struct SubscriptionService {
    product_repo: Arc<ProductRepository>,
    subscription_repo: Arc<SubscriptionRepository>,
    scraper: Arc<ScrapeClient>,
    mailer: Arc<MailClient>,
}

impl SubscriptionService {
    pub fn new(
        product_repo: Arc<ProductRepository>,
        subscription_repo: Arc<SubscriptionRepository>,
        scraper: Arc<ScrapeClient>,
        mailer: Arc<MailClient>,
    ) -> Self {
        Self {
            product_repo,
            subscription_repo,
            scraper,
            mailer,
        }
    }

    /// Start tracking a product url. Idempotent: an already tracked url
    /// returns the existing row. A first-time url is scraped once and
    /// persisted with a single-point history.
    pub async fn track(&self, url: &str) -> AppResult<Product> {
        if url.is_empty() {
            return Err(AppError::Validation("Product url must not be empty".to_string()));
        }

        if let Some(existing) = self.product_repo.find_by_url(url).await? {
            return Ok(existing);
        }

        let scraped = self
            .scraper
            .scrape(url)
            .await?
            .ok_or_else(|| AppError::Scrape(format!("No data scraped for {}", url)))?;

        let product = self.product_repo.create(&Product::from_scrape(&scraped)).await?;
        info!("Now tracking {}", product.url);

        Ok(product)
    }

    /// Subscribe an email to a tracked product and send the onboarding
    /// mail. The subscription is idempotent; the mail is sent on every
    /// successful call.
    pub async fn subscribe(&self, url: &str, email: &str) -> AppResult<Subscription> {
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation(format!("Invalid email: {}", email)));
        }

        let product = self
            .product_repo
            .find_by_url(url)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product not tracked: {}", url)))?;

        let subscription = self.subscription_repo.subscribe(product.id, email).await?;

        let mail = OutgoingMail::for_notification(
            NotificationKind::Welcome,
            &product.title,
            &product.url,
        )?;
        if let Err(e) = self.mailer.send(&mail, &[email.to_string()]).await {
            // Subscription stands even if the onboarding mail is lost
            warn!("Failed to send welcome mail to {}: {}", email, e);
        }

        info!("{} subscribed to {}", email, product.url);
        Ok(subscription)
    }

    /// Remove an email's subscription to a product
    pub async fn unsubscribe(&self, url: &str, email: &str) -> AppResult<bool> {
        let product = self
            .product_repo
            .find_by_url(url)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Product not tracked: {}", url)))?;

        Ok(self.subscription_repo.unsubscribe(product.id, email).await?)
    }
}
