use crate::config::TrackerConfig;
use crate::error::{AppError, AppResult};
use crate::models::{PricePoint, Product};
use crate::repositories::{ProductRepository, SubscriptionRepository};
use crate::services::mailer::{MailClient, OutgoingMail};
use crate::services::notifier::{classify_notification, NotifyConfig};
use crate::services::pricing::compute_price_stats;
use crate::services::scraper::ScrapeClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{debug, error, info, warn};

/// Per-cycle accounting. Failures are per-product; the cycle always
/// reports the partial results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerReport {
    pub updated: usize,
    pub skipped: usize,
    pub failed: usize,
    pub notified: usize,
}

enum UpdateOutcome {
    Updated { notified: bool },
    Skipped,
}

/// Update orchestrator: on each tick, re-scrapes every tracked product,
/// persists the refreshed snapshot and mails subscribers whose
/// notification conditions fired.
pub struct ProductTracker {
    product_repo: Arc<ProductRepository>,
    subscription_repo: Arc<SubscriptionRepository>,
    scraper: Arc<ScrapeClient>,
    mailer: Arc<MailClient>,
    notify_config: NotifyConfig,
    poll_interval: Duration,
}

impl ProductTracker {
    /// Create a new ProductTracker
    pub fn new(
        product_repo: Arc<ProductRepository>,
        subscription_repo: Arc<SubscriptionRepository>,
        scraper: Arc<ScrapeClient>,
        mailer: Arc<MailClient>,
        config: &TrackerConfig,
    ) -> Self {
        Self {
            product_repo,
            subscription_repo,
            scraper,
            mailer,
            notify_config: NotifyConfig::new(config.discount_threshold),
            poll_interval: config.poll_interval(),
        }
    }

    /// Set poll interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Start the update loop
    pub async fn start(self) {
        let mut interval = time::interval(self.poll_interval);
        info!("Product tracker started, polling every {:?}", self.poll_interval);

        loop {
            interval.tick().await;

            match self.run_once().await {
                Ok(report) => {
                    info!(
                        "Update cycle complete: {} updated, {} skipped, {} failed, {} notified",
                        report.updated, report.skipped, report.failed, report.notified
                    );
                }
                Err(e) => {
                    error!("Update cycle failed: {}", e);
                }
            }
        }
    }

    /// Run a single update cycle over all tracked products.
    ///
    /// Products are fanned out concurrently; each product's
    /// scrape -> aggregate -> persist -> notify chain is independent and
    /// runs at most once per cycle. Returns `Err` only when the product
    /// list itself cannot be loaded.
    pub async fn run_once(&self) -> AppResult<TrackerReport> {
        let products = self.product_repo.find_all().await?;

        if products.is_empty() {
            debug!("No tracked products, nothing to update");
            return Ok(TrackerReport::default());
        }

        let results = futures::future::join_all(
            products.iter().map(|product| self.update_product(product)),
        )
        .await;

        let mut report = TrackerReport::default();
        for (product, result) in products.iter().zip(results) {
            match result {
                Ok(UpdateOutcome::Updated { notified }) => {
                    report.updated += 1;
                    if notified {
                        report.notified += 1;
                    }
                }
                Ok(UpdateOutcome::Skipped) => {
                    debug!("No data scraped for {}", product.url);
                    report.skipped += 1;
                }
                Err(e) => {
                    warn!("Update failed for {}: {}", product.url, e);
                    report.failed += 1;
                }
            }
        }

        Ok(report)
    }

    /// Update a single product: scrape, append the observed price,
    /// recompute aggregates, persist, then classify against the
    /// pre-update snapshot and mail subscribers if a condition fired.
    async fn update_product(&self, previous: &Product) -> AppResult<UpdateOutcome> {
        let scraped = match self.scraper.scrape(&previous.url).await? {
            Some(scraped) => scraped,
            None => return Ok(UpdateOutcome::Skipped),
        };

        let mut history = previous.price_history_vec();
        history.push(PricePoint::new(scraped.current_price));

        let stats = compute_price_stats(&history)?;

        let updated = previous.with_scrape(
            &scraped,
            history,
            stats.lowest,
            stats.highest,
            stats.average,
        );
        let updated = self.product_repo.find_one_and_update(&updated).await?;

        // The classifier compares against the snapshot from before this
        // cycle's append.
        let kind = classify_notification(Some(previous), &scraped, &self.notify_config);
        if !kind.sends_email() {
            return Ok(UpdateOutcome::Updated { notified: false });
        }

        let recipients = self.subscription_repo.emails_for_product(updated.id).await?;
        if recipients.is_empty() {
            debug!("{} fired for {} but it has no subscribers", kind.as_str(), updated.url);
            return Ok(UpdateOutcome::Updated { notified: false });
        }

        let mail = OutgoingMail::for_notification(kind, &updated.title, &updated.url)?;
        if let Err(e) = self.mailer.send(&mail, &recipients).await {
            // The snapshot is already persisted; a lost mail does not
            // fail the product's update.
            warn!("Failed to send {} mail for {}: {}", kind.as_str(), updated.url, e);
            return Ok(UpdateOutcome::Updated { notified: false });
        }

        info!(
            "Sent {} notification for {} to {} subscribers",
            kind.as_str(),
            updated.url,
            recipients.len()
        );

        Ok(UpdateOutcome::Updated { notified: true })
    }
}
