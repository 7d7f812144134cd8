pub mod mailer;
pub mod notifier;
pub mod pricing;
pub mod scraper;
pub mod subscriptions;
pub mod tracker;

pub use mailer::{MailClient, OutgoingMail};
pub use notifier::{classify_notification, NotifyConfig};
pub use pricing::{compute_price_stats, PriceStats, PricingError};
pub use scraper::ScrapeClient;
pub use subscriptions::SubscriptionService;
pub use tracker::{ProductTracker, TrackerReport};
