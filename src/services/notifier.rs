//! Notification classification for tracked products.
//!
//! Decides which (if any) email a freshly scraped snapshot warrants,
//! given the last persisted state. Pure function of its inputs plus the
//! configured threshold; no database or network access, safe under
//! concurrent fan-out.

use crate::models::{NotificationKind, Product, ScrapedProduct};
use rust_decimal::Decimal;

/// Classifier configuration
#[derive(Debug, Clone, Copy)]
pub struct NotifyConfig {
    /// Discount percentage (0-100) at or above which a threshold
    /// notification becomes eligible
    pub discount_threshold: Decimal,
}

impl NotifyConfig {
    pub fn new(discount_threshold: u32) -> Self {
        Self {
            discount_threshold: Decimal::from(discount_threshold),
        }
    }
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self::new(50)
    }
}

/// Classify a freshly scraped snapshot against the last persisted state.
///
/// Returns exactly one kind, evaluated in strict priority order:
/// back-in-stock, then new all-time low, then threshold crossing. A
/// missing previous snapshot (first-time scrape) short-circuits to
/// `Welcome`. Going out of stock produces no notification.
pub fn classify_notification(
    previous: Option<&Product>,
    current: &ScrapedProduct,
    config: &NotifyConfig,
) -> NotificationKind {
    let previous = match previous {
        Some(p) => p,
        None => return NotificationKind::Welcome,
    };

    // Back-in-stock is the most time-sensitive signal; it overrides the
    // price rules.
    if previous.is_out_of_stock && !current.is_out_of_stock {
        return NotificationKind::ChangeOfStock;
    }

    // New all-time low against the pre-update lowest; ties don't count.
    if current.current_price < previous.lowest_price {
        return NotificationKind::LowestPrice;
    }

    // Fires once per crossing, not on every poll while above threshold.
    if current.discount_rate >= config.discount_threshold
        && current.discount_rate > previous.discount_rate
    {
        return NotificationKind::ThresholdMet;
    }

    NotificationKind::None
}
