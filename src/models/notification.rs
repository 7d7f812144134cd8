use serde::{Deserialize, Serialize};

/// Notification classification for a tracked product. Mutually
/// exclusive; the classifier returns exactly one, first match wins in
/// priority order (stock > lowest price > threshold).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// First-time scrape of a newly added product; onboarding email
    Welcome,
    /// Product came back in stock
    ChangeOfStock,
    /// New all-time low against the recorded history
    LowestPrice,
    /// Discount rate crossed the configured threshold
    ThresholdMet,
    /// No email
    None,
}

impl NotificationKind {
    /// Convert from database string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "welcome" => Ok(NotificationKind::Welcome),
            "change_of_stock" => Ok(NotificationKind::ChangeOfStock),
            "lowest_price" => Ok(NotificationKind::LowestPrice),
            "threshold_met" => Ok(NotificationKind::ThresholdMet),
            "none" => Ok(NotificationKind::None),
            _ => Err(format!("Invalid notification kind: {}", s)),
        }
    }

    /// Convert to database string
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Welcome => "welcome",
            NotificationKind::ChangeOfStock => "change_of_stock",
            NotificationKind::LowestPrice => "lowest_price",
            NotificationKind::ThresholdMet => "threshold_met",
            NotificationKind::None => "none",
        }
    }

    /// Whether this classification results in an email
    pub fn sends_email(&self) -> bool {
        !matches!(self, NotificationKind::None)
    }
}

impl From<String> for NotificationKind {
    fn from(s: String) -> Self {
        Self::from_str(&s).unwrap_or(NotificationKind::None)
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.as_str().to_string()
    }
}
