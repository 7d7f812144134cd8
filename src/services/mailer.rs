use crate::config::MailerConfig;
use crate::error::{AppError, AppResult};
use crate::models::NotificationKind;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Shortened product titles keep subjects scannable in inbox lists
const MAX_TITLE_LEN: usize = 24;

/// A plain-text email ready to hand to the mail collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingMail {
    pub subject: String,
    pub body: String,
}

impl OutgoingMail {
    /// Build the subject/body for a notification classification.
    ///
    /// `NotificationKind::None` has no mail content; asking for one is a
    /// programming error in the caller.
    pub fn for_notification(
        kind: NotificationKind,
        product_title: &str,
        product_url: &str,
    ) -> AppResult<Self> {
        let title = shorten_title(product_title);

        let mail = match kind {
            NotificationKind::Welcome => Self {
                subject: format!("Welcome to price tracking for {}", title),
                body: format!(
                    "You are now tracking {}.\n\nWe will email you when it comes \
                     back in stock, hits a new lowest price, or its discount \
                     crosses the alert threshold.\n\n{}",
                    title, product_url
                ),
            },
            NotificationKind::ChangeOfStock => Self {
                subject: format!("{} is back in stock!", title),
                body: format!(
                    "{} is available again. Grab it before it sells out:\n\n{}",
                    title, product_url
                ),
            },
            NotificationKind::LowestPrice => Self {
                subject: format!("Lowest price alert for {}", title),
                body: format!(
                    "{} just hit its lowest recorded price.\n\n{}",
                    title, product_url
                ),
            },
            NotificationKind::ThresholdMet => Self {
                subject: format!("Discount alert for {}", title),
                body: format!(
                    "{} is now selling at a discount above your alert \
                     threshold.\n\n{}",
                    title, product_url
                ),
            },
            NotificationKind::None => {
                return Err(AppError::InvalidInput(
                    "no mail content for a 'none' classification".to_string(),
                ))
            }
        };

        Ok(mail)
    }
}

fn shorten_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_LEN {
        title.to_string()
    } else {
        let short: String = title.chars().take(MAX_TITLE_LEN).collect();
        format!("{}..", short.trim_end())
    }
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    body: &'a str,
}

/// Client for the external mail collaborator.
///
/// The tracker decides whether and to whom; the collaborator owns the
/// transport. This client just delivers the payload.
pub struct MailClient {
    client: Client,
    endpoint: String,
    sender: String,
    request_timeout: Duration,
}

impl MailClient {
    /// Create a new MailClient from config
    pub fn new(config: &MailerConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: config.endpoint.clone(),
            sender: config.sender.clone(),
            request_timeout: config.request_timeout(),
        }
    }

    /// Send a mail to the given recipients. Sending to nobody is a no-op.
    pub async fn send(&self, mail: &OutgoingMail, recipients: &[String]) -> AppResult<()> {
        if recipients.is_empty() {
            return Ok(());
        }

        let request_body = SendRequest {
            from: &self.sender,
            to: recipients,
            subject: &mail.subject,
            body: &mail.body,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request_body)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| AppError::Mail(format!("Mail request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Mail(format!(
                "Mail endpoint returned {}",
                response.status()
            )));
        }

        Ok(())
    }
}
