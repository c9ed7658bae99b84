//! Claim notifications.
//!
//! The registry only requires the [`Notifier`] seam: given the claimed item's
//! display name, tell the operator, best-effort. Delivery runs strictly after
//! the claim is committed — a failed notification never reverses a claim, it
//! is surfaced to the caller as a distinct condition.

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;
use thiserror::Error;

use crate::config::NotifyConfig;

/// Notification transport or remote-API failure.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("email API returned {status}: {body}")]
    Api { status: u16, body: String },
}

/// Outbound notification sink for successful claims.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, item_name: &str) -> Result<(), NotifyError>;
}

// ─── EmailNotifier ────────────────────────────────────────────────────────────

/// Request timeout for the email API. Delivery is best-effort; a slow
/// provider must not hold the claim response hostage.
const NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends claim notifications through a transactional-email HTTP API.
pub struct EmailNotifier {
    client: reqwest::Client,
    config: NotifyConfig,
}

impl EmailNotifier {
    /// Build the notifier from validated config.
    ///
    /// Credentials were already checked at startup; this only constructs the
    /// HTTP client.
    pub fn new(config: NotifyConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(NOTIFY_TIMEOUT)
            .build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, item_name: &str) -> Result<(), NotifyError> {
        let resp = self
            .client
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "from": self.config.from,
                "to": [self.config.to],
                "subject": format!("Presente escolhido: {item_name}"),
                "text": format!("O presente \"{item_name}\" acabou de ser escolhido na lista."),
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Api { status, body });
        }

        Ok(())
    }
}
