//! Post-deploy notification.
//!
//! After a successful deploy, the control plane at `sahUrl` is told about it
//! with a single `POST` of an empty JSON object, authenticated with
//! `Authorization: Bearer <sahToken>`. Delivery is best effort: there is one
//! attempt under its own timeout, and every failure is logged and reported as
//! a [`NotifyOutcome`] rather than an error, so it can never fail a deploy.

use std::fmt;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::NotifyConfig;

/// Result of a notification attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// URL or token not configured; nothing was sent
    Skipped,
    /// The endpoint answered with a 2xx status
    Delivered {
        /// HTTP status code
        status: u16,
    },
    /// Network error, timeout, or non-2xx status
    Failed {
        /// Human-readable cause
        reason: String,
    },
}

impl NotifyOutcome {
    /// Whether the endpoint acknowledged the notification.
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

impl fmt::Display for NotifyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Skipped => write!(f, "skipped (sahUrl or sahToken not set)"),
            Self::Delivered {
                status,
            } => write!(f, "delivered (HTTP {status})"),
            Self::Failed {
                reason,
            } => write!(f, "failed: {reason}"),
        }
    }
}

/// Notify the control plane that a deploy finished.
///
/// Never returns an error; see [`NotifyOutcome`].
pub async fn notify(config: &NotifyConfig, timeout: Duration) -> NotifyOutcome {
    if !config.is_configured() {
        debug!("Notification not configured; skipping");
        return NotifyOutcome::Skipped;
    }

    let outcome = match send(config, timeout).await {
        Ok(status) if (200..300).contains(&status) => NotifyOutcome::Delivered {
            status,
        },
        Ok(status) => NotifyOutcome::Failed {
            reason: format!("HTTP {status}"),
        },
        Err(e) => NotifyOutcome::Failed {
            reason: describe(&e),
        },
    };

    match &outcome {
        NotifyOutcome::Failed {
            reason,
        } => warn!("Failed to notify {}: {}", config.url, reason),
        _ => info!("Notified {}: {}", config.url, outcome),
    }
    outcome
}

async fn send(config: &NotifyConfig, timeout: Duration) -> Result<u16, reqwest::Error> {
    let client = reqwest::Client::builder().timeout(timeout).build()?;
    let response =
        client.post(&config.url).bearer_auth(&config.token).json(&json!({})).send().await?;
    Ok(response.status().as_u16())
}

fn describe(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_builder() {
        format!("invalid request: {error}")
    } else {
        error.to_string()
    }
}
