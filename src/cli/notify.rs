//! Post-deploy notification in place of the `after:deploy:finalize` hook.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;

use super::{CliConfig, DEFAULT_SERVICE_FILE};
use crate::config::{PluginConfig, parse_service_definition};
use crate::constants::default_notify_timeout;
use crate::hooks::SahPlugin;
use crate::notify::NotifyOutcome;

/// POST a deploy notification to `custom.sah.sahUrl`.
///
/// Delivery failures are reported but never fail the command; only an
/// unreadable service definition or rejected configuration does.
#[derive(Args, Debug)]
pub struct NotifyCommand {
    /// Service definition holding `custom.sah`
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SERVICE_FILE)]
    pub service: PathBuf,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Endpoint overriding `custom.sah.sahUrl`
    #[arg(long, value_name = "URL", env = "SAH_URL")]
    pub url: Option<String>,

    /// Bearer token overriding `custom.sah.sahToken`
    #[arg(long, value_name = "TOKEN", env = "SAH_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl NotifyCommand {
    /// Effective request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout.map_or_else(default_notify_timeout, Duration::from_secs)
    }

    /// Send the notification.
    ///
    /// # Errors
    ///
    /// Fails only if the service definition cannot be read or its
    /// configuration is rejected.
    pub async fn execute(self, config: &CliConfig) -> Result<NotifyOutcome> {
        let service = parse_service_definition(&self.service)?;
        let mut plugin_config = PluginConfig::from_service(&service)?;
        if let Some(url) = self.url.clone() {
            plugin_config.notify.url = url;
        }
        if let Some(token) = self.token.clone() {
            plugin_config.notify.token = token;
        }
        let plugin = SahPlugin::with_config(plugin_config);

        let outcome = plugin.notify(self.timeout()).await;
        if !config.quiet {
            match &outcome {
                NotifyOutcome::Delivered {
                    ..
                } => println!("{} Notification {}", "✓".green(), outcome),
                NotifyOutcome::Skipped => println!("Notification {outcome}"),
                NotifyOutcome::Failed {
                    ..
                } => println!("{} Notification {}", "⚠".yellow(), outcome),
            }
        }
        Ok(outcome)
    }
}
