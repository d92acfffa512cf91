//! Lifecycle hook adapter for SAH
//!
//! The deployment tool drives plugins through named lifecycle events. SAH
//! binds two of them:
//!
//! - `before:package:finalize` - rewrite the compiled template
//! - `after:deploy:finalize` - notify the control plane
//!
//! [`SahPlugin`] is the call/response boundary the host talks to. It holds
//! only the resolved configuration; templates are passed in and returned by
//! value, never kept.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::alias::{self, RewriteReport};
use crate::config::{PluginConfig, ServiceDefinition};
use crate::core::SahError;
use crate::notify::{self, NotifyOutcome};
use crate::template::Template;

/// Lifecycle events SAH binds to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifecycleEvent {
    /// Runs once the template is compiled, before it is packaged
    #[serde(rename = "before:package:finalize")]
    BeforePackageFinalize,
    /// Runs after the stack update succeeded
    #[serde(rename = "after:deploy:finalize")]
    AfterDeployFinalize,
}

impl LifecycleEvent {
    /// All bound events, in lifecycle order.
    pub const ALL: [Self; 2] = [Self::BeforePackageFinalize, Self::AfterDeployFinalize];

    /// The host's name for this event.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BeforePackageFinalize => "before:package:finalize",
            Self::AfterDeployFinalize => "after:deploy:finalize",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LifecycleEvent {
    type Err = SahError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|event| event.as_str() == s).ok_or_else(|| SahError::Other {
            message: format!("Unknown lifecycle event: {s}"),
        })
    }
}

/// The plugin as seen by the host.
#[derive(Debug, Clone)]
pub struct SahPlugin {
    config: PluginConfig,
}

impl SahPlugin {
    /// Validate the service's options and build the plugin.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::Configuration`] if `custom.sah` is missing or
    /// invalid. Nothing else runs in that case.
    pub fn new(service: &ServiceDefinition) -> Result<Self, SahError> {
        let config = PluginConfig::from_service(service)?;
        debug!("Resolved configuration: {:?}", config.rewrite);
        Ok(Self {
            config,
        })
    }

    /// Build the plugin from an already resolved configuration.
    pub const fn with_config(config: PluginConfig) -> Self {
        Self {
            config,
        }
    }

    /// The resolved configuration.
    pub const fn config(&self) -> &PluginConfig {
        &self.config
    }

    /// `before:package:finalize`: rewrite the compiled template.
    ///
    /// # Errors
    ///
    /// As [`alias::apply`].
    pub fn update_template(&self, template: &Template) -> Result<(Template, RewriteReport), SahError> {
        info!("{}: rewriting compiled template", LifecycleEvent::BeforePackageFinalize);
        alias::apply_with_report(template, &self.config.rewrite)
    }

    /// `after:deploy:finalize`: tell the control plane about the deploy.
    pub async fn notify(&self, timeout: Duration) -> NotifyOutcome {
        info!("{}: notifying control plane", LifecycleEvent::AfterDeployFinalize);
        notify::notify(&self.config.notify, timeout).await
    }
}
