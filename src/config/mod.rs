//! Plugin configuration for SAH
//!
//! Options live in the service definition under `custom.sah`:
//!
//! ```yaml
//! custom:
//!   sah:
//!     activeAliasName: live          # default "INACTIVE"
//!     makeLambdasActive: true        # default false
//!     useActiveAliasInEvents: true   # default false
//!     aliases: []                    # default []
//!     sahUrl: https://sah.example.com/deployments   # default ""
//!     sahToken: ${env:SAH_TOKEN}     # default ""
//! ```
//!
//! Resolution is explicit: the partial [`PluginSettings`] read from the file is
//! merged over a defaults table ([`PluginConfig::default`]) and validated,
//! producing an immutable [`PluginConfig`] before any template is touched.
//!
//! # Modules
//!
//! - `parser` - service definition file loading (YAML or JSON)

pub mod parser;

pub use parser::{ServiceDefinition, parse_service_definition};

use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};
use tracing::warn;

use crate::constants::PLUGIN_CONFIG_KEY;
use crate::core::SahError;

/// Default alias label when none is configured.
pub const DEFAULT_ACTIVE_ALIAS_NAME: &str = "INACTIVE";

/// Options as written under `custom.sah`; every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginSettings {
    /// Label of the active alias
    pub active_alias_name: Option<String>,
    /// Whether dependent resources are rewritten onto aliases
    pub use_active_alias_in_events: Option<bool>,
    /// Whether the active alias is created for every function
    pub make_lambdas_active: Option<bool>,
    /// Additional alias names to create
    pub aliases: Option<Vec<String>>,
    /// Notification endpoint
    pub sah_url: Option<String>,
    /// Bearer token for the notification endpoint
    pub sah_token: Option<String>,
    /// Keys this tool does not recognize
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

/// Rewrite policy for one pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteConfig {
    /// Label used when pinning the active version
    pub active_alias_name: String,
    /// Alias names to create per function, in order
    pub aliases: Vec<String>,
    /// Append `active_alias_name` to `aliases`
    pub make_lambdas_active: bool,
    /// Rewrite dependent resources onto the aliases
    pub use_active_alias_in_events: bool,
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            active_alias_name: DEFAULT_ACTIVE_ALIAS_NAME.to_string(),
            aliases: Vec::new(),
            make_lambdas_active: false,
            use_active_alias_in_events: false,
        }
    }
}

impl RewriteConfig {
    /// Alias names to synthesize, deduplicated.
    ///
    /// This is `aliases` followed by `active_alias_name` when
    /// `make_lambdas_active` is set. Duplicates keep their last position, so
    /// the final entry is the same before and after deduplication.
    pub fn effective_alias_names(&self) -> Vec<String> {
        let mut names = self.aliases.clone();
        if self.make_lambdas_active {
            names.push(self.active_alias_name.clone());
        }

        let mut seen = HashSet::new();
        let mut deduplicated: Vec<String> =
            names.into_iter().rev().filter(|name| seen.insert(name.clone())).collect();
        deduplicated.reverse();
        deduplicated
    }
}

/// Post-deploy notification settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyConfig {
    /// Endpoint receiving the POST
    pub url: String,
    /// Bearer token sent with the POST
    pub token: String,
}

impl NotifyConfig {
    /// Notification only happens when both URL and token are set.
    pub fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.token.is_empty()
    }
}

/// Fully resolved plugin configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginConfig {
    /// Template rewrite policy
    pub rewrite: RewriteConfig,
    /// Notification settings
    pub notify: NotifyConfig,
}

impl PluginConfig {
    /// Merge partial settings over `defaults` and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::Configuration`] if the active alias name resolves to
    /// an empty string or an alias name is empty.
    pub fn resolve(settings: PluginSettings, defaults: &PluginConfig) -> Result<Self, SahError> {
        for key in settings.unknown.keys() {
            warn!("Ignoring unknown option custom.{}.{}", PLUGIN_CONFIG_KEY, key);
        }

        let config = Self {
            rewrite: RewriteConfig {
                active_alias_name: settings
                    .active_alias_name
                    .unwrap_or_else(|| defaults.rewrite.active_alias_name.clone()),
                aliases: settings.aliases.unwrap_or_else(|| defaults.rewrite.aliases.clone()),
                make_lambdas_active: settings
                    .make_lambdas_active
                    .unwrap_or(defaults.rewrite.make_lambdas_active),
                use_active_alias_in_events: settings
                    .use_active_alias_in_events
                    .unwrap_or(defaults.rewrite.use_active_alias_in_events),
            },
            notify: NotifyConfig {
                url: settings.sah_url.unwrap_or_else(|| defaults.notify.url.clone()),
                token: settings.sah_token.unwrap_or_else(|| defaults.notify.token.clone()),
            },
        };

        if config.rewrite.active_alias_name.is_empty() {
            return Err(SahError::configuration(format!(
                "Missing custom.{PLUGIN_CONFIG_KEY}.activeAliasName property"
            )));
        }
        if config.rewrite.aliases.iter().any(String::is_empty) {
            return Err(SahError::configuration(format!(
                "Empty alias name in custom.{PLUGIN_CONFIG_KEY}.aliases"
            )));
        }

        Ok(config)
    }

    /// Read, merge, and validate the options of a service definition.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::Configuration`] with one of these messages:
    /// - `Missing custom configuration object`
    /// - `Missing custom.sah configuration object`
    /// - `Invalid custom.sah configuration object: <detail>`
    /// - `Missing custom.sah.activeAliasName property`
    pub fn from_service(service: &ServiceDefinition) -> Result<Self, SahError> {
        let custom = service
            .custom
            .as_ref()
            .filter(|custom| !custom.is_null())
            .ok_or_else(|| SahError::configuration("Missing custom configuration object"))?;

        let raw = custom.get(PLUGIN_CONFIG_KEY).filter(|raw| !raw.is_null()).ok_or_else(|| {
            SahError::configuration(format!(
                "Missing custom.{PLUGIN_CONFIG_KEY} configuration object"
            ))
        })?;

        let settings: PluginSettings = serde_json::from_value(raw.clone()).map_err(|e| {
            SahError::configuration(format!(
                "Invalid custom.{PLUGIN_CONFIG_KEY} configuration object: {e}"
            ))
        })?;

        Self::resolve(settings, &Self::default())
    }
}
