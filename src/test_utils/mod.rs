//! Test utilities for SAH
//!
//! Fixtures for compiled templates and service definitions, plus one-time
//! logging setup. Integration tests reach this module through the
//! `test-utils` feature.
//!
//! # Example
//!
//! ```rust,no_run
//! use sah_cli::test_utils::{ServiceFixture, TemplateFixture, init_test_logging};
//!
//! init_test_logging(None);
//! let dir = tempfile::tempdir().unwrap();
//! let service = ServiceFixture::active().write_to(dir.path()).unwrap();
//! let template = TemplateFixture::web_service().write_to(dir.path()).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::{ServiceFixture, TemplateFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::{PluginConfig, ServiceDefinition};
use crate::template::Template;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` if given, otherwise `RUST_LOG`; with neither, logging stays
/// off.
///
/// ```bash
/// RUST_LOG=sah_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// The parsed [`TemplateFixture::web_service`] template.
///
/// # Panics
///
/// Panics if the fixture does not parse.
pub fn web_service_template() -> Template {
    Template::from_json_str(&TemplateFixture::web_service().content)
        .unwrap_or_else(|e| panic!("web_service fixture is invalid: {e}"))
}

/// Parse a service fixture into a service definition.
///
/// # Panics
///
/// Panics if the fixture is not valid YAML.
pub fn service_definition(fixture: &ServiceFixture) -> ServiceDefinition {
    ServiceDefinition::from_yaml_str(&fixture.content)
        .unwrap_or_else(|e| panic!("{} fixture is invalid: {e}", fixture.name))
}

/// Resolve the plugin configuration of a service fixture.
///
/// # Panics
///
/// Panics if the configuration is rejected.
pub fn plugin_config(fixture: &ServiceFixture) -> PluginConfig {
    PluginConfig::from_service(&service_definition(fixture))
        .unwrap_or_else(|e| panic!("{} fixture is rejected: {e}", fixture.name))
}
