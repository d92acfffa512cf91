//! Service definition file parsing.
//!
//! The deployment tool's service definition (`serverless.yml`) is YAML, and
//! JSON service files are valid YAML, so one parser covers both. Only the parts
//! this tool reads are modeled; everything else in the file is ignored.
//!
//! # Examples
//!
//! ```rust,no_run
//! use sah_cli::config::parser::parse_service_definition;
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let service = parse_service_definition(Path::new("serverless.yml"))?;
//! println!("service: {}", service.name().unwrap_or("<unnamed>"));
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

use crate::core::SahError;

/// The parts of a service definition this tool reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceDefinition {
    /// `service` - a name, or an object with a `name` in older formats
    #[serde(default)]
    pub service: Option<Value>,
    /// `custom` - free-form section holding plugin options
    #[serde(default)]
    pub custom: Option<Value>,
}

impl ServiceDefinition {
    /// Parse a service definition from YAML (or JSON) text.
    ///
    /// # Errors
    ///
    /// Returns [`SahError::YamlError`] if the text is not a valid definition.
    pub fn from_yaml_str(text: &str) -> Result<Self, SahError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// The service name, if one is declared.
    pub fn name(&self) -> Option<&str> {
        match self.service.as_ref()? {
            Value::String(name) => Some(name),
            other => other.get("name").and_then(Value::as_str),
        }
    }
}

/// Read and parse a service definition file.
///
/// # Errors
///
/// Fails with context naming the file if it cannot be read or parsed.
pub fn parse_service_definition(path: &Path) -> Result<ServiceDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read service definition: {}", path.display()))?;

    let service = ServiceDefinition::from_yaml_str(&content)
        .with_context(|| format!("Failed to parse service definition: {}", path.display()))?;

    Ok(service)
}
