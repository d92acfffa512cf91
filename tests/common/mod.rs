//! Common test utilities for SAH integration tests
//!
//! A [`TestProject`] is a temporary service directory laid out the way the
//! deployment tool leaves it after packaging: `serverless.yml` at the root and
//! the compiled template under `.serverless/`.

// Not every test module uses every helper
#![allow(dead_code)]

use anyhow::{Context, Result};
use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use sah_cli::test_utils::{ServiceFixture, TemplateFixture};

/// Path of the compiled template inside a service directory
pub const TEMPLATE_PATH: &str = ".serverless/cloudformation-template-update-stack.json";

/// Temporary service directory
pub struct TestProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl TestProject {
    /// Create an empty service directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("service");
        fs::create_dir_all(project_dir.join(".serverless"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Create a service directory holding the given fixtures
    pub fn with_fixtures(service: &ServiceFixture, template: &TemplateFixture) -> Result<Self> {
        let project = Self::new()?;
        project.write_service(&service.content)?;
        project.write_template(&template.content)?;
        Ok(project)
    }

    /// Get the service directory path
    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    /// Get the compiled template path
    pub fn template_path(&self) -> PathBuf {
        self.project_dir.join(TEMPLATE_PATH)
    }

    /// Write `serverless.yml`
    pub fn write_service(&self, content: &str) -> Result<()> {
        let service_path = self.project_dir.join("serverless.yml");
        fs::write(&service_path, content)
            .with_context(|| format!("Failed to write service definition to {service_path:?}"))?;
        Ok(())
    }

    /// Write the compiled template
    pub fn write_template(&self, content: &str) -> Result<()> {
        let template_path = self.template_path();
        fs::write(&template_path, content)
            .with_context(|| format!("Failed to write template to {template_path:?}"))?;
        Ok(())
    }

    /// Read the compiled template as text
    pub fn read_template(&self) -> Result<String> {
        fs::read_to_string(self.template_path()).context("Failed to read template")
    }

    /// A `sah` command running in the service directory
    pub fn sah(&self) -> Command {
        let mut cmd = Command::cargo_bin("sah").unwrap_or_else(|e| panic!("sah binary: {e}"));
        cmd.current_dir(&self.project_dir)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("SAH_URL")
            .env_remove("SAH_TOKEN");
        cmd
    }
}

/// Parse command stdout as JSON
pub fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {}", String::from_utf8_lossy(&output.stdout)))
}

/// File assertion helpers
pub struct FileAssert;

impl FileAssert {
    /// Assert a file exists
    pub fn exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// Assert a file does not exist
    pub fn not_exists(path: impl AsRef<Path>) {
        let path = path.as_ref();
        assert!(!path.exists(), "Expected file to not exist: {}", path.display());
    }

    /// Assert a file has exactly the given content
    pub fn equals(path: impl AsRef<Path>, expected: &str) {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
        assert_eq!(content, expected, "Unexpected content in {}", path.display());
    }
}
