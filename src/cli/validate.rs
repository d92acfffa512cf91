//! Configuration check and rewrite dry run.

use anyhow::Result;
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

use super::rewrite::load_template;
use super::{CliConfig, DEFAULT_SERVICE_FILE};
use crate::config::parse_service_definition;
use crate::hooks::SahPlugin;

/// Output format for validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON for scripting
    Json,
}

/// Check `custom.sah` and, given a template, report what a rewrite would do.
///
/// Nothing is written; the template file is only read.
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Service definition holding `custom.sah`
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SERVICE_FILE)]
    pub service: PathBuf,

    /// Compiled template to dry-run the rewrite against
    #[arg(short, long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// What `validate` found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Service name, when declared
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Alias names that would be created, in order
    pub alias_names: Vec<String>,
    /// Whether dependent resources would be retargeted
    pub rewrites_dependents: bool,
    /// Whether a notification would be sent after deploy
    pub notifies: bool,
    /// Dry-run results, when a template was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<DryRun>,
}

/// Counts from a rewrite dry run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DryRun {
    /// Logical IDs of the aliases that would be added
    pub aliases: Vec<String>,
    /// Dependent resources that would be edited
    pub resources: Vec<String>,
    /// References that would be rewritten
    pub references: usize,
}

impl ValidateCommand {
    /// Run the checks and print the result.
    ///
    /// # Errors
    ///
    /// Fails on an unreadable service definition, rejected configuration, an
    /// invalid template, or a dry run that would fail.
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let result = self.validate()?;
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
            OutputFormat::Text if !config.quiet => print_text(&result),
            OutputFormat::Text => {}
        }
        Ok(())
    }

    /// Run the checks without printing.
    ///
    /// # Errors
    ///
    /// As [`ValidateCommand::execute`].
    pub fn validate(&self) -> Result<ValidationResult> {
        let service = parse_service_definition(&self.service)?;
        let plugin = SahPlugin::new(&service)?;
        let config = plugin.config();

        let mut result = ValidationResult {
            service: service.name().map(str::to_string),
            alias_names: config.rewrite.effective_alias_names(),
            rewrites_dependents: config.rewrite.use_active_alias_in_events,
            notifies: config.notify.is_configured(),
            dry_run: None,
        };

        if let Some(path) = &self.template {
            let template = load_template(path)?;
            let (_, report) = plugin.update_template(&template)?;
            result.dry_run = Some(DryRun {
                aliases: report.aliases.iter().map(|alias| alias.logical_id.clone()).collect(),
                resources: report.rewritten.iter().map(|(id, _)| id.clone()).collect(),
                references: report.reference_count(),
            });
        }
        Ok(result)
    }
}

fn print_text(result: &ValidationResult) {
    println!("{} custom.sah configuration is valid", "✓".green());
    if result.alias_names.is_empty() {
        println!("  No aliases requested; templates pass through unchanged");
    } else {
        println!("  Aliases: {}", result.alias_names.join(", "));
    }
    println!(
        "  Dependent resources: {}",
        if result.rewrites_dependents { "retargeted" } else { "unchanged" }
    );
    println!("  Notification: {}", if result.notifies { "enabled" } else { "disabled" });

    if let Some(dry_run) = &result.dry_run {
        println!(
            "{} Rewrite would add {} alias(es) and rewrite {} reference(s) in {} resource(s)",
            "✓".green(),
            dry_run.aliases.len(),
            dry_run.references,
            dry_run.resources.len()
        );
    }
}
