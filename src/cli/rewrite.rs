//! Rewrite a compiled template in place of the `before:package:finalize` hook.

use anyhow::{Context, Result};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{CliConfig, DEFAULT_SERVICE_FILE, DEFAULT_TEMPLATE_FILE};
use crate::config::parse_service_definition;
use crate::hooks::SahPlugin;
use crate::template::Template;

/// Add aliases to a compiled template and retarget its triggers.
///
/// The rewritten template is printed to stdout unless `--output` or
/// `--in-place` is given. Nothing is written if any step fails.
#[derive(Args, Debug)]
pub struct RewriteCommand {
    /// Service definition holding `custom.sah`
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_SERVICE_FILE)]
    pub service: PathBuf,

    /// Compiled CloudFormation template (JSON)
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_TEMPLATE_FILE)]
    pub template: PathBuf,

    /// Write the result to this file
    #[arg(short, long, value_name = "FILE", conflicts_with = "in_place")]
    pub output: Option<PathBuf>,

    /// Overwrite the template with the result
    #[arg(long)]
    pub in_place: bool,
}

impl RewriteCommand {
    /// Run the rewrite.
    ///
    /// # Errors
    ///
    /// Fails on unreadable or invalid input files, rejected configuration, or
    /// any rewrite error; the output is left untouched in every case.
    pub fn execute(self, _config: &CliConfig) -> Result<()> {
        let service = parse_service_definition(&self.service)?;
        let plugin = SahPlugin::new(&service)?;

        let template = load_template(&self.template)?;
        let (rewritten, report) = plugin.update_template(&template)?;
        let json = rewritten.to_json_pretty()?;

        let destination = if self.in_place {
            Some(self.template.as_path())
        } else {
            self.output.as_deref()
        };
        match destination {
            Some(path) => {
                std::fs::write(path, &json)
                    .with_context(|| format!("Failed to write template: {}", path.display()))?;
                info!(
                    "Wrote {} ({} alias(es), {} reference(s) rewritten)",
                    path.display(),
                    report.aliases.len(),
                    report.reference_count()
                );
            }
            None => println!("{json}"),
        }
        Ok(())
    }
}

/// Read and parse a compiled template.
pub(crate) fn load_template(path: &Path) -> Result<Template> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read template: {}", path.display()))?;
    let template = Template::from_json_str(&content)
        .with_context(|| format!("Failed to parse template: {}", path.display()))?;
    Ok(template)
}
