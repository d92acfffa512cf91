//! Command-line interface for SAH.
//!
//! The `sah` binary runs the plugin's lifecycle work outside the deployment
//! tool, against files on disk:
//!
//! - `rewrite` - `before:package:finalize`: pin functions to aliases in a
//!   compiled template
//! - `notify` - `after:deploy:finalize`: tell the control plane about a deploy
//! - `validate` - check `custom.sah`, optionally dry-running a rewrite
//!
//! ```bash
//! sah rewrite --service serverless.yml \
//!     --template .serverless/cloudformation-template-update-stack.json --in-place
//! sah validate --template .serverless/cloudformation-template-update-stack.json
//! sah --quiet notify --timeout 5
//! ```
//!
//! Logging goes to stderr through `tracing`. `--verbose` selects debug,
//! `--quiet` errors only, and `RUST_LOG` overrides both.

pub mod notify;
pub mod rewrite;
pub mod validate;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Default service definition path, relative to the service directory.
pub const DEFAULT_SERVICE_FILE: &str = "serverless.yml";

/// Default compiled template path, relative to the service directory.
pub const DEFAULT_TEMPLATE_FILE: &str = ".serverless/cloudformation-template-update-stack.json";

/// Settings derived from global flags, applied once before a command runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Log filter used when `RUST_LOG` is not set
    pub log_level: String,
    /// Suppress status output on stdout
    pub quiet: bool,
}

impl CliConfig {
    /// Install the global `tracing` subscriber.
    ///
    /// Safe to call more than once; only the first call takes effect.
    pub fn init_logging(&self) {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(&self.log_level)
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Serverless Alias Helper
#[derive(Parser, Debug)]
#[command(
    name = "sah",
    about = "Pin Lambda functions in compiled CloudFormation templates to aliases",
    version,
    long_about = "SAH adds an AWS::Lambda::Alias per function to a compiled CloudFormation \
                  template and can point API, schedule, and queue triggers at those aliases."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug logging
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Add aliases to a compiled template and retarget its triggers.
    Rewrite(rewrite::RewriteCommand),

    /// POST a deploy notification to the configured control plane.
    Notify(notify::NotifyCommand),

    /// Check plugin options, optionally dry-running a rewrite.
    Validate(validate::ValidateCommand),
}

impl Cli {
    /// Initialize logging and run the selected command.
    ///
    /// # Errors
    ///
    /// Returns the command's error, ready for
    /// [`user_friendly_error`](crate::core::user_friendly_error).
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    /// Translate global flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        CliConfig {
            log_level: log_level.to_string(),
            quiet: self.quiet,
        }
    }

    /// Run the selected command with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns the command's error.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Rewrite(cmd) => cmd.execute(&config),
            Commands::Notify(cmd) => cmd.execute(&config).await.map(|_| ()),
            Commands::Validate(cmd) => cmd.execute(&config),
        }
    }
}
