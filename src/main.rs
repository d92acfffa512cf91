//! SAH CLI entry point
//!
//! Parses arguments, runs the selected command, and renders failures with
//! context and suggestions before exiting with status 1.
//!
//! - `rewrite` - add aliases to a compiled template
//! - `notify` - send the post-deploy notification
//! - `validate` - check plugin options and dry-run a rewrite

use anyhow::Result;
use clap::Parser;
use sah_cli::cli;
use sah_cli::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
