//! CLI for the Turbo download interceptor.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use turbo_core::config;

use commands::{run_check, run_host, run_send};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "turbo")]
#[command(about = "Hand browser downloads to the Turbo companion downloader", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Report whether each URL would be handed to the companion.
    Check {
        /// URLs to classify.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Send a URL straight to the companion (same as "Download with Turbo" on a link).
    Send {
        /// URL to hand off.
        url: String,
    },

    /// Run the browser bridge: events as JSON lines on stdin, commands on stdout.
    Host,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Check { urls } => run_check(&urls),
            CliCommand::Send { url } => run_send(&cfg, &url).await?,
            CliCommand::Host => run_host(&cfg).await?,
        }

        Ok(())
    }
}
