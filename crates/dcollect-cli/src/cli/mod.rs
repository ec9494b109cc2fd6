//! CLI for the dcollect resource loader.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dcollect_core::config;
use std::path::PathBuf;

use commands::{run_fetch, run_unzip, FetchArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "dcollect")]
#[command(about = "Fetch a resource and print it as a JSON tree", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Load an http(s):// or file:// locator and print the normalized tree.
    Fetch {
        /// Locator, e.g. https://example.org/feed or file:///data/records.csv.
        locator: String,

        /// User name for HTTP basic auth.
        #[arg(long, requires = "password")]
        user: Option<String>,

        /// Password for HTTP basic auth.
        #[arg(long, requires = "user")]
        password: Option<String>,

        /// Bearer token (the "Bearer " prefix is optional). Ignored with --user.
        #[arg(long, value_name = "TOKEN")]
        bearer_token: Option<String>,

        /// Do not verify TLS certificates for https:// locators.
        #[arg(long)]
        insecure: bool,

        /// Parse as this content type instead of detecting it.
        #[arg(long, value_name = "MIME")]
        content_type: Option<String>,

        /// Print the payload without parsing it.
        #[arg(long)]
        raw: bool,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Extract a zip archive into a directory (existing files are kept).
    Unzip {
        /// Path to the zip file.
        file: PathBuf,
        /// Destination directory.
        destination: PathBuf,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Fetch {
                locator,
                user,
                password,
                bearer_token,
                insecure,
                content_type,
                raw,
                pretty,
            } => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                let args = FetchArgs {
                    user,
                    password,
                    bearer_token,
                    insecure,
                    content_type,
                    raw,
                    pretty,
                };
                run_fetch(&cfg, &locator, &args)?;
            }
            CliCommand::Unzip { file, destination } => run_unzip(&file, &destination)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
