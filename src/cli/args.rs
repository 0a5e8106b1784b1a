//! Command-line argument parsing for Artifact Fetcher
//!
//! This module defines the CLI structure using clap derive macros,
//! providing a user-friendly interface for downloading and listing the
//! artifacts produced by remote CI runs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Artifact Fetcher - Download build artifacts from CI runs
#[derive(Parser, Debug)]
#[command(
    name = "artifact_fetcher",
    version,
    about = "Download build artifacts from remote CI runs",
    long_about = "A tool for retrieving build artifacts produced by remote CI runs.
Artifacts can be selected by exact name, by glob pattern, or interactively."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Repository to operate on (OWNER/NAME)
    #[arg(short = 'R', long, global = true, value_name = "OWNER/NAME")]
    pub repo: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Download artifacts from a run
    Download(DownloadArgs),

    /// List artifacts produced by a run
    List(ListArgs),
}

/// Arguments for the download command
#[derive(Args, Debug, Clone, Default)]
pub struct DownloadArgs {
    /// Run to download artifacts from (omit to search across runs)
    #[arg(value_name = "RUN_ID")]
    pub run_id: Option<String>,

    /// Download only artifacts with these exact names
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub names: Vec<String>,

    /// Download only artifacts matching these glob patterns
    #[arg(short = 'p', long = "pattern", value_name = "PATTERN")]
    pub patterns: Vec<String>,

    /// Directory to download artifacts into
    #[arg(
        short = 'D',
        long = "dir",
        value_name = "DIR",
        default_value = "."
    )]
    pub destination_dir: PathBuf,
}

/// Arguments for the list command
#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Run to list artifacts for (omit to list across runs)
    #[arg(value_name = "RUN_ID")]
    pub run_id: Option<String>,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

impl DownloadArgs {
    /// Check whether an explicit name or pattern filter was supplied
    pub fn is_filtered(&self) -> bool {
        !self.names.is_empty() || !self.patterns.is_empty()
    }

    /// Whether to fall back to interactive selection
    ///
    /// Prompting applies only when nothing narrowed the request (no run id,
    /// no filters) and both ends of the terminal are interactive.
    pub fn should_prompt(&self) -> bool {
        self.run_id.is_none()
            && !self.is_filtered()
            && atty::is(atty::Stream::Stdin)
            && atty::is(atty::Stream::Stdout)
    }
}
