//! Command handlers for Artifact Fetcher CLI
//!
//! This module implements the command handlers that coordinate between CLI
//! arguments and the retrieval engine.

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::app::{
    fetch_artifacts, ActionsPlatform, Platform, PlatformConfig, SelectionCriteria,
};
use crate::cli::{DownloadArgs, GlobalArgs, ListArgs, TerminalPrompter};
use crate::errors::{AppError, Result};

/// Handle the download command
///
/// Builds the platform from flags and environment, assembles the selection
/// criteria, and runs the retrieval engine. A spinner covers the operation
/// except when the interactive prompt may appear.
pub async fn handle_download(args: DownloadArgs, global: &GlobalArgs) -> Result<()> {
    let config = PlatformConfig::from_env(global.repo.as_deref())?;
    info!(repository = %config.repository, "starting download command");

    let platform = ActionsPlatform::new(config).map_err(AppError::Platform)?;
    let prompter = TerminalPrompter::new();

    let do_prompt = args.should_prompt();
    let criteria = SelectionCriteria {
        run_id: args.run_id.clone(),
        names: args.names.clone(),
        patterns: args.patterns.clone(),
        do_prompt,
        destination_dir: args.destination_dir.clone(),
    };

    debug!(?criteria, "resolved selection criteria");

    // The spinner would fight the multi-select for the terminal
    let spinner = if do_prompt || global.quiet {
        None
    } else {
        Some(create_spinner("Fetching artifacts..."))
    };

    let result = fetch_artifacts(&criteria, &platform, &prompter).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let report = result.map_err(AppError::Fetch)?;

    if report.is_empty() {
        println!("No artifacts downloaded");
    } else {
        println!(
            "Downloaded {} artifact(s) to {}",
            report.len(),
            args.destination_dir.display()
        );
        for name in &report.downloaded {
            println!("  {}", name);
        }
    }

    Ok(())
}

/// Handle the list command
pub async fn handle_list(args: ListArgs, global: &GlobalArgs) -> Result<()> {
    let config = PlatformConfig::from_env(global.repo.as_deref())?;
    info!(repository = %config.repository, "starting list command");

    let platform = ActionsPlatform::new(config).map_err(AppError::Platform)?;

    let spinner = if global.quiet {
        None
    } else {
        Some(create_spinner("Fetching artifacts..."))
    };

    let result = platform.list(args.run_id.as_deref()).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let artifacts = result.map_err(AppError::Platform)?;

    if artifacts.is_empty() {
        println!("No artifacts found");
        return Ok(());
    }

    for artifact in &artifacts {
        let status = if artifact.expired {
            "expired"
        } else {
            "available"
        };
        let expires = artifact
            .expires_at
            .map(|t| format!(", expires {}", t.format("%Y-%m-%d")))
            .unwrap_or_default();
        println!(
            "{}  ({}, {} bytes{})",
            artifact.name, status, artifact.size_in_bytes, expires
        );
    }

    Ok(())
}

/// Create a steadily ticking spinner with the given message
fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
            .tick_strings(&["◐", "◓", "◑", "◒"]),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner
}
