//! Error types for Artifact Fetcher
//!
//! This module defines the error taxonomy for all components of the
//! application. The retrieval errors are terminal: the fetcher performs no
//! retries and surfaces each failure to the caller with its literal message.

use thiserror::Error;

/// Transport-level errors from the artifact platform
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP request failed
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("API request failed: HTTP {status}")]
    Api { status: u16 },

    /// Downloaded artifact archive could not be unpacked
    #[error("invalid artifact archive: {reason}")]
    Archive { reason: String },

    /// I/O error while materializing artifact contents
    #[error("file I/O error")]
    Io(#[from] std::io::Error),
}

/// Interactive selection mechanism errors
#[derive(Error, Debug)]
pub enum PromptError {
    /// Terminal interaction failed
    #[error("terminal interaction failed")]
    Io(#[from] std::io::Error),

    /// Standard input is not attached to a terminal
    #[error("standard input is not an interactive terminal")]
    NotInteractive,
}

/// Artifact selection and retrieval errors
///
/// These are the outcomes the retrieval engine can surface. All are
/// terminal; none is retried internally.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Listing artifacts from the platform failed
    #[error("error fetching artifacts: {source}")]
    List {
        #[source]
        source: PlatformError,
    },

    /// Every candidate artifact has expired
    #[error("no valid artifacts found to download")]
    NoValidArtifacts,

    /// Name and pattern filters matched nothing
    #[error("no artifact matches any of the names or patterns provided")]
    NoMatch,

    /// Downloading a matched artifact failed
    #[error("error downloading {name}: {source}")]
    Download {
        name: String,
        #[source]
        source: PlatformError,
    },

    /// The interactive selection mechanism errored
    #[error("artifact selection prompt failed")]
    Prompt(#[from] PromptError),
}

/// Platform configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No repository supplied via flag or environment
    #[error("no repository specified. Pass --repo OWNER/NAME or set {}", crate::constants::env::REPOSITORY)]
    MissingRepository,

    /// Base URL could not be parsed
    #[error("invalid API base URL: {value}")]
    InvalidBaseUrl { value: String },
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Retrieval error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Platform transport error
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Platform(_) => "platform",
            AppError::Config(_) => "config",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Retrieval result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Platform result type alias
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Prompt result type alias
pub type PromptResult<T> = std::result::Result<T, PromptError>;

/// Configuration result type alias
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
