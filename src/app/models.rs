//! Data models for Artifact Fetcher
//!
//! This module defines the core data structures used throughout the
//! application: the artifact listing entry, the immutable selection
//! criteria, and the retrieval report.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One downloadable artifact produced by a remote run
///
/// Names are not unique: the same display name may appear on several runs
/// (or even several times within one listing) with distinct download URLs.
/// The URL is an opaque key handed back to the platform; it is never parsed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Artifact {
    /// Display name of the artifact
    pub name: String,

    /// Opaque location the platform downloads the artifact archive from
    #[serde(rename = "archive_download_url")]
    pub download_url: String,

    /// Whether the artifact has passed its retention period
    #[serde(default)]
    pub expired: bool,

    /// Archive size as reported by the platform
    #[serde(default)]
    pub size_in_bytes: u64,

    /// When the artifact stops being downloadable
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Artifact {
    /// Create an artifact from its identifying fields (listing metadata zeroed)
    pub fn new(name: impl Into<String>, download_url: impl Into<String>, expired: bool) -> Self {
        Self {
            name: name.into(),
            download_url: download_url.into(),
            expired,
            size_in_bytes: 0,
            expires_at: None,
        }
    }
}

/// An immutable request describing which artifacts are wanted
///
/// Exactly one of {`names`/`patterns` non-empty, `do_prompt`, neither}
/// governs selection. `do_prompt` is computed by the caller and is only
/// true when both filters are empty and the session is interactive.
#[derive(Debug, Clone, Default)]
pub struct SelectionCriteria {
    /// Run to list artifacts for; `None` means every run the platform can
    /// enumerate
    pub run_id: Option<String>,

    /// Exact-match artifact names
    pub names: Vec<String>,

    /// Glob-style artifact name patterns (`*` and `?`)
    pub patterns: Vec<String>,

    /// Present an interactive multi-select instead of filtering
    pub do_prompt: bool,

    /// Base directory artifacts are downloaded under
    pub destination_dir: PathBuf,
}

impl SelectionCriteria {
    /// Check whether an explicit name or pattern filter was supplied
    pub fn is_filtered(&self) -> bool {
        !self.names.is_empty() || !self.patterns.is_empty()
    }
}

/// Outcome of a completed retrieval operation
#[derive(Debug, Clone, Default)]
pub struct FetchReport {
    /// Names of the artifacts downloaded, in download order
    pub downloaded: Vec<String>,
}

impl FetchReport {
    /// Whether nothing was downloaded (e.g. an empty prompt selection)
    pub fn is_empty(&self) -> bool {
        self.downloaded.is_empty()
    }

    /// Number of artifacts downloaded
    pub fn len(&self) -> usize {
        self.downloaded.len()
    }
}
