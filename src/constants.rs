//! Application constants for Artifact Fetcher
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// Environment variable names for platform access
pub mod env {
    /// Environment variable name for the API bearer token
    pub const TOKEN: &str = "CI_API_TOKEN";

    /// Environment variable name for the API base URL override
    pub const BASE_URL: &str = "CI_API_BASE_URL";

    /// Environment variable name for the default repository (owner/name)
    pub const REPOSITORY: &str = "CI_REPOSITORY";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "Artifact-Fetcher/0.1.0 (CI Artifact Tool)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Maximum number of redirects to follow (artifact downloads redirect
    /// to short-lived storage URLs)
    pub const MAX_REDIRECTS: usize = 10;
}

/// Artifacts API endpoints and paging
pub mod api {
    /// Default API base URL
    pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

    /// Page size for artifact listing requests
    pub const PER_PAGE: u32 = 100;

    /// Upper bound on listing pages fetched per invocation
    pub const MAX_PAGES: u32 = 50;

    /// Accept header value for REST API requests
    pub const ACCEPT: &str = "application/vnd.github+json";
}

/// Interactive prompt constants
pub mod prompt {
    /// Message shown above the artifact multi-select
    pub const SELECT_ARTIFACTS: &str = "Select artifacts to download:";
}

/// Logging and debugging constants
pub mod logging {
    /// Default log level
    pub const DEFAULT_LOG_LEVEL: &str = "warn";
}

// Re-export commonly used constants for convenience
pub use api::{DEFAULT_BASE_URL, PER_PAGE};
pub use env::{BASE_URL as ENV_BASE_URL, REPOSITORY as ENV_REPOSITORY, TOKEN as ENV_TOKEN};
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use prompt::SELECT_ARTIFACTS;
