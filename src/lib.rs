//! Artifact Fetcher Library
//!
//! A Rust library for resolving, filtering, and downloading the build
//! artifacts produced by remote CI runs, with scripted (name/pattern) or
//! interactive selection.

pub mod app;
pub mod cli;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use constants::*;

    #[test]
    fn test_constants_accessible() {
        // Test that our constants are accessible
        assert_eq!(ENV_TOKEN, "CI_API_TOKEN");
        assert_eq!(SELECT_ARTIFACTS, "Select artifacts to download:");
        assert!(USER_AGENT.contains("Artifact-Fetcher"));
    }

    #[test]
    fn test_error_types() {
        // Test that our error types work correctly
        let fetch_error = errors::FetchError::NoMatch;
        let app_error = AppError::Fetch(fetch_error);

        assert_eq!(app_error.category(), "fetch");
    }
}
