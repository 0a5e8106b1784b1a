//! Retrieval orchestration
//!
//! The top-level coordinator for one download operation: resolve the
//! candidate listing from the platform, narrow it through the matcher or
//! the interactive prompter, then download each selected artifact into its
//! own directory under the destination. Downloads run sequentially in
//! matched order and the first failure aborts the remainder.

use tracing::{debug, info};

use crate::app::matcher::match_artifacts;
use crate::app::models::{FetchReport, SelectionCriteria};
use crate::app::platform::Platform;
use crate::app::prompter::{select_by_name, Prompter};
use crate::errors::{FetchError, FetchResult};

/// Resolve, select, and download the artifacts described by `criteria`
///
/// The matched set is fixed before the first download starts. Each artifact
/// lands in `destination_dir/<name>`; artifacts sharing a name share the
/// directory, later downloads overwriting earlier content by ordinary
/// filesystem semantics. The platform creates the directory and unpacks the
/// archive into it.
///
/// # Errors
///
/// Surfaces the terminal taxonomy: `List` and `Download` wrap transport
/// failures, `NoValidArtifacts` means every candidate expired, `NoMatch`
/// means the filters selected nothing, and `Prompt` wraps a failing
/// interactive mechanism. A failed download leaves earlier downloads on
/// disk and skips the rest.
pub async fn fetch_artifacts(
    criteria: &SelectionCriteria,
    platform: &dyn Platform,
    prompter: &dyn Prompter,
) -> FetchResult<FetchReport> {
    debug!(run_id = ?criteria.run_id, "resolving artifact listing");
    let artifacts = platform
        .list(criteria.run_id.as_deref())
        .await
        .map_err(|source| FetchError::List { source })?;

    let targets = if criteria.is_filtered() {
        match_artifacts(&artifacts, &criteria.names, &criteria.patterns)?
    } else {
        let candidates = match_artifacts(&artifacts, &[], &[])?;
        if criteria.do_prompt {
            select_by_name(&candidates, prompter)?
        } else {
            candidates
        }
    };

    info!(selected = targets.len(), "downloading artifacts");

    let mut report = FetchReport::default();
    for artifact in &targets {
        let destination = criteria.destination_dir.join(&artifact.name);
        debug!(name = %artifact.name, destination = %destination.display(), "downloading artifact");
        platform
            .download(&artifact.download_url, &destination)
            .await
            .map_err(|source| FetchError::Download {
                name: artifact.name.clone(),
                source,
            })?;
        report.downloaded.push(artifact.name.clone());
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::app::models::Artifact;
    use crate::errors::{PlatformError, PlatformResult, PromptError, PromptResult};

    /// Artifact fixture plus the file its archive materializes
    struct TestArtifact {
        artifact: Artifact,
        files: Vec<&'static str>,
    }

    /// Declarative fake platform: runs mapped to artifacts, downloads
    /// materialize the fixture files under the destination directory
    struct FakePlatform {
        run_artifacts: BTreeMap<&'static str, Vec<TestArtifact>>,
    }

    #[async_trait]
    impl Platform for FakePlatform {
        async fn list(&self, run_id: Option<&str>) -> PlatformResult<Vec<Artifact>> {
            let mut artifacts = Vec::new();
            for (id, run) in &self.run_artifacts {
                if run_id.is_none() || run_id == Some(*id) {
                    artifacts.extend(run.iter().map(|t| t.artifact.clone()));
                }
            }
            Ok(artifacts)
        }

        async fn download(&self, url: &str, dir: &Path) -> PlatformResult<()> {
            std::fs::create_dir_all(dir)?;
            // Locate the fixture by URL so the fake stays declarative
            for run in self.run_artifacts.values() {
                for test_artifact in run {
                    if test_artifact.artifact.download_url == url {
                        for file in &test_artifact.files {
                            std::fs::write(dir.join(file), b"")?;
                        }
                        return Ok(());
                    }
                }
            }
            Err(PlatformError::Archive {
                reason: format!("no artifact matches the provided URL: {url}"),
            })
        }
    }

    /// Call-recording platform with scripted listing and per-URL failures
    struct RecordingPlatform {
        artifacts: PlatformResult<Vec<Artifact>>,
        fail_url: Option<&'static str>,
        downloads: Mutex<Vec<(String, PathBuf)>>,
    }

    impl RecordingPlatform {
        fn listing(artifacts: Vec<Artifact>) -> Self {
            Self {
                artifacts: Ok(artifacts),
                fail_url: None,
                downloads: Mutex::new(Vec::new()),
            }
        }

        fn downloads(&self) -> Vec<(String, PathBuf)> {
            self.downloads.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Platform for RecordingPlatform {
        async fn list(&self, _run_id: Option<&str>) -> PlatformResult<Vec<Artifact>> {
            match &self.artifacts {
                Ok(artifacts) => Ok(artifacts.clone()),
                Err(_) => Err(PlatformError::Api { status: 502 }),
            }
        }

        async fn download(&self, url: &str, dir: &Path) -> PlatformResult<()> {
            if self.fail_url == Some(url) {
                return Err(PlatformError::Api { status: 410 });
            }
            self.downloads
                .lock()
                .unwrap()
                .push((url.to_string(), dir.to_path_buf()));
            Ok(())
        }
    }

    struct StubPrompter<F>(F)
    where
        F: Fn(&[String]) -> PromptResult<Vec<usize>>;

    impl<F> Prompter for StubPrompter<F>
    where
        F: Fn(&[String]) -> PromptResult<Vec<usize>>,
    {
        fn multi_select(&self, _message: &str, options: &[String]) -> PromptResult<Vec<usize>> {
            (self.0)(options)
        }
    }

    /// Prompter that must not be reached in non-interactive flows
    struct UnreachablePrompter;

    impl Prompter for UnreachablePrompter {
        fn multi_select(&self, _message: &str, _options: &[String]) -> PromptResult<Vec<usize>> {
            panic!("prompter invoked in a non-interactive flow");
        }
    }

    fn criteria(destination: &Path) -> SelectionCriteria {
        SelectionCriteria {
            run_id: Some("2345".to_string()),
            destination_dir: destination.to_path_buf(),
            ..Default::default()
        }
    }

    fn mixed_run() -> Vec<TestArtifact> {
        vec![
            TestArtifact {
                artifact: Artifact::new(
                    "artifact-1",
                    "http://download.example/artifact1.zip",
                    false,
                ),
                files: vec!["artifact-1"],
            },
            TestArtifact {
                artifact: Artifact::new(
                    "expired-artifact",
                    "http://download.example/expired.zip",
                    true,
                ),
                files: vec!["expired"],
            },
            TestArtifact {
                artifact: Artifact::new(
                    "artifact-2",
                    "http://download.example/artifact2.zip",
                    false,
                ),
                files: vec!["artifact-2"],
            },
        ]
    }

    #[tokio::test]
    async fn test_downloads_non_expired_into_per_name_directories() {
        let dest = TempDir::new().unwrap();
        let platform = FakePlatform {
            run_artifacts: BTreeMap::from([("2345", mixed_run())]),
        };

        let report = fetch_artifacts(&criteria(dest.path()), &platform, &UnreachablePrompter)
            .await
            .unwrap();

        assert_eq!(report.downloaded, ["artifact-1", "artifact-2"]);
        assert!(dest.path().join("artifact-1").join("artifact-1").is_file());
        assert!(dest.path().join("artifact-2").join("artifact-2").is_file());
        assert!(!dest.path().join("expired-artifact").exists());
    }

    #[tokio::test]
    async fn test_all_expired_fails_without_download_attempts() {
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform::listing(vec![
            Artifact::new("artifact-1", "http://download.example/artifact1.zip", true),
            Artifact::new("artifact-2", "http://download.example/artifact2.zip", true),
        ]);

        let err = fetch_artifacts(&criteria(dest.path()), &platform, &UnreachablePrompter)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "no valid artifacts found to download");
        assert!(platform.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_names_fail_without_download_attempts() {
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform::listing(vec![
            Artifact::new("artifact-1", "http://download.example/artifact1.zip", false),
            Artifact::new("artifact-2", "http://download.example/artifact2.zip", false),
        ]);

        let mut criteria = criteria(dest.path());
        criteria.names = vec!["artifact-3".to_string()];

        let err = fetch_artifacts(&criteria, &platform, &UnreachablePrompter)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "no artifact matches any of the names or patterns provided"
        );
        assert!(platform.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_unmatched_patterns_fail_without_download_attempts() {
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform::listing(vec![
            Artifact::new("artifact-1", "http://download.example/artifact1.zip", false),
            Artifact::new("artifact-2", "http://download.example/artifact2.zip", false),
        ]);

        let mut criteria = criteria(dest.path());
        criteria.patterns = vec!["artifiction-*".to_string()];

        let err = fetch_artifacts(&criteria, &platform, &UnreachablePrompter)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "no artifact matches any of the names or patterns provided"
        );
        assert!(platform.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_name_filter_downloads_only_named_artifact() {
        let dest = TempDir::new().unwrap();
        let platform = FakePlatform {
            run_artifacts: BTreeMap::from([("2345", mixed_run())]),
        };

        let mut criteria = criteria(dest.path());
        criteria.names = vec!["artifact-2".to_string()];

        let report = fetch_artifacts(&criteria, &platform, &UnreachablePrompter)
            .await
            .unwrap();

        assert_eq!(report.downloaded, ["artifact-2"]);
        assert!(!dest.path().join("artifact-1").exists());
        assert!(dest.path().join("artifact-2").join("artifact-2").is_file());
    }

    #[tokio::test]
    async fn test_prompt_selection_across_runs() {
        let dest = TempDir::new().unwrap();
        let platform = FakePlatform {
            run_artifacts: BTreeMap::from([
                (
                    "2345",
                    vec![
                        TestArtifact {
                            artifact: Artifact::new(
                                "artifact-1",
                                "http://download.example/artifact1.zip",
                                false,
                            ),
                            files: vec!["artifact-1"],
                        },
                        TestArtifact {
                            artifact: Artifact::new(
                                "expired-artifact",
                                "http://download.example/expired.zip",
                                true,
                            ),
                            files: vec!["expired"],
                        },
                    ],
                ),
                (
                    "6789",
                    vec![TestArtifact {
                        artifact: Artifact::new(
                            "artifact-2",
                            "http://download.example/artifact2.zip",
                            false,
                        ),
                        files: vec!["artifact-2"],
                    }],
                ),
            ]),
        };

        let criteria = SelectionCriteria {
            run_id: None,
            do_prompt: true,
            destination_dir: dest.path().to_path_buf(),
            ..Default::default()
        };

        let prompter = StubPrompter(|options: &[String]| {
            // Expired artifacts never reach the prompt
            assert_eq!(options, ["artifact-1", "artifact-2"]);
            Ok(vec![options.iter().position(|o| o == "artifact-2").unwrap()])
        });

        let report = fetch_artifacts(&criteria, &platform, &prompter).await.unwrap();

        assert_eq!(report.downloaded, ["artifact-2"]);
        assert!(dest.path().join("artifact-2").join("artifact-2").is_file());
        assert!(!dest.path().join("artifact-1").exists());
    }

    #[tokio::test]
    async fn test_prompt_duplicate_name_downloads_every_underlying_artifact() {
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform::listing(vec![
            Artifact::new("artifact-1", "http://download.example/artifact1.zip", false),
            Artifact::new("artifact-2", "http://download.example/artifact2.zip", false),
            Artifact::new("artifact-2", "http://download.example/artifact2.also.zip", false),
        ]);

        let criteria = SelectionCriteria {
            run_id: None,
            do_prompt: true,
            destination_dir: dest.path().to_path_buf(),
            ..Default::default()
        };

        let prompter = StubPrompter(|options: &[String]| {
            assert_eq!(options, ["artifact-1", "artifact-2"]);
            Ok(vec![1])
        });

        let report = fetch_artifacts(&criteria, &platform, &prompter).await.unwrap();

        assert_eq!(report.downloaded, ["artifact-2", "artifact-2"]);
        let shared_dir = dest.path().join("artifact-2");
        assert_eq!(
            platform.downloads(),
            [
                (
                    "http://download.example/artifact2.zip".to_string(),
                    shared_dir.clone()
                ),
                (
                    "http://download.example/artifact2.also.zip".to_string(),
                    shared_dir
                ),
            ]
        );
    }

    #[tokio::test]
    async fn test_prompt_with_no_selection_succeeds_empty() {
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform::listing(vec![Artifact::new(
            "artifact-1",
            "http://download.example/artifact1.zip",
            false,
        )]);

        let criteria = SelectionCriteria {
            run_id: None,
            do_prompt: true,
            destination_dir: dest.path().to_path_buf(),
            ..Default::default()
        };

        let prompter = StubPrompter(|_: &[String]| Ok(vec![]));

        let report = fetch_artifacts(&criteria, &platform, &prompter).await.unwrap();
        assert!(report.is_empty());
        assert!(platform.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_prompt_mechanism_failure_is_surfaced() {
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform::listing(vec![Artifact::new(
            "artifact-1",
            "http://download.example/artifact1.zip",
            false,
        )]);

        let criteria = SelectionCriteria {
            run_id: None,
            do_prompt: true,
            destination_dir: dest.path().to_path_buf(),
            ..Default::default()
        };

        let prompter = StubPrompter(|_: &[String]| Err(PromptError::NotInteractive));

        let err = fetch_artifacts(&criteria, &platform, &prompter).await.unwrap_err();
        assert!(matches!(err, FetchError::Prompt(_)));
        assert!(platform.downloads().is_empty());
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal() {
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform {
            artifacts: Err(PlatformError::Api { status: 502 }),
            fail_url: None,
            downloads: Mutex::new(Vec::new()),
        };

        let err = fetch_artifacts(&criteria(dest.path()), &platform, &UnreachablePrompter)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::List { .. }));
        assert_eq!(
            err.to_string(),
            "error fetching artifacts: API request failed: HTTP 502"
        );
    }

    #[tokio::test]
    async fn test_download_failure_is_fail_fast() {
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform {
            artifacts: Ok(vec![
                Artifact::new("artifact-1", "http://download.example/artifact1.zip", false),
                Artifact::new("artifact-2", "http://download.example/artifact2.zip", false),
                Artifact::new("artifact-3", "http://download.example/artifact3.zip", false),
            ]),
            fail_url: Some("http://download.example/artifact2.zip"),
            downloads: Mutex::new(Vec::new()),
        };

        let err = fetch_artifacts(&criteria(dest.path()), &platform, &UnreachablePrompter)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "error downloading artifact-2: API request failed: HTTP 410"
        );

        // The first artifact was attempted, the third never was
        let attempted: Vec<String> = platform.downloads().into_iter().map(|(url, _)| url).collect();
        assert_eq!(attempted, ["http://download.example/artifact1.zip"]);
    }

    #[tokio::test]
    async fn test_empty_listing_reports_no_valid_artifacts() {
        // An empty listing is a valid platform response; the matcher turns
        // it into the expiration-exhausted outcome
        let dest = TempDir::new().unwrap();
        let platform = RecordingPlatform::listing(vec![]);

        let err = fetch_artifacts(&criteria(dest.path()), &platform, &UnreachablePrompter)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "no valid artifacts found to download");
    }
}
