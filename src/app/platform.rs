//! Artifact platform abstraction and the REST implementation
//!
//! The `Platform` trait is the seam between the retrieval engine and the
//! remote service: listing candidate artifacts and materializing one
//! artifact's content under a directory. The production implementation
//! speaks a GitHub-Actions-compatible artifacts API: paginated JSON
//! listings and zip archives that are unpacked into the destination.

use std::env;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use crate::app::models::Artifact;
use crate::constants::{api, env as env_constants, http};
use crate::errors::{ConfigError, ConfigResult, PlatformError, PlatformResult};

/// Remote service capability: list a run's artifacts, download one of them
///
/// `list` must return an error only for transport or auth failures; "no
/// artifacts exist" is an empty vec with `Ok`. `download` creates the
/// destination directory if absent and materializes the artifact's full
/// content under it.
#[async_trait]
pub trait Platform: Send + Sync {
    /// List artifacts for `run_id`, or across all visible runs when `None`
    async fn list(&self, run_id: Option<&str>) -> PlatformResult<Vec<Artifact>>;

    /// Fetch the artifact at `download_url` and unpack it into
    /// `destination_dir`
    async fn download(&self, download_url: &str, destination_dir: &Path) -> PlatformResult<()>;
}

/// Connection settings for the REST platform
#[derive(Debug, Clone)]
pub struct PlatformConfig {
    /// API base URL, normalized to end with a slash
    pub base_url: Url,
    /// Repository scope as `owner/name`
    pub repository: String,
    /// Optional bearer token for authenticated requests
    pub token: Option<String>,
    /// Request timeout
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl PlatformConfig {
    /// Create a configuration for `repository` against `base_url`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidBaseUrl` if the URL cannot be parsed.
    pub fn new(repository: impl Into<String>, base_url: &str) -> ConfigResult<Self> {
        // A trailing slash keeps Url::join from eating a path prefix on
        // self-hosted installations (e.g. https://ci.example.com/api/v3)
        let mut normalized = base_url.trim_end_matches('/').to_string();
        normalized.push('/');
        let base_url = Url::parse(&normalized).map_err(|_| ConfigError::InvalidBaseUrl {
            value: base_url.to_string(),
        })?;

        Ok(Self {
            base_url,
            repository: repository.into(),
            token: None,
            request_timeout: http::DEFAULT_TIMEOUT,
            connect_timeout: http::CONNECT_TIMEOUT,
        })
    }

    /// Build a configuration from the environment, with an optional
    /// repository override from the CLI
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingRepository` when neither the override
    /// nor the environment names a repository.
    pub fn from_env(repo_override: Option<&str>) -> ConfigResult<Self> {
        let repository = repo_override
            .map(str::to_string)
            .or_else(|| env::var(env_constants::REPOSITORY).ok())
            .filter(|r| !r.is_empty())
            .ok_or(ConfigError::MissingRepository)?;

        let base_url =
            env::var(env_constants::BASE_URL).unwrap_or_else(|_| api::DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(repository, &base_url)?;
        config.token = env::var(env_constants::TOKEN).ok().filter(|t| !t.is_empty());
        Ok(config)
    }
}

/// One page of the artifact listing endpoint
#[derive(Debug, Deserialize)]
struct ArtifactListing {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    artifacts: Vec<Artifact>,
}

/// REST platform speaking the Actions artifacts API
#[derive(Debug)]
pub struct ActionsPlatform {
    client: Client,
    config: PlatformConfig,
}

impl ActionsPlatform {
    /// Create the platform with a configured HTTP client
    ///
    /// # Errors
    ///
    /// Returns `PlatformError::Http` if the client cannot be built.
    pub fn new(config: PlatformConfig) -> PlatformResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(api::ACCEPT));
        if let Some(token) = &config.token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
                PlatformError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "API token contains characters not valid in a header",
                ))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .user_agent(http::USER_AGENT)
            .default_headers(headers)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(http::MAX_REDIRECTS))
            .build()?;

        Ok(Self { client, config })
    }

    /// Build the listing URL for one page
    fn listing_url(&self, run_id: Option<&str>, page: u32) -> Url {
        let path = match run_id {
            Some(id) => format!(
                "repos/{}/actions/runs/{}/artifacts",
                self.config.repository, id
            ),
            None => format!("repos/{}/actions/artifacts", self.config.repository),
        };

        let mut url = self
            .config
            .base_url
            .join(&path)
            .expect("listing path should join onto the base URL");
        url.query_pairs_mut()
            .append_pair("per_page", &api::PER_PAGE.to_string())
            .append_pair("page", &page.to_string());
        url
    }
}

#[async_trait]
impl Platform for ActionsPlatform {
    async fn list(&self, run_id: Option<&str>) -> PlatformResult<Vec<Artifact>> {
        let mut artifacts = Vec::new();
        let mut page = 1;

        loop {
            let url = self.listing_url(run_id, page);
            debug!(%url, "listing artifacts");

            let response = self.client.get(url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(PlatformError::Api {
                    status: status.as_u16(),
                });
            }

            let listing: ArtifactListing = response.json().await?;
            let page_len = listing.artifacts.len();
            artifacts.extend(listing.artifacts);

            if page_len == 0 || artifacts.len() as u64 >= listing.total_count {
                break;
            }
            if page >= api::MAX_PAGES {
                warn!(
                    total = listing.total_count,
                    fetched = artifacts.len(),
                    "stopping artifact listing at the page cap"
                );
                break;
            }
            page += 1;
        }

        Ok(artifacts)
    }

    async fn download(&self, download_url: &str, destination_dir: &Path) -> PlatformResult<()> {
        tokio::fs::create_dir_all(destination_dir).await?;

        debug!(
            url = download_url,
            destination = %destination_dir.display(),
            "downloading artifact archive"
        );

        let response = self.client.get(download_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::Api {
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        unpack_archive(&bytes, destination_dir)
    }
}

/// Unpack a zip archive into `destination`, creating directories as needed
///
/// Entries whose paths escape the destination (no `enclosed_name`) are
/// skipped with a warning rather than failing the whole artifact.
fn unpack_archive(bytes: &[u8], destination: &Path) -> PlatformResult<()> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| PlatformError::Archive {
            reason: e.to_string(),
        })?;

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(|e| PlatformError::Archive {
            reason: e.to_string(),
        })?;

        let relative = match entry.enclosed_name() {
            Some(path) => path.to_path_buf(),
            None => {
                warn!(entry = entry.name(), "skipping archive entry with unsafe path");
                continue;
            }
        };

        let target = destination.join(relative);
        if entry.is_dir() {
            std::fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let mut outfile = std::fs::File::create(&target)?;
            std::io::copy(&mut entry, &mut outfile)?;
        }
    }

    Ok(())
}
