//! GitHub API client
//!
//! Thin blocking client for the two hosting API calls spec-sync makes:
//! reading the latest release of the upstream repository and opening a pull
//! request against the spec repository.

use std::time::Duration;

use reqwest::blocking::Client as HttpClient;
use reqwest::header;
use serde::{Deserialize, Serialize};

use crate::config::GithubConfig;
use crate::error::{Result, SyncError};

/// A published release as returned by the hosting API.
#[derive(Deserialize, Debug, Clone)]
pub struct Release {
    pub tag_name: String,
}

/// Payload for opening a pull request.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct NewPullRequest {
    pub title: String,
    pub body: String,
    pub head: String,
    pub base: String,
}

/// An opened pull request as returned by the hosting API.
#[derive(Deserialize, Debug, Clone)]
pub struct PullRequest {
    pub number: u64,
    pub html_url: String,
}

/// The hosting API operations the orchestrator depends on.
///
/// Implemented by [GithubClient] for real runs and by test doubles for
/// exercising the update sequence offline.
pub trait ReleaseHost {
    /// Tag name of the latest published release of `repo` ("owner/name").
    fn latest_release_tag(&self, repo: &str) -> Result<String>;

    /// Open a pull request on `repo`, returning its URL.
    fn open_pull_request(&self, repo: &str, pull_request: &NewPullRequest) -> Result<String>;
}

/// GitHub API client
pub struct GithubClient {
    http_client: HttpClient,
    api_url: String,
}

impl GithubClient {
    /// Create a new GitHub client authenticated with the configured token.
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("spec-sync"),
        );
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github.v3+json"),
        );
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("token {}", config.access_token))
                .map_err(|e| SyncError::config(format!("invalid access token: {}", e)))?,
        );

        let http_client = HttpClient::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the latest release for a repository
    pub fn latest_release(&self, repo: &str) -> Result<Release> {
        let url = format!("{}/repos/{}/releases/latest", self.api_url, repo);
        let response = self.http_client.get(&url).send()?;

        if !response.status().is_success() {
            return Err(SyncError::api(format!(
                "GET {} returned HTTP {}",
                url,
                response.status()
            )));
        }

        Ok(response.json()?)
    }

    /// Create a pull request on a repository
    pub fn create_pull_request(
        &self,
        repo: &str,
        pull_request: &NewPullRequest,
    ) -> Result<PullRequest> {
        let url = format!("{}/repos/{}/pulls", self.api_url, repo);
        let response = self.http_client.post(&url).json(pull_request).send()?;

        if !response.status().is_success() {
            return Err(SyncError::api(format!(
                "POST {} returned HTTP {}",
                url,
                response.status()
            )));
        }

        Ok(response.json()?)
    }
}

impl ReleaseHost for GithubClient {
    fn latest_release_tag(&self, repo: &str) -> Result<String> {
        Ok(self.latest_release(repo)?.tag_name)
    }

    fn open_pull_request(&self, repo: &str, pull_request: &NewPullRequest) -> Result<String> {
        Ok(self.create_pull_request(repo, pull_request)?.html_url)
    }
}
