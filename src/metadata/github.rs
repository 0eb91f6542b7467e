//! GitHub repository API provider implementation

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Credential;
use crate::descriptor::host::GitHost;
use crate::descriptor::types::null_as_default;
use crate::metadata::error::MetadataError;
use crate::metadata::provider::{MetadataProvider, ProviderMetadata};

/// Versioned JSON media type of the GitHub REST API
const ACCEPT_MEDIA_TYPE: &str = "application/vnd.github.v3+json";

/// Response from `GET /repos/{owner}/{repo}`, limited to the fields we use.
///
/// GitHub reports stars as `watchers_count` and actual watchers as
/// `subscribers_count`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RepositoryResponse {
    #[serde(deserialize_with = "null_as_default")]
    subscribers_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    watchers_count: i64,
    #[serde(deserialize_with = "null_as_default")]
    open_issues: i64,
    #[serde(deserialize_with = "null_as_default")]
    forks: i64,
    description: Option<String>,
    language: Option<String>,
    license: Option<License>,
    owner: Option<Owner>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct License {
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Owner {
    login: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
}

impl From<RepositoryResponse> for ProviderMetadata {
    fn from(response: RepositoryResponse) -> Self {
        let (owner, owner_type) = response
            .owner
            .map(|owner| {
                (
                    owner.login.unwrap_or_default(),
                    owner.kind.unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        Self {
            watchers: response.subscribers_count,
            stars: response.watchers_count,
            forks: response.forks,
            open_issues: response.open_issues,
            description: response.description.unwrap_or_default(),
            license: response
                .license
                .and_then(|license| license.name)
                .unwrap_or_default(),
            language: response.language.unwrap_or_default(),
            owner,
            owner_type,
        }
    }
}

/// Provider implementation for the GitHub REST API
pub struct GitHubProvider {
    client: reqwest::Client,
    base_url: String,
    credential: Credential,
}

impl GitHubProvider {
    /// Creates a new GitHubProvider
    ///
    /// `timeout` bounds each whole request, from connecting to reading the body.
    pub fn new(
        base_url: &str,
        credential: Credential,
        timeout: Duration,
    ) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .user_agent(env!("CARGO_PKG_NAME"))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credential,
        })
    }
}

#[async_trait::async_trait]
impl MetadataProvider for GitHubProvider {
    fn host(&self) -> GitHost {
        GitHost::GitHub
    }

    async fn fetch_metadata(&self, short_path: &str) -> Result<ProviderMetadata, MetadataError> {
        let url = format!("{}/repos/{}", self.base_url, short_path);

        let mut request = self.client.get(&url).header(ACCEPT, ACCEPT_MEDIA_TYPE);
        if !self.credential.is_empty() {
            request = request.header(
                AUTHORIZATION,
                format!("token {}", self.credential.expose()),
            );
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            warn!(
                "GitHub API returned status {} for {} (retry-after: {:?})",
                status, url, retry_after
            );
            return Err(MetadataError::HttpStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.bytes().await?;
        let repository: RepositoryResponse = serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse GitHub repository response: {}", e);
            MetadataError::Decode(e)
        })?;

        debug!("Fetched GitHub metadata for {}", short_path);
        Ok(repository.into())
    }
}
