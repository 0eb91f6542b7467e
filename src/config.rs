use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

// =============================================================================
// Time-related constants
// =============================================================================

/// Timeout for a single provider request in milliseconds (5 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5_000;

/// Budget for enriching one package in milliseconds (10 seconds)
pub const DEFAULT_TASK_TIMEOUT_MS: u64 = 10_000;

/// Delay between starting each package task to avoid rate limiting (10ms)
pub const FETCH_STAGGER_DELAY_MS: u64 = 10;

// =============================================================================
// Remote constants
// =============================================================================

/// Maximum number of packages enriched at the same time
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Default base URL for the GitHub API
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Environment variable holding the provider credential
pub const CREDENTIAL_ENV: &str = "GITHUB_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,
}

/// Indexer configuration structure
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct IndexerConfig {
    pub fetch: FetchConfig,
    pub github: GitHubConfig,
}

/// Fetch scheduling configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FetchConfig {
    /// Maximum number of packages enriched at once
    pub concurrency: usize,
    /// Provider request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Per-package budget in milliseconds
    pub task_timeout_ms: u64,
    /// Delay between task starts in milliseconds
    pub stagger_delay_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            task_timeout_ms: DEFAULT_TASK_TIMEOUT_MS,
            stagger_delay_ms: FETCH_STAGGER_DELAY_MS,
        }
    }
}

impl FetchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn task_timeout(&self) -> Duration {
        Duration::from_millis(self.task_timeout_ms)
    }

    /// Provider request timeout, never longer than the per-package budget
    pub fn provider_timeout(&self) -> Duration {
        self.request_timeout().min(self.task_timeout())
    }

    pub fn stagger_delay(&self) -> Duration {
        Duration::from_millis(self.stagger_delay_ms)
    }
}

/// GitHub provider configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct GitHubConfig {
    pub enabled: bool,
    pub api_base_url: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl IndexerConfig {
    /// Load configuration from `path`, or the defaults when `path` is None.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })?;
                serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            None => Self::default(),
        };
        config.validated()
    }

    /// Check invariants; the request timeout is clamped to the task budget.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        if self.fetch.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        self.fetch.request_timeout_ms = self.fetch.request_timeout_ms.min(self.fetch.task_timeout_ms);
        Ok(self)
    }
}

/// Provider credential. Never printed by `Debug`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into().trim().to_string())
    }

    /// Read the credential from [`CREDENTIAL_ENV`]; unset means empty.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(CREDENTIAL_ENV).ok())
    }

    fn from_value(value: Option<String>) -> Self {
        value.map(Self::new).unwrap_or_default()
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<empty>)")
        } else {
            f.write_str("Credential(***)")
        }
    }
}

/// Returns the path to the data directory for package-indexer.
/// Uses $XDG_DATA_HOME/package-indexer if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/package-indexer,
/// or ./package-indexer if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("package-indexer.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("package-indexer")
}
