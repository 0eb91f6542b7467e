//! Provider trait for fetching repository metadata from a hosting service

#[cfg(test)]
use mockall::automock;

use crate::descriptor::host::GitHost;
use crate::metadata::error::MetadataError;

/// Repository metadata reported by a hosting provider.
///
/// Zero counters and empty strings mean "nothing to contribute".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub watchers: i64,
    pub stars: i64,
    pub forks: i64,
    pub open_issues: i64,
    pub description: String,
    pub license: String,
    pub language: String,
    /// Owning account login
    pub owner: String,
    /// Owning account kind ("User" or "Organization")
    pub owner_type: String,
}

/// Trait for fetching repository metadata from a hosting provider
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Returns the host this provider serves
    fn host(&self) -> GitHost;

    /// Fetches metadata for a repository
    ///
    /// # Arguments
    /// * `short_path` - Host-specific repository path (e.g., "madler/zlib")
    ///
    /// # Returns
    /// * `Ok(ProviderMetadata)` - Decoded metadata; missing fields are zero/empty
    /// * `Err(MetadataError)` - If the request, status or decoding fails
    async fn fetch_metadata(&self, short_path: &str) -> Result<ProviderMetadata, MetadataError>;
}
