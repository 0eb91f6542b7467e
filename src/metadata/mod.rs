//! Hosting provider metadata layer
//!
//! # Modules
//!
//! - [`provider`]: `MetadataProvider` trait and `ProviderMetadata`
//! - [`github`]: GitHub REST API implementation
//! - [`merger`]: fill-only merge into a `PackageRecord`
//! - [`error`]: `MetadataError`

pub mod error;
pub mod github;
pub mod merger;
pub mod provider;

pub use error::MetadataError;
pub use github::GitHubProvider;
pub use merger::merge_record;
pub use provider::{MetadataProvider, ProviderMetadata};
