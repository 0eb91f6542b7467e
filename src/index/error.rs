use std::time::Duration;

use thiserror::Error;

use crate::metadata::error::MetadataError;
use crate::version::error::RemoteError;

/// Reason a single package could not be enriched
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("Ref listing failed: {0}")]
    Remote(#[from] RemoteError),

    #[error("Metadata fetch failed: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Cancelled")]
    Cancelled,

    #[error("Task failed: {0}")]
    TaskFailed(String),
}
