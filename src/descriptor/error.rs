use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid descriptor {path}: {source}")]
    InvalidDescriptor {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Overrides in {path} must be a JSON object")]
    InvalidOverrides { path: PathBuf },

    #[error("Failed to walk descriptor tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Failed to serialize index: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl DescriptorError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DescriptorError::Io {
            path: path.into(),
            source,
        }
    }
}
