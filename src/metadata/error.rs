use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected status {status} for {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}
