use thiserror::Error;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Remote unreachable: {url}: {reason}")]
    Unreachable { url: String, reason: String },

    #[error("No remote URL to list")]
    MissingUrl,
}
