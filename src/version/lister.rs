//! Remote ref listing via the git CLI

#[cfg(test)]
use mockall::automock;

use tokio::process::Command;
use tracing::debug;

use crate::version::error::RemoteError;

/// Trait for listing the refs a remote repository advertises
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RefLister: Send + Sync {
    /// Lists all refs of `remote_url`
    ///
    /// # Returns
    /// * `Ok(String)` - Raw listing output, one `<revision>\t<ref>` per line
    /// * `Err(RemoteError)` - If the remote could not be listed
    async fn list_refs(&self, remote_url: &str) -> Result<String, RemoteError>;
}

/// Lists refs by running `git ls-remote <url>` as a child process.
///
/// Has no deadline of its own; callers bound it. Dropping the returned future
/// kills the child.
pub struct GitRefLister {
    program: String,
}

impl GitRefLister {
    /// Creates a lister that runs `program` instead of `git`
    pub fn with_program(program: &str) -> Self {
        Self {
            program: program.to_string(),
        }
    }
}

impl Default for GitRefLister {
    fn default() -> Self {
        Self::with_program("git")
    }
}

#[async_trait::async_trait]
impl RefLister for GitRefLister {
    async fn list_refs(&self, remote_url: &str) -> Result<String, RemoteError> {
        if remote_url.is_empty() {
            return Err(RemoteError::MissingUrl);
        }

        debug!("Listing refs of {}", remote_url);

        let output = Command::new(&self.program)
            .args(["ls-remote", remote_url])
            .env("GIT_TERMINAL_PROMPT", "0")
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| RemoteError::Unreachable {
                url: remote_url.to_string(),
                reason: format!("failed to run {}: {}", self.program, e),
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            return Err(RemoteError::Unreachable {
                url: remote_url.to_string(),
                reason: format!("{}: {}", output.status, stderr.trim()),
            });
        }

        Ok(format!("{}{}", stdout, stderr))
    }
}
