//! Ref lister test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use package_indexer::version::error::RemoteError;
use package_indexer::version::lister::RefLister;

/// Fake lister answering from canned `git ls-remote` output
#[derive(Default)]
pub struct FakeRefLister {
    outputs: HashMap<String, String>,
    calls: Mutex<Vec<String>>,
}

impl FakeRefLister {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register tags for `url`; unregistered URLs are unreachable
    pub fn with_tags(mut self, url: &str, tags: Vec<&str>) -> Self {
        let output = tags
            .into_iter()
            .map(|tag| format!("0123456789abcdef0123456789abcdef01234567\trefs/tags/{}\n", tag))
            .collect();
        self.outputs.insert(url.to_string(), output);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RefLister for FakeRefLister {
    async fn list_refs(&self, remote_url: &str) -> Result<String, RemoteError> {
        self.calls.lock().unwrap().push(remote_url.to_string());
        match self.outputs.get(remote_url) {
            Some(output) => Ok(output.clone()),
            None => Err(RemoteError::Unreachable {
                url: remote_url.to_string(),
                reason: "fatal: repository not found".to_string(),
            }),
        }
    }
}
