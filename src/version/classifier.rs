//! Release-like tag classification
//!
//! Remote tags follow no common convention (`v2.1.0`, `release-3_4_1`,
//! `curl-8_4_0`, a bare `main`). A name counts as a release if it matches any
//! of these patterns:
//! - `v1.2.3` / `1.2.3`
//! - `v1.2` / `1.2`
//! - `word1_2_3`, `word-1_2_3`, `word_1_2_3`
//! - `word1.2.3`, `word-1.2.3`
//! - `word1.2.3`, `word_1.2.3`
//! - `word1.2`, `word_1.2`
//! - `master`, `latest`, `stable`, `main`

use std::sync::LazyLock;

use regex::RegexSet;

const RELEASE_PATTERNS: &[&str] = &[
    r"^v?[0-9]+\.[0-9]+\.[0-9]+$",
    r"^v?[0-9]+\.[0-9]+$",
    r"[A-Za-z]+[-_]?[0-9]+_[0-9]+_[0-9]+$",
    r"[A-Za-z]+-?[0-9]+\.[0-9]+\.[0-9]+$",
    r"[A-Za-z]+_?[0-9]+\.[0-9]+\.[0-9]+$",
    r"[A-Za-z]+_?[0-9]+\.[0-9]+$",
    r"^(master|latest|stable|main)$",
];

static DEFAULT_CLASSIFIER: LazyLock<VersionClassifier> = LazyLock::new(VersionClassifier::new);

/// Matches ref names against the release-like patterns
pub struct VersionClassifier {
    patterns: RegexSet,
}

impl VersionClassifier {
    pub fn new() -> Self {
        Self {
            patterns: RegexSet::new(RELEASE_PATTERNS).unwrap(),
        }
    }

    /// Returns true if `name` matches any release-like pattern
    pub fn is_release_like(&self, name: &str) -> bool {
        self.patterns.is_match(name)
    }
}

impl Default for VersionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify `name` with the shared default classifier.
pub fn is_release_like(name: &str) -> bool {
    DEFAULT_CLASSIFIER.is_release_like(name)
}
