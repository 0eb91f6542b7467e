//! Parsing of `git ls-remote` output into release-like version names

use crate::version::classifier::is_release_like;

const TAG_REF_MARKER: &str = "refs/tags/";
const HEAD_REF_MARKER: &str = "refs/heads/";

/// Extract release-like version names from remote listing output.
///
/// Expected line format: `<revision>\trefs/(tags|heads)/<name>`.
/// Only lines mentioning a tag or branch ref are considered; the name is the
/// last `/`-separated segment of the line. Names keep their listing order and
/// duplicates are kept. Lines that do not fit are skipped.
pub fn parse_remote_refs(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| line.contains(TAG_REF_MARKER) || line.contains(HEAD_REF_MARKER))
        .filter_map(|line| line.rsplit('/').next())
        .filter(|name| is_release_like(name))
        .map(str::to_string)
        .collect()
}
