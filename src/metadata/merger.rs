//! Fill-only merge of fetched data into a descriptor record

use crate::descriptor::host::{prefixed_git_link, shorten_git_link};
use crate::descriptor::types::PackageRecord;
use crate::metadata::provider::ProviderMetadata;

/// Merge fetched versions and provider metadata into `record`.
///
/// - `versions` replaces the record's versions outright.
/// - Counters are written only where the record holds zero.
/// - Text fields are written only where the record holds "".
/// - `maintainers` becomes an empty list if unset.
/// - `git_short` and `git_prefixed` are always recomputed from `git`.
///
/// Merging the same inputs again yields the same record.
pub fn merge_record(
    mut record: PackageRecord,
    versions: Vec<String>,
    meta: &ProviderMetadata,
) -> PackageRecord {
    record.versions = versions;

    fill_if_zero(&mut record.stars, meta.stars);
    fill_if_zero(&mut record.watchers, meta.watchers);
    fill_if_zero(&mut record.open_issues, meta.open_issues);
    fill_if_zero(&mut record.forks, meta.forks);

    fill_if_empty(&mut record.description, &meta.description);
    fill_if_empty(&mut record.git_description, &meta.description);
    fill_if_empty(&mut record.license, &meta.license);
    fill_if_empty(&mut record.language, &meta.language);
    fill_if_empty(&mut record.owner, &meta.owner);
    fill_if_empty(&mut record.owner_type, &meta.owner_type);

    record.maintainers.get_or_insert_with(Vec::new);

    record.git_short = shorten_git_link(&record.git);
    record.git_prefixed = prefixed_git_link(&record.git);

    record
}

fn fill_if_zero(current: &mut i64, value: i64) {
    if *current == 0 {
        *current = value;
    }
}

fn fill_if_empty(current: &mut String, value: &str) {
    if current.is_empty() {
        *current = value.to_string();
    }
}
