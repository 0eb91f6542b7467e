//! Catalog entry model shared by every layer

use serde::{Deserialize, Deserializer, Serialize};

/// One catalog entry, as authored in a descriptor and later enriched.
///
/// Field names follow the on-disk descriptor format (snake_case keys).
/// Every field tolerates a missing key or an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageRecord {
    /// Unique key within a run
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Release-like identifiers, in remote listing order
    #[serde(default, deserialize_with = "null_as_default")]
    pub versions: Vec<String>,
    /// Canonical remote repository URL ("" when absent or not accepted)
    #[serde(default, deserialize_with = "null_as_default")]
    pub git: String,
    /// Host-specific path of `git` (e.g. "acme/widget")
    #[serde(default, deserialize_with = "null_as_default")]
    pub git_short: String,
    /// Host tag plus `git_short` (e.g. "gh:acme/widget")
    #[serde(default, deserialize_with = "null_as_default")]
    pub git_prefixed: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stars: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub forks: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub open_issues: i64,
    /// `None` until enrichment; never `None` afterwards
    #[serde(default)]
    pub maintainers: Option<Vec<String>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub watchers: i64,
    /// Maintainer-supplied description
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Description as reported by the hosting provider
    #[serde(default, deserialize_with = "null_as_default")]
    pub git_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub target_link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub license: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    /// Owning account login
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: String,
    /// Owning account kind ("User" or "Organization")
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner_type: String,
}

impl PackageRecord {
    pub fn new(name: impl Into<String>, git: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            git: git.into(),
            ..Self::default()
        }
    }
}

/// Decodes `null` as the type's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_uses_defaults_for_missing_fields() {
        let record: PackageRecord = serde_json::from_value(json!({
            "name": "foo",
            "git": "https://github.com/a/b.git"
        }))
        .unwrap();

        assert_eq!(record, PackageRecord::new("foo", "https://github.com/a/b.git"));
        assert_eq!(record.maintainers, None);
    }

    #[test]
    fn deserialize_treats_null_as_empty() {
        let record: PackageRecord = serde_json::from_value(json!({
            "name": "foo",
            "versions": null,
            "description": null,
            "stars": null,
            "maintainers": null
        }))
        .unwrap();

        assert!(record.versions.is_empty());
        assert_eq!(record.description, "");
        assert_eq!(record.stars, 0);
        assert_eq!(record.maintainers, None);
    }

    #[test]
    fn serialize_uses_descriptor_key_names() {
        let mut record = PackageRecord::new("foo", "https://github.com/a/b");
        record.target_link = "foo".to_string();
        record.maintainers = Some(vec![]);

        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["target_link"], "foo");
        assert_eq!(value["open_issues"], 0);
        assert_eq!(value["git_prefixed"], "");
        assert_eq!(value["maintainers"], json!([]));
    }

    #[test]
    fn deserialize_keeps_negative_counters() {
        let record: PackageRecord = serde_json::from_value(json!({
            "name": "neg",
            "git": "https://github.com/a/b",
            "stars": -1,
            "open_issues": -3
        }))
        .unwrap();

        assert_eq!(record.stars, -1);
        assert_eq!(record.open_issues, -3);
    }

    #[test]
    fn deserialize_rejects_wrongly_typed_counter() {
        let result = serde_json::from_value::<PackageRecord>(json!({
            "name": "foo",
            "stars": "many"
        }));

        assert!(result.is_err());
    }
}
