//! Descriptor tree loading
//!
//! Layout of the tree:
//! ```text
//! index/
//!   zlib/
//!     info.json        descriptor
//!     overrides.json   optional, top-level keys replace the descriptor's
//!   fmt/
//!     info.json
//! ```

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::descriptor::error::DescriptorError;
use crate::descriptor::host::is_accepted_link;
use crate::descriptor::types::PackageRecord;

pub const DESCRIPTOR_FILE_NAME: &str = "info.json";
pub const OVERRIDES_FILE_NAME: &str = "overrides.json";

/// Result of loading a descriptor tree
#[derive(Debug, Default)]
pub struct LoadedIndex {
    /// Successfully decoded records, in file-name order
    pub records: Vec<PackageRecord>,
    /// Descriptors that could not be read or decoded
    pub rejected: Vec<(PathBuf, DescriptorError)>,
}

/// Load a single descriptor file, applying a sibling `overrides.json` if present.
///
/// A `git` value that is not an accepted hosting link is cleared, so later
/// stages treat the record as having no remote.
pub fn load_descriptor(path: &Path) -> Result<PackageRecord, DescriptorError> {
    let mut value = read_json(path)?;

    if let Some(overrides_path) = path.parent().map(|dir| dir.join(OVERRIDES_FILE_NAME))
        && overrides_path.is_file()
    {
        let overrides = read_json(&overrides_path)?;
        apply_overrides(&mut value, overrides, &overrides_path)?;
        debug!("Applied overrides from {:?}", overrides_path);
    }

    let mut record: PackageRecord =
        serde_json::from_value(value).map_err(|source| DescriptorError::InvalidDescriptor {
            path: path.to_path_buf(),
            source,
        })?;

    if !record.git.is_empty() && !is_accepted_link(&record.git) {
        debug!(
            "Ignoring unsupported git link for {}: {}",
            record.name, record.git
        );
        record.git.clear();
    }

    Ok(record)
}

/// Walk `root` and load every descriptor below it.
///
/// Descriptors that fail to load are collected in [`LoadedIndex::rejected`]
/// rather than aborting the walk. Failing to walk the tree itself is an error.
pub fn load_index(root: &Path) -> Result<LoadedIndex, DescriptorError> {
    let mut loaded = LoadedIndex::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() || entry.file_name() != DESCRIPTOR_FILE_NAME {
            continue;
        }

        match load_descriptor(entry.path()) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                warn!("Skipping descriptor {:?}: {}", entry.path(), e);
                loaded.rejected.push((entry.path().to_path_buf(), e));
            }
        }
    }

    debug!(
        "Loaded {} descriptors from {:?} ({} rejected)",
        loaded.records.len(),
        root,
        loaded.rejected.len()
    );

    Ok(loaded)
}

fn read_json(path: &Path) -> Result<Value, DescriptorError> {
    let content = std::fs::read_to_string(path).map_err(|e| DescriptorError::io(path, e))?;
    serde_json::from_str(&content).map_err(|source| DescriptorError::InvalidDescriptor {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_overrides(
    descriptor: &mut Value,
    overrides: Value,
    overrides_path: &Path,
) -> Result<(), DescriptorError> {
    let Value::Object(overrides) = overrides else {
        return Err(DescriptorError::InvalidOverrides {
            path: overrides_path.to_path_buf(),
        });
    };

    // A descriptor that is not an object is left for decoding to reject.
    if let Value::Object(fields) = descriptor {
        fields.extend(overrides);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_package(root: &Path, name: &str, file: &str, content: &str) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_descriptor_reads_record_fields() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_package(
            temp_dir.path(),
            "zlib",
            DESCRIPTOR_FILE_NAME,
            r#"{"name": "zlib", "git": "https://github.com/madler/zlib", "stars": 12}"#,
        );

        let record = load_descriptor(&path).unwrap();

        assert_eq!(record.name, "zlib");
        assert_eq!(record.git, "https://github.com/madler/zlib");
        assert_eq!(record.stars, 12);
    }

    #[test]
    fn load_descriptor_clears_unsupported_git_link() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_package(
            temp_dir.path(),
            "foo",
            DESCRIPTOR_FILE_NAME,
            r#"{"name": "foo", "git": "http://github.com/a/b"}"#,
        );

        let record = load_descriptor(&path).unwrap();

        assert_eq!(record.git, "");
    }

    #[test]
    fn load_descriptor_applies_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_package(
            temp_dir.path(),
            "fmt",
            DESCRIPTOR_FILE_NAME,
            r#"{"name": "fmt", "description": "old", "stars": 1}"#,
        );
        write_package(
            temp_dir.path(),
            "fmt",
            OVERRIDES_FILE_NAME,
            r#"{"description": "curated", "license": "MIT"}"#,
        );

        let record = load_descriptor(&path).unwrap();

        assert_eq!(record.description, "curated");
        assert_eq!(record.license, "MIT");
        assert_eq!(record.stars, 1);
    }

    #[test]
    fn load_descriptor_rejects_non_object_overrides() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_package(temp_dir.path(), "fmt", DESCRIPTOR_FILE_NAME, r#"{"name": "fmt"}"#);
        write_package(temp_dir.path(), "fmt", OVERRIDES_FILE_NAME, r#"["nope"]"#);

        let result = load_descriptor(&path);

        assert!(matches!(
            result,
            Err(DescriptorError::InvalidOverrides { .. })
        ));
    }

    #[test]
    fn load_descriptor_reports_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_package(temp_dir.path(), "bad", DESCRIPTOR_FILE_NAME, "{not json");

        let result = load_descriptor(&path);

        assert!(matches!(
            result,
            Err(DescriptorError::InvalidDescriptor { .. })
        ));
    }

    #[test]
    fn load_index_collects_records_in_name_order_and_rejects_invalid() {
        let temp_dir = TempDir::new().unwrap();
        write_package(temp_dir.path(), "zlib", DESCRIPTOR_FILE_NAME, r#"{"name": "zlib"}"#);
        write_package(temp_dir.path(), "abseil", DESCRIPTOR_FILE_NAME, r#"{"name": "abseil"}"#);
        write_package(temp_dir.path(), "broken", DESCRIPTOR_FILE_NAME, r#"{"name": 3}"#);
        write_package(temp_dir.path(), "zlib", "README.md", "not a descriptor");

        let loaded = load_index(temp_dir.path()).unwrap();

        let names: Vec<_> = loaded.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["abseil", "zlib"]);
        assert_eq!(loaded.rejected.len(), 1);
        assert!(loaded.rejected[0].0.ends_with("broken/info.json"));
    }

    #[test]
    fn load_index_fails_for_missing_root() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_index(&temp_dir.path().join("missing"));

        assert!(matches!(result, Err(DescriptorError::Walk(_))));
    }
}
