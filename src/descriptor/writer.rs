//! Aggregate index output

use std::path::Path;

use tracing::info;

use crate::descriptor::error::DescriptorError;
use crate::descriptor::types::PackageRecord;

/// Write `records` as a pretty-printed JSON array to `path`.
///
/// The document is written to a sibling temporary file and renamed into
/// place, so readers never observe a half-written index.
pub fn write_index(path: &Path, records: &[PackageRecord]) -> Result<(), DescriptorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| DescriptorError::io(parent, e))?;
    }

    let json = serde_json::to_string_pretty(records).map_err(DescriptorError::Serialize)?;

    let tmp_path = path.with_extension("json.tmp");
    std::fs::write(&tmp_path, json).map_err(|e| DescriptorError::io(&tmp_path, e))?;
    std::fs::rename(&tmp_path, path).map_err(|e| DescriptorError::io(path, e))?;

    info!("Wrote {} packages to {:?}", records.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn write_index_creates_parent_directories_and_writes_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dist").join("index.json");
        let records = vec![
            PackageRecord::new("a", ""),
            PackageRecord::new("b", "https://github.com/x/b"),
        ];

        write_index(&path, &records).unwrap();

        let written: Vec<PackageRecord> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, records);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn write_index_writes_empty_array_for_no_records() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.json");

        write_index(&path, &[]).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[test]
    fn write_index_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("index.json");
        std::fs::write(&path, "stale").unwrap();

        write_index(&path, &[PackageRecord::new("fresh", "")]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"fresh\""));
    }
}
