//! Descriptor tree fixtures

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Write `<root>/<name>/info.json`
pub fn write_descriptor(root: &Path, name: &str, descriptor: Value) -> PathBuf {
    write_json(root, name, "info.json", descriptor)
}

/// Write `<root>/<name>/overrides.json`
pub fn write_overrides(root: &Path, name: &str, overrides: Value) -> PathBuf {
    write_json(root, name, "overrides.json", overrides)
}

fn write_json(root: &Path, name: &str, file: &str, value: Value) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(file);
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}
