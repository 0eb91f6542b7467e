//! Binary-level tests

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn write_descriptor(root: &std::path::Path, name: &str, descriptor: serde_json::Value) {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("info.json"), descriptor.to_string()).unwrap();
}

#[test]
fn no_enrich_writes_index_from_descriptors() {
    let index_dir = TempDir::new().unwrap();
    write_descriptor(
        index_dir.path(),
        "zlib",
        json!({"name": "zlib", "git": "https://github.com/madler/zlib", "stars": -1}),
    );
    let out_dir = TempDir::new().unwrap();
    let output = out_dir.path().join("dist").join("index.json");

    Command::cargo_bin("package-indexer")
        .unwrap()
        .arg("--index-dir")
        .arg(index_dir.path())
        .arg("--output")
        .arg(&output)
        .arg("--no-enrich")
        .assert()
        .success();

    let index: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(index[0]["name"], "zlib");
    assert_eq!(index[0]["stars"], -1);
}

#[test]
fn missing_index_dir_is_logged_as_error() {
    let work_dir = TempDir::new().unwrap();
    let log_file = work_dir.path().join("logs").join("indexer.log");

    Command::cargo_bin("package-indexer")
        .unwrap()
        .env_remove("RUST_LOG")
        .arg("--index-dir")
        .arg(work_dir.path().join("missing"))
        .arg("--output")
        .arg(work_dir.path().join("index.json"))
        .arg("--no-enrich")
        .arg("--log-file")
        .arg(&log_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load descriptors"));

    let log = std::fs::read_to_string(&log_file).unwrap();
    assert!(log.contains("ERROR"));
    assert!(log.contains("Failed to load descriptors"));
}
