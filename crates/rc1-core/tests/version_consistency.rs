//! Ensures all workspace crates use `version.workspace = true` and that
//! the workspace version is consistent across all Cargo.toml files.

use std::path::{Path, PathBuf};

fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn read_toml(path: &Path) -> toml::Value {
    let raw = std::fs::read_to_string(path).unwrap();
    raw.parse().unwrap()
}

fn workspace_version() -> String {
    let doc = read_toml(&workspace_root().join("Cargo.toml"));
    doc["workspace"]["package"]["version"]
        .as_str()
        .unwrap()
        .to_string()
}

fn uses_workspace_version(manifest_dir: &Path) -> bool {
    let doc = read_toml(&manifest_dir.join("Cargo.toml"));
    doc.get("package")
        .and_then(|pkg| pkg.get("version"))
        .and_then(|v| v.as_table())
        .and_then(|t| t.get("workspace"))
        .and_then(|v| v.as_bool())
        == Some(true)
}

#[test]
fn all_crates_use_workspace_version() {
    let root = workspace_root();
    for krate in ["crates/rc1-core", "crates/rc1-cli"] {
        assert!(
            uses_workspace_version(&root.join(krate)),
            "{} should use version.workspace = true",
            krate
        );
    }
}

#[test]
fn workspace_version_matches_cargo_pkg() {
    assert_eq!(workspace_version(), env!("CARGO_PKG_VERSION"));
    assert_eq!(rc1_core::VERSION, env!("CARGO_PKG_VERSION"));
}

#[test]
fn core_dependency_pin_matches_workspace_version() {
    let doc = read_toml(&workspace_root().join("Cargo.toml"));
    let pinned = doc["workspace"]["dependencies"]["rc1-core"]["version"]
        .as_str()
        .unwrap();
    assert_eq!(pinned, workspace_version());
}
