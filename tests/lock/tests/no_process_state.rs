//! Process-state isolation: the traversal core holds no global state.
//!
//! Scans `tlv/src` for constructs that would let one traversal observe
//! another through the process, and checks the core crate takes no
//! dependencies at all.

use std::fs;

use lock_tests::traversal_helpers::{scan_rust_sources, workspace_root};

const PROCESS_STATE: &[&str] = &[
    "static mut",
    "thread_local!",
    "OnceLock",
    "OnceCell",
    "lazy_static",
    "std::env::",
];

#[test]
fn tlv_source_has_no_process_state() {
    let tlv_src = workspace_root().join("tlv").join("src");
    let hits = scan_rust_sources(&tlv_src, PROCESS_STATE)
        .unwrap_or_else(|e| panic!("scan {}: {e}", tlv_src.display()));
    let report: Vec<String> = hits.iter().map(ToString::to_string).collect();
    assert!(
        report.is_empty(),
        "process-wide state in tlv source:\n  {}",
        report.join("\n  ")
    );
}

#[test]
fn tlv_source_is_scanned() {
    // Guards against the scan silently passing on a moved tree.
    let tlv_src = workspace_root().join("tlv").join("src");
    let hits = scan_rust_sources(&tlv_src, &["pub fn iterate"]).unwrap();
    assert_eq!(hits.len(), 1, "{hits:?}");
}

#[test]
fn tlv_manifest_declares_no_dependencies() {
    let manifest = fs::read_to_string(workspace_root().join("tlv").join("Cargo.toml"))
        .expect("tlv/Cargo.toml must exist");

    let mut in_dependencies = false;
    let mut declared = Vec::new();
    for line in manifest.lines().map(str::trim) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if line.starts_with('[') {
            in_dependencies = line.ends_with("dependencies]");
        } else if in_dependencies {
            declared.push(line);
        }
    }
    assert!(declared.is_empty(), "tlv/Cargo.toml declares: {declared:?}");
}
