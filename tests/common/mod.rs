//! Integration tests for fs-transact
//!
//! These tests verify end-to-end behavior by running tool operations and
//! transactional scripts against real temporary directories, through both
//! the library API and the command-line interface.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a workspace with a pre-existing file and directory
#[allow(unused)]
pub fn create_test_workspace() -> TempDir {
    let temp = TempDir::new().unwrap();

    fs::write(temp.path().join("existing.txt"), "original content").unwrap();

    let existing_dir = temp.path().join("existing-dir");
    fs::create_dir(&existing_dir).unwrap();
    fs::write(existing_dir.join("keep.txt"), "keep me").unwrap();

    temp
}

/// Helper to run an fs-transact subcommand inside `workspace_root`
#[allow(unused)]
pub fn run_tool(workspace_root: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("fs-transact");
    cmd.args(args).current_dir(workspace_root);
    cmd.assert()
}

/// Helper to write an apply script and run it
#[allow(unused)]
pub fn run_apply(
    workspace_root: &Path,
    script_body: &str,
    extra_args: &[&str],
) -> assert_cmd::assert::Assert {
    let script = workspace_root.join("ops.fst");
    fs::write(&script, script_body).unwrap();

    let mut cmd = cargo_bin_cmd!("fs-transact");
    cmd.arg("apply")
        .arg("ops.fst")
        .args(extra_args)
        .current_dir(workspace_root);

    cmd.assert()
}
