//! Integration tests for the regsweep CLI

use std::fs;
use std::path::Path;
use std::process::Command;

fn run_regsweep(args: &[&str], cwd: &Path) -> (String, String, bool) {
    let manifest_dir = env!("CARGO_MANIFEST_DIR").to_string();
    let mut cmd_args = vec![
        "run",
        "--quiet",
        "-p",
        "regsweep",
        "--manifest-path",
    ];
    let manifest_path = manifest_dir + "/Cargo.toml";
    cmd_args.push(&manifest_path);
    cmd_args.push("--");
    cmd_args.extend(args);

    let output = Command::new("cargo")
        .args(&cmd_args)
        .current_dir(cwd)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();

    (stdout, stderr, success)
}

#[test]
fn test_cli_help() {
    let temp = tempfile::tempdir().unwrap();
    let (stdout, _, success) = run_regsweep(&["--help"], temp.path());

    assert!(success);
    assert!(stdout.contains("export"));
    assert!(stdout.contains("dupes"));
    assert!(stdout.contains("run"));
}

#[test]
fn test_export_then_dupes() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("register.csv"),
        "name,email,spare\nAlice   A,x@a.com,\n   ,,\nBob,y@b.com,\nAl,x@a.com,\n",
    )
    .unwrap();

    let (stdout, stderr, success) = run_regsweep(
        &["export", "register.csv", "-o", "cleaned.csv"],
        temp.path(),
    );
    assert!(success, "export failed: {}", stderr);
    assert!(stdout.contains("Cleaned data exported to"));

    let cleaned = fs::read_to_string(temp.path().join("cleaned.csv")).unwrap();
    assert_eq!(
        cleaned,
        "name,email\nAlice A,x@a.com\nBob,y@b.com\nAl,x@a.com\n"
    );

    let (stdout, stderr, success) = run_regsweep(
        &["dupes", "cleaned.csv", "-o", "duplicate-rows.txt"],
        temp.path(),
    );
    assert!(success, "dupes failed: {}", stderr);
    assert!(stdout.contains("2 rows with duplicate 'email' values"));

    let report = fs::read_to_string(temp.path().join("duplicate-rows.txt")).unwrap();
    assert!(report.contains("Duplicate 'email' values found on"));
    assert!(report.contains("x@a.com"));
    assert!(!report.contains("y@b.com"));
}

#[test]
fn test_dupes_clean_outcome() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("cleaned.csv"),
        "name,email\nAlice,x@a.com\nBob,y@b.com\n",
    )
    .unwrap();

    let (stdout, _, success) = run_regsweep(&["dupes", "cleaned.csv"], temp.path());

    assert!(success);
    assert!(stdout.contains("No duplicate 'email' values found"));
    assert!(!temp.path().join("duplicate-rows.txt").exists());
}

#[test]
fn test_dupes_missing_key_column() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("cleaned.csv"),
        "name,mail\nAlice,x@a.com\nBob,x@a.com\n",
    )
    .unwrap();

    let (_, stderr, success) = run_regsweep(&["dupes", "cleaned.csv"], temp.path());

    assert!(!success);
    assert!(stderr.contains("key column 'email' not found"));
    assert!(!temp.path().join("duplicate-rows.txt").exists());
}

#[test]
fn test_export_missing_source() {
    let temp = tempfile::tempdir().unwrap();

    let (_, stderr, success) = run_regsweep(&["export", "absent.xlsx"], temp.path());

    assert!(!success);
    assert!(stderr.contains("source not found"));
    assert!(!temp.path().join("cleaned.csv").exists());
}

#[test]
fn test_run_pipeline_json() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(
        temp.path().join("register.csv"),
        "name,email\nAlice,x@a.com\nAl,x@a.com\n",
    )
    .unwrap();

    let (stdout, stderr, success) =
        run_regsweep(&["run", "register.csv", "--json"], temp.path());
    assert!(success, "run failed: {}", stderr);

    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("Invalid JSON output");
    assert_eq!(parsed["duplicates"], true);
    assert_eq!(parsed["duplicate_rows"], 2);
    assert!(temp.path().join("cleaned.csv").exists());
    assert!(temp.path().join("duplicate-rows.txt").exists());
}
