// tests/integration_test.rs
use std::process::Command;

#[test]
fn test_spec_sync_help() {
    let output = Command::new("cargo")
        .args(&["run", "--bin", "spec-sync", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("spec-sync"));
    assert!(stdout.contains("Monitor upstream releases"));
    assert!(stdout.contains("--dry-run"));
}

#[test]
fn test_spec_sync_version() {
    let output = Command::new("cargo")
        .args(&["run", "--bin", "spec-sync", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("spec-sync"));
}

#[test]
fn test_missing_config_is_fatal() {
    let output = Command::new("cargo")
        .args(&[
            "run",
            "--bin",
            "spec-sync",
            "--",
            "--config",
            "/nonexistent/specsync.toml",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Error loading config"));
}
