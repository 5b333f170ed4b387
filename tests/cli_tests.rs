//! CLI Integration Tests for framegap
//!
//! Tests the one-shot mode of the binary:
//! - JSON output shape
//! - Text output
//! - Exit status on invalid input

use std::process::Command;
use tempfile::TempDir;

// ============================================================================
// Test Helpers
// ============================================================================

/// Run the binary from an empty directory so no local config is picked up
fn framegap(args: &[&str]) -> std::process::Output {
    let dir = TempDir::new().unwrap();
    Command::new(env!("CARGO_BIN_EXE_framegap"))
        .args(args)
        .current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path())
        .output()
        .expect("failed to run framegap")
}

// ============================================================================
// One-shot mode
// ============================================================================

#[test]
fn test_json_output_for_professional_panel() {
    let out = framegap(&["--panel", "professional", "--frames", "1,2,3,5,6,10,11,16", "--json"]);
    assert!(out.status.success());

    let json: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(json["input"], serde_json::json!([1, 2, 3, 5, 6, 10, 11, 16]));
    assert_eq!(json["gaps"], serde_json::json!([[4, 4], [7, 9], [12, 15]]));
    assert_eq!(json["longest_gap"], serde_json::json!([12, 15]));
    assert_eq!(json["missing_count"], 8);
}

#[test]
fn test_text_output_for_basic_panel() {
    let out = framegap(&["--panel", "basic", "--frames", "1,2,3,5,6"]);
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Missing:  4"));
    assert!(stdout.contains("Found 1 missing frame"));
}

#[test]
fn test_invalid_input_exits_non_zero() {
    let out = framegap(&["--panel", "advanced", "--frames", "abc, 0, -2", "--json"]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());

    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("invalid or empty input"));
}

#[test]
fn test_unknown_panel_is_rejected() {
    let out = framegap(&["--panel", "hero", "--frames", "1,2"]);
    assert!(!out.status.success());
}

#[test]
fn test_json_requires_frames() {
    let out = framegap(&["--json"]);
    assert!(!out.status.success());
}
