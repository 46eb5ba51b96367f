//! End-to-end tests for the `padconf` CLI.
//!
//! Every test runs the built binary against its own isolated config
//! directory via the `PADCONF_CONFIG_DIR` override, so tests are free to
//! mutate settings without a shared lock.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Path to the padconf binary
fn padconf_bin() -> String {
    std::env::var("CARGO_BIN_EXE_padconf").unwrap_or_else(|_| "target/debug/padconf".to_string())
}

/// Runs the binary with an isolated config directory.
fn padconf(config_dir: &Path, args: &[&str]) -> Output {
    Command::new(padconf_bin())
        .env("PADCONF_CONFIG_DIR", config_dir)
        .args(args)
        .output()
        .expect("Failed to execute command")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

// ============================================================================
// Show Command Tests
// ============================================================================

#[test]
fn test_show_defaults() {
    let dir = TempDir::new().unwrap();
    let output = padconf(dir.path(), &["show"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Button bindings"));
    assert!(text.contains("Thumbstick bindings"));
    assert!(text.contains("7878"));
    assert!(text.contains("Mouse sensitivity"));
}

#[test]
fn test_show_json_format() {
    let dir = TempDir::new().unwrap();
    let output = padconf(dir.path(), &["show", "--json"]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["button_settings"]["A"], 13);
    assert_eq!(json["server_settings"]["Port"], 7878);
    assert_eq!(json["mouse_sensitivity"], 1000.0);
}

// ============================================================================
// Set Command Tests
// ============================================================================

#[test]
fn test_set_port_round_trips() {
    let dir = TempDir::new().unwrap();

    let output = padconf(dir.path(), &["set", "--port", "9090"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(dir.path().join("settings.toml").exists());

    let output = padconf(dir.path(), &["show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["server_settings"]["Port"], 9090);
}

#[test]
fn test_set_button_by_name_and_code() {
    let dir = TempDir::new().unwrap();

    let output = padconf(dir.path(), &["set", "--button", "A=SPACE"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let output = padconf(dir.path(), &["set", "--button", "B=36"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let output = padconf(dir.path(), &["show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["button_settings"]["A"], 32);
    assert_eq!(json["button_settings"]["B"], 36);
}

#[test]
fn test_set_rejects_out_of_range_port() {
    let dir = TempDir::new().unwrap();

    let output = padconf(dir.path(), &["set", "--port", "70000"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("out of range"));

    // Nothing was persisted
    let output = padconf(dir.path(), &["show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["server_settings"]["Port"], 7878);
}

#[test]
fn test_set_rejects_duplicate_binding() {
    let dir = TempDir::new().unwrap();

    // A holds ENTER by default
    let output = padconf(dir.path(), &["set", "--button", "B=ENTER"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("already held"));
}

#[test]
fn test_set_rejects_unknown_key_name() {
    let dir = TempDir::new().unwrap();

    let output = padconf(dir.path(), &["set", "--button", "TURBO=ENTER"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("TURBO"));
}

#[test]
fn test_set_requires_an_option() {
    let dir = TempDir::new().unwrap();

    let output = padconf(dir.path(), &["set"]);
    assert_eq!(output.status.code(), Some(2));
}

// ============================================================================
// Unset / Reset Command Tests
// ============================================================================

#[test]
fn test_unset_reverts_to_default() {
    let dir = TempDir::new().unwrap();

    padconf(dir.path(), &["set", "--button", "A=SPACE"]);
    let output = padconf(dir.path(), &["unset", "--button", "A"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let output = padconf(dir.path(), &["show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["button_settings"]["A"], 13);
}

#[test]
fn test_reset_restores_all_defaults() {
    let dir = TempDir::new().unwrap();

    padconf(dir.path(), &["set", "--port", "9999", "--mouse-sensitivity", "5.0"]);
    let output = padconf(dir.path(), &["reset"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let output = padconf(dir.path(), &["show", "--json"]);
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(json["server_settings"]["Port"], 7878);
    assert_eq!(json["mouse_sensitivity"], 1000.0);
}

// ============================================================================
// Validate / Path / Codes Command Tests
// ============================================================================

#[test]
fn test_validate_accepts_saved_settings() {
    let dir = TempDir::new().unwrap();

    padconf(dir.path(), &["set", "--port", "9090"]);
    let output = padconf(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("is valid"));
}

#[test]
fn test_validate_flags_unknown_keys() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.toml"),
        "[button_settings]\nTURBO = 65\n",
    )
    .unwrap();

    let output = padconf(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("TURBO"));
}

#[test]
fn test_validate_flags_malformed_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.toml"), "not { valid toml").unwrap();

    let output = padconf(dir.path(), &["validate"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("parse"));
}

#[test]
fn test_path_points_into_config_dir() {
    let dir = TempDir::new().unwrap();

    let output = padconf(dir.path(), &["path"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("settings.toml"));
    assert!(text.contains(dir.path().to_str().unwrap()));
}

#[test]
fn test_codes_search() {
    let dir = TempDir::new().unwrap();

    let output = padconf(dir.path(), &["codes", "ENTER"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("ENTER"));
    assert!(text.contains("13"));
}

#[test]
fn test_codes_category_filter() {
    let dir = TempDir::new().unwrap();

    let output = padconf(dir.path(), &["codes", "--category", "mouse"]);
    assert_eq!(output.status.code(), Some(0));
    let text = stdout(&output);
    assert!(text.contains("LMButton"));
    assert!(!text.contains("ENTER"));

    let output = padconf(dir.path(), &["codes", "--category", "bogus"]);
    assert_eq!(output.status.code(), Some(2));
}
