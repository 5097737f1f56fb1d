//! Shared helpers for integration tests

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use threadline::conversation::Conversation;
use threadline::parse_export;

/// Directory holding the JSON fixtures.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Path of a fixture file.
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Read a fixture file as a string.
pub fn load_fixture(name: &str) -> String {
    fs::read_to_string(fixture_path(name))
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// Parse a fixture and return the conversation with `id`.
pub fn fixture_conversation(name: &str, id: &str) -> Conversation {
    parse_export(&load_fixture(name))
        .expect("fixture should parse")
        .into_iter()
        .find(|c| c.id() == Some(id))
        .unwrap_or_else(|| panic!("No conversation {} in {}", id, name))
}

/// Run the threadline binary and capture (stdout, stderr, exit code).
pub fn run_threadline(args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_threadline"))
        .args(args)
        .env("NO_COLOR", "1")
        .env_remove("THREADLINE_LOG")
        // Keep a user config file out of the picture
        .env(
            "XDG_CONFIG_HOME",
            std::env::temp_dir().join("threadline-tests-no-config"),
        )
        .output()
        .expect("Failed to execute threadline");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}
