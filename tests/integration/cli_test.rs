//! Integration tests for the threadline CLI

use std::io::Write;

use serde_json::Value;
use tempfile::NamedTempFile;

use crate::helpers::{fixture_path, run_threadline};

fn fixture_arg(name: &str) -> String {
    fixture_path(name).to_string_lossy().to_string()
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let (stdout, _stderr, exit_code) = run_threadline(&["--help"]);

    assert_eq!(exit_code, 0);
    for command in ["normalize", "history", "stats", "config", "completions"] {
        assert!(stdout.contains(command), "missing {} in help", command);
    }
}

#[test]
fn normalize_without_file_is_usage_error() {
    let (_stdout, stderr, exit_code) = run_threadline(&["normalize"]);

    assert_eq!(exit_code, 2);
    assert!(stderr.contains("<FILE>"));
}

// ============================================================================
// normalize
// ============================================================================

#[test]
fn normalize_outputs_json_array_for_export() {
    let file = fixture_arg("conversations.json");
    let (stdout, _stderr, exit_code) = run_threadline(&["normalize", &file]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).expect("stdout should be JSON");
    let conversations = json.as_array().expect("array of conversations");
    assert_eq!(conversations.len(), 5);
    assert_eq!(conversations[0]["id"], "c-branch");
    assert_eq!(conversations[0]["messages"][4]["content"], "Thanks!");
    assert_eq!(conversations[2]["source"], "passthrough");
    assert_eq!(conversations[4]["warnings"][0]["kind"], "dangling_parent");
}

#[test]
fn normalize_single_conversation_outputs_object() {
    let file = fixture_arg("conversations.json");
    let (stdout, _stderr, exit_code) =
        run_threadline(&["normalize", &file, "--conversation", "c-branch", "--pretty"]);

    assert_eq!(exit_code, 0);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["title"], "Trip planning");
    assert_eq!(json["messages"].as_array().unwrap().len(), 5);
    assert_eq!(json["messages"][0]["role"], "system");
    assert_eq!(json["messages"][1]["create_time"], 1700000010.0);
}

#[test]
fn normalize_fallback_emits_warning_on_stderr() {
    let file = fixture_arg("conversations.json");
    let (stdout, stderr, exit_code) =
        run_threadline(&["normalize", &file, "-c", "c-fallback"]);

    assert_eq!(exit_code, 0);
    assert!(stderr.contains("WARN"), "stderr: {}", stderr);
    assert!(!stderr.contains("WARNING"), "stderr: {}", stderr);
    assert!(stderr.to_lowercase().contains("fallback"), "stderr: {}", stderr);
    let json: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["messages"][1]["content"], "A systems programming language.");
}

#[test]
fn normalize_unknown_conversation_fails() {
    let file = fixture_arg("conversations.json");
    let (_stdout, stderr, exit_code) = run_threadline(&["normalize", &file, "-c", "nope"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Conversation not found: nope"));
}

#[test]
fn normalize_strict_rejects_dangling_links() {
    let file = fixture_arg("conversations.json");
    let (_stdout, stderr, exit_code) = run_threadline(&["normalize", &file, "--strict"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("missing parent 'deleted-node'"), "stderr: {}", stderr);
}

#[test]
fn normalize_missing_file_fails() {
    let (_stdout, stderr, exit_code) =
        run_threadline(&["normalize", "/nonexistent/conversations.json"]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Failed to read export file"));
}

#[test]
fn normalize_invalid_json_fails() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{\"mapping\": [").unwrap();
    let path = file.path().to_string_lossy().to_string();

    let (_stdout, stderr, exit_code) = run_threadline(&["normalize", &path]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid export JSON"), "stderr: {}", stderr);
}

// ============================================================================
// history
// ============================================================================

#[test]
fn history_renders_single_conversation() {
    let file = fixture_arg("single.json");
    let (stdout, _stderr, exit_code) = run_threadline(&["history", &file]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "User: Question\n\nAssistant: Answer\n\nUser: Follow up\n");
}

#[test]
fn history_with_timestamps_and_cap() {
    let file = fixture_arg("single.json");
    let (stdout, _stderr, exit_code) =
        run_threadline(&["history", &file, "--timestamps", "--max-chars", "36"]);

    assert_eq!(exit_code, 0);
    assert_eq!(stdout, "[2023-11-14 22:13:20] User: Question\n");
}

#[test]
fn history_headings_for_multiple_conversations() {
    let file = fixture_arg("conversations.json");
    let (stdout, _stderr, exit_code) = run_threadline(&["history", &file]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("## Trip planning\n\nSystem: I prefer short answers"));
    assert!(stdout.contains("## Pre-parsed\n\nUser: Hi\n\nAssistant: Hello!"));
    assert!(!stdout.contains("the beach"));
}

#[test]
fn history_chunks_use_config_size() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[history]\nchunk_chars = 20").unwrap();
    let config_path = config.path().to_string_lossy().to_string();
    let file = fixture_arg("single.json");

    let (stdout, _stderr, exit_code) =
        run_threadline(&["history", &file, "--chunk", "--config", &config_path]);

    assert_eq!(exit_code, 0);
    assert_eq!(
        stdout,
        "--- chunk 1 ---\nUser: Question\n\n--- chunk 2 ---\nAssistant: Answer\n\n--- chunk 3 ---\nUser: Follow up\n"
    );
}

// ============================================================================
// stats / config / completions
// ============================================================================

#[test]
fn stats_summarizes_export() {
    let file = fixture_arg("conversations.json");
    let (stdout, _stderr, exit_code) = run_threadline(&["stats", &file]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("Conversations:       5"), "stdout: {}", stdout);
    assert!(stdout.contains("Visible messages:    11"), "stdout: {}", stdout);
    assert!(stdout.contains("Fallback traversals: 1"), "stdout: {}", stdout);
    assert!(stdout.contains("Structural warnings: 1"), "stdout: {}", stdout);
}

#[test]
fn config_show_prints_effective_config() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[normalize]\nlink_policy = \"strict\"").unwrap();
    let config_path = config.path().to_string_lossy().to_string();

    let (stdout, _stderr, exit_code) =
        run_threadline(&["config", "show", "--config", &config_path]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("link_policy = \"strict\""));
    assert!(stdout.contains("max_chars = 100000"));
}

#[test]
fn config_with_invalid_toml_fails() {
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "[history\nmax_chars = ").unwrap();
    let config_path = config.path().to_string_lossy().to_string();

    let (_stdout, stderr, exit_code) =
        run_threadline(&["config", "show", "--config", &config_path]);

    assert_eq!(exit_code, 1);
    assert!(stderr.contains("Invalid config file"));
}

#[test]
fn completions_generate_for_bash() {
    let (stdout, _stderr, exit_code) = run_threadline(&["completions", "bash"]);

    assert_eq!(exit_code, 0);
    assert!(stdout.contains("threadline"));
}
