//! Library-level tests against realistic export fixtures

use std::borrow::Cow;

use threadline::conversation::{normalize, Diagnostic, NormalizeOptions, Source};
use threadline::history::{render, HistoryOptions};
use threadline::{normalize_all, parse_export, NormalizeError};

use crate::helpers::{fixture_conversation, load_fixture};

fn contents(messages: &[threadline::MessageRecord]) -> Vec<&str> {
    messages.iter().map(|m| m.content.as_str()).collect()
}

#[test]
fn branching_export_yields_active_visible_path() {
    let conversation = fixture_conversation("conversations.json", "c-branch");

    let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();

    assert_eq!(
        contents(&normalized.messages),
        vec![
            "I prefer short answers",
            "Plan a trip to Lisbon",
            "Let me look that up.",
            "Day 1: Alfama.\nDay 2: Belém.",
            "Thanks!",
        ]
    );
    let roles: Vec<&str> = normalized.messages.iter().map(|m| m.role.as_str()).collect();
    assert_eq!(roles, vec!["system", "user", "assistant", "assistant", "user"]);
    assert!(normalized.diagnostics.is_empty());
}

#[test]
fn abandoned_regeneration_is_excluded() {
    let conversation = fixture_conversation("conversations.json", "c-branch");

    let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();

    // a1_old carries the latest create_time but is not on the active branch
    assert!(normalized
        .messages
        .iter()
        .all(|m| !m.content.contains("the beach")));
}

#[test]
fn output_is_chronological() {
    let conversation = fixture_conversation("conversations.json", "c-branch");

    let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();

    let times: Vec<f64> = normalized
        .messages
        .iter()
        .filter_map(|m| m.timestamp())
        .collect();
    assert!(times.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn linear_single_object_export() {
    let conversations = parse_export(&load_fixture("single.json")).unwrap();
    assert_eq!(conversations.len(), 1);

    let normalized = normalize(&conversations[0], &NormalizeOptions::default()).unwrap();

    assert_eq!(
        contents(&normalized.messages),
        vec!["Question", "Answer", "Follow up"]
    );
}

#[test]
fn missing_current_node_falls_back_to_latest_branch() {
    let conversation = fixture_conversation("conversations.json", "c-fallback");

    let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();

    assert!(normalized.used_fallback());
    assert_eq!(
        contents(&normalized.messages),
        vec!["What is Rust?", "A systems programming language."]
    );
}

#[test]
fn pre_parsed_messages_pass_through_by_reference() {
    let conversation = fixture_conversation("conversations.json", "c-flat");

    let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();

    assert_eq!(normalized.source, Source::Passthrough);
    match &normalized.messages {
        Cow::Borrowed(slice) => {
            let input = conversation.messages.as_deref().unwrap();
            assert!(std::ptr::eq(*slice, input));
        }
        Cow::Owned(_) => panic!("passthrough should borrow the input"),
    }
}

#[test]
fn conversation_without_mapping_or_messages_is_empty() {
    let conversation = fixture_conversation("conversations.json", "c-empty");

    let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();

    assert_eq!(normalized.source, Source::Empty);
    assert!(normalized.messages.is_empty());
}

#[test]
fn dangling_parent_truncates_by_default_and_fails_when_strict() {
    let conversation = fixture_conversation("conversations.json", "c-dangling");

    let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();
    assert_eq!(
        contents(&normalized.messages),
        vec!["Orphan question", "Still answered"]
    );
    assert_eq!(
        normalized.diagnostics,
        vec![Diagnostic::DanglingParent {
            node: "d1".to_string(),
            parent: "deleted-node".to_string(),
        }]
    );

    let err = normalize(&conversation, &NormalizeOptions::strict()).unwrap_err();
    assert!(matches!(err, NormalizeError::DanglingParent { .. }));
}

#[test]
fn normalize_all_over_fixture() {
    let conversations = parse_export(&load_fixture("conversations.json")).unwrap();

    let normalized = normalize_all(&conversations, &NormalizeOptions::default()).unwrap();

    let counts: Vec<usize> = normalized.iter().map(|c| c.messages.len()).collect();
    assert_eq!(counts, vec![5, 2, 2, 0, 2]);
    assert_eq!(normalized[0].title, "Trip planning");
    assert!(normalize_all(&conversations, &NormalizeOptions::strict()).is_err());
}

#[test]
fn renders_history_for_branching_conversation() {
    let conversation = fixture_conversation("conversations.json", "c-branch");
    let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();

    let history = render(&normalized.messages, &HistoryOptions::default());

    insta::assert_snapshot!(history, @r"
    System: I prefer short answers

    User: Plan a trip to Lisbon

    Assistant: Let me look that up.

    Assistant: Day 1: Alfama.
    Day 2: Belém.

    User: Thanks!
    ");
}
