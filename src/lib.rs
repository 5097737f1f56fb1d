//! Threadline - extract the active message path from chat conversation exports
//!
//! Chat-assistant exports store conversations as branching trees: edits and
//! regenerations leave abandoned branches, and tool calls and system
//! scaffolding sit between the messages a user actually saw. Threadline
//! walks such a tree and produces the linear, chronological list of visible
//! messages, optionally rendered as a plain-text history.

pub mod cli;
pub mod config;
pub mod conversation;
pub mod export;
pub mod history;

pub use config::Config;
pub use conversation::{
    extract_active_path, extract_content, is_visible, normalize, Conversation, Diagnostic,
    LinkPolicy, MessageRecord, NormalizeError, NormalizeOptions, Normalized,
};
pub use export::{load_export, normalize_all, parse_export, NormalizedConversation};
pub use history::HistoryOptions;
