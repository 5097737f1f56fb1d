//! Loading whole export files and normalizing every conversation in them.
//!
//! An export is either a single conversation object or a JSON array of
//! conversations (`conversations.json`). Conversations are independent, so
//! batches are normalized in parallel.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::Value;

use crate::conversation::{
    normalize, used_fallback, Conversation, Diagnostic, MessageRecord, NormalizeError,
    NormalizeOptions, Source,
};

/// A normalized conversation detached from its input.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedConversation {
    pub id: Option<String>,
    pub title: String,
    pub source: Source,
    pub messages: Vec<MessageRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Diagnostic>,
}

impl NormalizedConversation {
    pub fn used_fallback(&self) -> bool {
        used_fallback(&self.warnings)
    }
}

/// Parse export JSON: one conversation object or an array of them.
///
/// Array entries are read one at a time; an entry that does not describe a
/// conversation is logged and skipped without affecting the others.
pub fn parse_export(json: &str) -> Result<Vec<Conversation>, NormalizeError> {
    match serde_json::from_str::<Value>(json)? {
        Value::Array(entries) => Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(conversation) => Some(conversation),
                Err(e) => {
                    tracing::warn!(index, "skipping unreadable conversation: {}", e);
                    None
                }
            })
            .collect()),
        single => Ok(vec![serde_json::from_value(single)?]),
    }
}

/// Read and parse an export file.
pub fn load_export(path: &Path) -> Result<Vec<Conversation>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read export file: {}", path.display()))?;
    let conversations =
        parse_export(&json).with_context(|| format!("Failed to parse {}", path.display()))?;
    tracing::debug!(
        count = conversations.len(),
        path = %path.display(),
        "loaded export"
    );
    Ok(conversations)
}

/// Take the conversation with the given `id` or `conversation_id`.
pub fn take_conversation(conversations: Vec<Conversation>, id: &str) -> Option<Conversation> {
    conversations.into_iter().find(|c| c.id() == Some(id))
}

/// Normalize one conversation into an owned result.
pub fn normalize_one(
    conversation: &Conversation,
    options: &NormalizeOptions,
) -> Result<NormalizedConversation, NormalizeError> {
    let normalized = normalize(conversation, options)?;
    Ok(NormalizedConversation {
        id: conversation.id().map(str::to_string),
        title: conversation.title().to_string(),
        source: normalized.source,
        messages: normalized.messages.into_owned(),
        warnings: normalized.diagnostics,
    })
}

/// Normalize every conversation, in parallel, preserving input order.
///
/// Under a strict link policy the first failing conversation aborts the batch.
pub fn normalize_all(
    conversations: &[Conversation],
    options: &NormalizeOptions,
) -> Result<Vec<NormalizedConversation>, NormalizeError> {
    conversations
        .par_iter()
        .map(|conversation| normalize_one(conversation, options))
        .collect()
}
