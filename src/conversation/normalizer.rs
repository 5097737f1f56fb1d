//! Entry point: turn a [`Conversation`] into its ordered visible messages.

use std::borrow::Cow;

use serde::Serialize;

use super::error::{used_fallback, Diagnostic, LinkPolicy, NormalizeError};
use super::path::ActivePathExtractor;
use super::types::{Conversation, MessageRecord};

/// Options for [`normalize`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub link_policy: LinkPolicy,
}

impl NormalizeOptions {
    pub fn strict() -> Self {
        Self {
            link_policy: LinkPolicy::Strict,
        }
    }
}

/// How the messages of a [`Normalized`] result were obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// Pre-parsed `messages` list, returned as-is
    Passthrough,
    /// Active path through `mapping`
    Mapping,
    /// Neither representation present
    Empty,
}

/// Result of normalizing one conversation.
#[derive(Debug, Clone)]
pub struct Normalized<'a> {
    /// Borrowed from the input for passthrough, freshly built otherwise.
    pub messages: Cow<'a, [MessageRecord]>,
    pub diagnostics: Vec<Diagnostic>,
    pub source: Source,
}

impl<'a> Normalized<'a> {
    fn empty() -> Self {
        Self {
            messages: Cow::Owned(Vec::new()),
            diagnostics: Vec::new(),
            source: Source::Empty,
        }
    }

    pub fn used_fallback(&self) -> bool {
        used_fallback(&self.diagnostics)
    }
}

/// Normalize a conversation.
///
/// - A flat `messages` list without a `mapping` is returned unchanged.
/// - A `mapping` is walked for its active path (see [`ActivePathExtractor`]).
/// - With neither, the result is empty.
pub fn normalize<'a>(
    conversation: &'a Conversation,
    options: &NormalizeOptions,
) -> Result<Normalized<'a>, NormalizeError> {
    let _span = tracing::debug_span!(
        "normalize",
        conversation = conversation.id().unwrap_or("<no id>")
    )
    .entered();

    match (&conversation.mapping, &conversation.messages) {
        (None, Some(messages)) => {
            tracing::debug!(count = messages.len(), "pre-parsed messages, passing through");
            Ok(Normalized {
                messages: Cow::Borrowed(messages.as_slice()),
                diagnostics: Vec::new(),
                source: Source::Passthrough,
            })
        }
        (Some(mapping), _) => {
            let extractor = ActivePathExtractor::new(mapping, options.link_policy);
            let path = extractor.walk(conversation.current_node.as_deref())?;
            let messages = path.records();
            tracing::debug!(
                nodes = path.nodes.len(),
                visible = messages.len(),
                "extracted active path"
            );
            Ok(Normalized {
                messages: Cow::Owned(messages),
                diagnostics: path.diagnostics,
                source: Source::Mapping,
            })
        }
        (None, None) => Ok(Normalized::empty()),
    }
}

/// Normalize with default options, returning only the messages.
///
/// The default [`LinkPolicy::Truncate`] never fails; structural problems
/// are logged and the reachable part of the path is returned.
pub fn extract_active_path(conversation: &Conversation) -> Cow<'_, [MessageRecord]> {
    match normalize(conversation, &NormalizeOptions::default()) {
        Ok(normalized) => normalized.messages,
        Err(e) => {
            tracing::warn!("{}", e);
            Cow::Owned(Vec::new())
        }
    }
}
