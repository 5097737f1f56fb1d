//! Plain-text extraction from polymorphic message content.
//!
//! Exports carry message content in several shapes: a bare string, an
//! object with an ordered `parts` list, or an object with a direct `text`
//! field. [`Content`] captures each shape as its own variant and
//! [`extract_content`] reduces any of them to a single string.

use serde::Deserialize;
use serde_json::Value;

/// Message content, one variant per observed shape.
///
/// Deserialization never fails: anything unrecognized lands in
/// [`Content::Unknown`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Content {
    /// Bare string, kept verbatim
    Text(String),
    /// Ordered content parts (`{"parts": [...]}`)
    Parts(Vec<Part>),
    /// Direct text field (`{"text": "..."}`)
    TextField(String),
    /// Any other shape, e.g. `{}`
    Unknown,
}

/// A single entry of a `parts` list.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Part {
    /// Plain string part
    Text(String),
    /// Structured part; attachments and asset pointers have no text
    Object { text: Option<String> },
    /// Numbers, arrays, nulls
    Other,
}

impl From<Value> for Content {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Content::Text(text),
            Value::Object(mut map) => match map.remove("parts") {
                Some(Value::Array(parts)) => {
                    Content::Parts(parts.into_iter().map(Part::from).collect())
                }
                _ => match map.remove("text") {
                    Some(Value::String(text)) => Content::TextField(text),
                    _ => Content::Unknown,
                },
            },
            _ => Content::Unknown,
        }
    }
}

impl From<Value> for Part {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Part::Text(text),
            Value::Object(mut map) => {
                let text = match map.remove("text") {
                    Some(Value::String(text)) => Some(text),
                    _ => None,
                };
                Part::Object { text }
            }
            _ => Part::Other,
        }
    }
}

impl Part {
    /// Text contributed by this part, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text(text) => Some(text),
            Part::Object { text } => text.as_deref(),
            Part::Other => None,
        }
    }
}

impl Content {
    /// Reduce the content to plain text.
    ///
    /// Bare strings are returned untouched; text derived from `parts` or a
    /// `text` field is trimmed.
    pub fn to_text(&self) -> String {
        match self {
            Content::Text(text) => text.clone(),
            Content::Parts(parts) => parts
                .iter()
                .filter_map(Part::text)
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string(),
            Content::TextField(text) => text.trim().to_string(),
            Content::Unknown => String::new(),
        }
    }
}

/// Extract plain text from optional content. Absent content yields `""`.
pub fn extract_content(content: Option<&Content>) -> String {
    content.map(Content::to_text).unwrap_or_default()
}
