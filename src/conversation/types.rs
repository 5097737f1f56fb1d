//! Data structures for conversation exports and normalized output.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use super::content::{extract_content, Content};

/// Node mapping keyed by node id.
///
/// A `BTreeMap` keeps iteration order deterministic, which the fallback
/// traversal relies on when choosing between several root nodes.
pub type Mapping = BTreeMap<String, Node>;

/// A conversation as it appears in an export.
///
/// Exactly one of `mapping` (branching tree) or `messages` (pre-parsed flat
/// list) is expected. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub create_time: Option<f64>,
    #[serde(default)]
    pub update_time: Option<f64>,
    /// Tip of the branch that was active when the conversation was exported.
    #[serde(default)]
    pub current_node: Option<String>,
    #[serde(default)]
    pub mapping: Option<Mapping>,
    #[serde(default)]
    pub messages: Option<Vec<MessageRecord>>,
}

impl Conversation {
    /// Conversation id, preferring `id` over `conversation_id`.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().or(self.conversation_id.as_deref())
    }

    /// Title, or an empty string when the export has none.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

/// A node in the conversation tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Node {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub parent: Option<String>,
    /// Child ids in creation order; the last one is the most recent edit.
    #[serde(default, deserialize_with = "null_as_default")]
    pub children: Vec<String>,
    /// Absent on root and scaffolding nodes.
    #[serde(default)]
    pub message: Option<Message>,
}

impl Node {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A message attached to a node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, deserialize_with = "number_or_none")]
    pub create_time: Option<f64>,
    /// Anything other than an object reads as empty.
    #[serde(default, deserialize_with = "object_or_empty")]
    pub metadata: Map<String, Value>,
}

impl Message {
    /// The author role, if the message carries one.
    pub fn role(&self) -> Option<Role> {
        self.author
            .as_ref()
            .and_then(|author| author.role.as_deref())
            .map(Role::from)
    }
}

/// Message author block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "string_or_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Author role of a message.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Assistant,
    System,
    Tool,
    /// Any role string not listed above (e.g. `browsing`)
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
            Role::Tool => "tool",
            Role::Other(role) => role,
        }
    }
}

impl From<&str> for Role {
    fn from(role: &str) -> Self {
        match role {
            "user" => Role::User,
            "assistant" => Role::Assistant,
            "system" => Role::System,
            "tool" => Role::Tool,
            other => Role::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized message: the unit of output.
///
/// Also the element type of the pre-parsed `messages` format. Fields other
/// than `role`, `content` and `create_time` are kept in `extra` so that
/// passthrough output matches its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub role: String,
    /// `null` reads as empty; non-string shapes are reduced to their text.
    #[serde(default, deserialize_with = "content_as_text")]
    pub content: String,
    /// Kept as a JSON number so integer timestamps are written back as integers.
    #[serde(default)]
    pub create_time: Option<Number>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl MessageRecord {
    pub fn new(role: impl Into<String>, content: impl Into<String>, create_time: Option<f64>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
            create_time: create_time.and_then(Number::from_f64),
            extra: Map::new(),
        }
    }

    /// `create_time` as seconds since the epoch.
    pub fn timestamp(&self) -> Option<f64> {
        self.create_time.as_ref().and_then(Number::as_f64)
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn object_or_empty<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn number_or_none<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn content_as_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(text) => Ok(text),
        other => Ok(extract_content(Some(&Content::from(other)))),
    }
}
