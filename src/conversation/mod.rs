//! Conversation-tree normalization.
//!
//! Chat exports store each conversation as a tree of nodes: every edit or
//! regeneration starts a new branch, and tool calls and system scaffolding
//! live alongside the visible messages. This module reduces such a tree to
//! the single ordered list of messages the user actually saw.
//!
//! # Module Structure
//!
//! - [`types`] - Export data model and the normalized [`MessageRecord`]
//! - [`content`] - Plain-text extraction from polymorphic content
//! - [`visibility`] - Which messages belong in the transcript
//! - [`graph`] - Id-indexed view over the node mapping
//! - [`path`] - Active-path traversal with fallback and link policies
//! - `normalizer` - Entry point, passthrough detection
//!
//! # Usage
//!
//! ```
//! use threadline::conversation::{normalize, Conversation, NormalizeOptions};
//!
//! let conversation: Conversation = serde_json::from_str(r#"{
//!     "current_node": "b",
//!     "mapping": {
//!         "a": {"parent": null, "children": ["b"],
//!               "message": {"author": {"role": "user"}, "content": {"parts": ["Hi"]}}},
//!         "b": {"parent": "a", "children": [],
//!               "message": {"author": {"role": "assistant"}, "content": {"parts": ["Hello!"]}}}
//!     }
//! }"#).unwrap();
//!
//! let normalized = normalize(&conversation, &NormalizeOptions::default()).unwrap();
//! assert_eq!(normalized.messages.len(), 2);
//! assert_eq!(normalized.messages[1].content, "Hello!");
//! ```

pub mod content;
mod error;
pub mod graph;
mod normalizer;
pub mod path;
pub mod types;
pub mod visibility;

pub use content::{extract_content, Content, Part};
pub use error::{used_fallback, Diagnostic, LinkPolicy, NormalizeError};
pub use graph::ConversationGraph;
pub use normalizer::{extract_active_path, normalize, NormalizeOptions, Normalized, Source};
pub use path::{ActivePath, ActivePathExtractor};
pub use types::{Author, Conversation, Mapping, Message, MessageRecord, Node, Role};
pub use visibility::is_visible;
