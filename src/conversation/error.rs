//! Normalization errors and non-fatal diagnostics.

use serde::{Deserialize, Serialize};

/// How the extractor reacts to links that point at missing nodes or loop
/// back on themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Record a diagnostic and keep the portion of the path reached so far
    #[default]
    Truncate,
    /// Fail with a [`NormalizeError`]
    Strict,
}

/// Errors that can occur while loading or normalizing conversations.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    #[error("Node '{node}' references missing parent '{parent}'")]
    DanglingParent { node: String, parent: String },

    #[error("Node '{node}' references missing child '{child}'")]
    DanglingChild { node: String, child: String },

    #[error("Cycle detected at node '{node}'")]
    Cycle { node: String },

    #[error("Mapping has {nodes} node(s) but no root")]
    NoRoot { nodes: usize },

    #[error("Invalid export JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Non-fatal observation made while extracting the active path.
///
/// Diagnostics never change which messages are returned beyond what the
/// [`LinkPolicy`] prescribes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// `current_node` was missing (`None`) or not a key of the mapping
    FallbackTraversal { current_node: Option<String> },
    /// Non-empty mapping without any parentless node
    NoRoot,
    DanglingParent { node: String, parent: String },
    DanglingChild { node: String, child: String },
    Cycle { node: String },
}

impl Diagnostic {
    /// Whether this diagnostic reports broken tree structure, as opposed to
    /// a missing tip.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Diagnostic::FallbackTraversal { .. })
    }
}

/// Whether any of `diagnostics` reports a fallback traversal.
pub fn used_fallback(diagnostics: &[Diagnostic]) -> bool {
    diagnostics
        .iter()
        .any(|d| matches!(d, Diagnostic::FallbackTraversal { .. }))
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::FallbackTraversal { current_node: None } => {
                write!(f, "No current_node, using fallback root traversal")
            }
            Diagnostic::FallbackTraversal {
                current_node: Some(id),
            } => write!(
                f,
                "current_node '{}' not in mapping, using fallback root traversal",
                id
            ),
            Diagnostic::NoRoot => write!(f, "Mapping has no root node"),
            Diagnostic::DanglingParent { node, parent } => write!(
                f,
                "Node '{}' references missing parent '{}', path truncated",
                node, parent
            ),
            Diagnostic::DanglingChild { node, child } => write!(
                f,
                "Node '{}' references missing child '{}', path truncated",
                node, child
            ),
            Diagnostic::Cycle { node } => {
                write!(f, "Cycle detected at node '{}', path truncated", node)
            }
        }
    }
}
