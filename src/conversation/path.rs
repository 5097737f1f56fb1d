//! Active-path extraction from a branching conversation tree.
//!
//! With a known tip (`current_node`) the path is found by walking parent
//! links up to the root and reversing. Without one, the extractor starts at
//! a root and follows the most recent (last) child down to a leaf. The
//! last-child rule mirrors how exports append edits and regenerations; it is
//! a best-effort approximation, not a guarantee.

use std::collections::HashSet;

use super::content::extract_content;
use super::error::{used_fallback, Diagnostic, LinkPolicy, NormalizeError};
use super::graph::{ConversationGraph, Step};
use super::types::{Mapping, Message, MessageRecord, Node};
use super::visibility::is_visible;

/// Nodes on the active path, root first, plus anything noticed on the way.
#[derive(Debug, Clone, Default)]
pub struct ActivePath<'a> {
    pub nodes: Vec<(&'a str, &'a Node)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> ActivePath<'a> {
    /// Node ids on the path, root first. Includes nodes without messages.
    pub fn ids(&self) -> Vec<&'a str> {
        self.nodes.iter().map(|(id, _)| *id).collect()
    }

    /// Whether the fallback traversal was used.
    pub fn used_fallback(&self) -> bool {
        used_fallback(&self.diagnostics)
    }

    /// Visible messages on the path as normalized records.
    pub fn records(&self) -> Vec<MessageRecord> {
        self.nodes
            .iter()
            .filter_map(|(_, node)| node.message.as_ref())
            .filter(|message| is_visible(message))
            .map(to_record)
            .collect()
    }
}

fn to_record(message: &Message) -> MessageRecord {
    MessageRecord::new(
        message.role().map(|role| role.to_string()).unwrap_or_default(),
        extract_content(message.content.as_ref()),
        message.create_time,
    )
}

/// Walks a [`Mapping`] to find the active path.
#[derive(Debug, Clone, Copy)]
pub struct ActivePathExtractor<'a> {
    graph: ConversationGraph<'a>,
    policy: LinkPolicy,
}

impl<'a> ActivePathExtractor<'a> {
    pub fn new(mapping: &'a Mapping, policy: LinkPolicy) -> Self {
        Self {
            graph: ConversationGraph::new(mapping),
            policy,
        }
    }

    /// Find the active path ending at `current_node`.
    ///
    /// A missing or unknown `current_node` triggers the fallback traversal
    /// and a [`Diagnostic::FallbackTraversal`]. Broken links are handled per
    /// the extractor's [`LinkPolicy`].
    pub fn walk(&self, current_node: Option<&str>) -> Result<ActivePath<'a>, NormalizeError> {
        let mut path = ActivePath::default();
        if self.graph.is_empty() {
            return Ok(path);
        }

        path.nodes = match current_node.and_then(|id| self.graph.get(id)) {
            Some((id, tip)) => self.walk_up(id, tip, &mut path.diagnostics)?,
            None => {
                self.report(
                    Diagnostic::FallbackTraversal {
                        current_node: current_node.map(str::to_string),
                    },
                    &mut path.diagnostics,
                )?;
                match self.graph.first_root() {
                    Some((id, root)) => self.walk_down(id, root, &mut path.diagnostics)?,
                    None => {
                        self.report(Diagnostic::NoRoot, &mut path.diagnostics)?;
                        Vec::new()
                    }
                }
            }
        };

        Ok(path)
    }

    /// Walk and convert in one go.
    pub fn extract(
        &self,
        current_node: Option<&str>,
    ) -> Result<(Vec<MessageRecord>, Vec<Diagnostic>), NormalizeError> {
        let path = self.walk(current_node)?;
        Ok((path.records(), path.diagnostics))
    }

    /// Tip to root via parent links, returned root first.
    fn walk_up(
        &self,
        tip_id: &'a str,
        tip: &'a Node,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<(&'a str, &'a Node)>, NormalizeError> {
        let mut nodes = vec![(tip_id, tip)];
        let mut visited = HashSet::from([tip_id]);
        let (mut current_id, mut current) = (tip_id, tip);

        loop {
            match self.graph.parent(current) {
                Step::End => break,
                Step::Next(id, node) => {
                    if !visited.insert(id) {
                        self.report(Diagnostic::Cycle { node: id.to_string() }, diagnostics)?;
                        break;
                    }
                    nodes.push((id, node));
                    (current_id, current) = (id, node);
                }
                Step::Dangling(parent) => {
                    self.report(
                        Diagnostic::DanglingParent {
                            node: current_id.to_string(),
                            parent: parent.to_string(),
                        },
                        diagnostics,
                    )?;
                    break;
                }
            }
        }

        nodes.reverse();
        Ok(nodes)
    }

    /// Root to leaf following the last child at each step.
    fn walk_down(
        &self,
        root_id: &'a str,
        root: &'a Node,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<Vec<(&'a str, &'a Node)>, NormalizeError> {
        let mut nodes = vec![(root_id, root)];
        let mut visited = HashSet::from([root_id]);
        let (mut current_id, mut current) = (root_id, root);

        loop {
            match self.graph.last_child(current) {
                Step::End => break,
                Step::Next(id, node) => {
                    if !visited.insert(id) {
                        self.report(Diagnostic::Cycle { node: id.to_string() }, diagnostics)?;
                        break;
                    }
                    nodes.push((id, node));
                    (current_id, current) = (id, node);
                }
                Step::Dangling(child) => {
                    self.report(
                        Diagnostic::DanglingChild {
                            node: current_id.to_string(),
                            child: child.to_string(),
                        },
                        diagnostics,
                    )?;
                    break;
                }
            }
        }

        Ok(nodes)
    }

    /// Log and record a diagnostic, or fail if the policy is strict and the
    /// diagnostic is structural.
    fn report(
        &self,
        diagnostic: Diagnostic,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<(), NormalizeError> {
        if self.policy == LinkPolicy::Strict {
            if let Some(error) = self.strict_error(&diagnostic) {
                return Err(error);
            }
        }

        tracing::warn!("{}", diagnostic);
        diagnostics.push(diagnostic);
        Ok(())
    }

    fn strict_error(&self, diagnostic: &Diagnostic) -> Option<NormalizeError> {
        match diagnostic {
            Diagnostic::FallbackTraversal { .. } => None,
            Diagnostic::NoRoot => Some(NormalizeError::NoRoot {
                nodes: self.graph.len(),
            }),
            Diagnostic::DanglingParent { node, parent } => Some(NormalizeError::DanglingParent {
                node: node.clone(),
                parent: parent.clone(),
            }),
            Diagnostic::DanglingChild { node, child } => Some(NormalizeError::DanglingChild {
                node: node.clone(),
                child: child.clone(),
            }),
            Diagnostic::Cycle { node } => Some(NormalizeError::Cycle { node: node.clone() }),
        }
    }
}
