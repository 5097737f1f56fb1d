//! Id-indexed view over a conversation's node mapping.
//!
//! Links are plain ids resolved by map lookup; nothing holds a reference
//! to another node.

use super::types::{Mapping, Node};

/// Outcome of following a single link.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step<'a> {
    /// The link leads to an existing node
    Next(&'a str, &'a Node),
    /// There is no link (root reached going up, leaf reached going down)
    End,
    /// The link names an id that is not in the mapping
    Dangling(&'a str),
}

/// Read-only graph over a [`Mapping`].
#[derive(Debug, Clone, Copy)]
pub struct ConversationGraph<'a> {
    nodes: &'a Mapping,
}

impl<'a> ConversationGraph<'a> {
    pub fn new(nodes: &'a Mapping) -> Self {
        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Look up a node, returning the id as stored in the mapping.
    pub fn get(&self, id: &str) -> Option<(&'a str, &'a Node)> {
        self.nodes
            .get_key_value(id)
            .map(|(key, node)| (key.as_str(), node))
    }

    /// Nodes without a parent, in key order.
    pub fn roots(&self) -> impl Iterator<Item = (&'a str, &'a Node)> + 'a {
        self.nodes
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(id, node)| (id.as_str(), node))
    }

    /// First root in key order.
    pub fn first_root(&self) -> Option<(&'a str, &'a Node)> {
        self.roots().next()
    }

    /// Follow the `parent` link of `node`.
    pub fn parent(&self, node: &'a Node) -> Step<'a> {
        match node.parent.as_deref() {
            None => Step::End,
            Some(id) => self.resolve(id),
        }
    }

    /// Follow the link to the most recent child of `node`.
    pub fn last_child(&self, node: &'a Node) -> Step<'a> {
        match node.children.last() {
            None => Step::End,
            Some(id) => self.resolve(id),
        }
    }

    fn resolve(&self, id: &'a str) -> Step<'a> {
        match self.get(id) {
            Some((id, node)) => Step::Next(id, node),
            None => Step::Dangling(id),
        }
    }
}
