//! Trie node types

use crate::model::Hash;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a [`Node`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Branch,
    Placeholder,
    Record,
}

/// A node in the trie
///
/// Every node carries an edge label: the compressed run of key bytes between
/// it and its parent, not counting the branching byte that selects it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Node {
    /// An empty slot
    #[default]
    Null,
    /// An internal node held inline
    Branch(Branch),
    /// Stands in for a branch that lives in the store
    Placeholder(BranchPlaceholder),
    /// One stored key/value mapping
    Record(RecordLeaf),
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Null => NodeKind::Null,
            Node::Branch(_) => NodeKind::Branch,
            Node::Placeholder(_) => NodeKind::Placeholder,
            Node::Record(_) => NodeKind::Record,
        }
    }

    /// Check if this slot is empty
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// The node's digest, if it has one.
    ///
    /// Only records are fingerprinted. Branch digests are never computed, and
    /// the digest of an empty slot is a property of the trie configuration.
    pub fn digest(&self) -> Option<&Hash> {
        match self {
            Node::Record(leaf) => Some(leaf.digest()),
            Node::Null | Node::Branch(_) | Node::Placeholder(_) => None,
        }
    }

    pub fn edge_label(&self) -> &[u8] {
        match self {
            Node::Null => &[],
            Node::Branch(branch) => branch.edge_label(),
            Node::Placeholder(placeholder) => placeholder.edge_label(),
            Node::Record(leaf) => leaf.edge_label(),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Null => write!(f, "Null"),
            Node::Branch(branch) => branch.fmt(f),
            Node::Placeholder(placeholder) => placeholder.fmt(f),
            Node::Record(leaf) => leaf.fmt(f),
        }
    }
}

/// An internal node with one slot per possible next byte and a termination
/// slot (always the last) for keys that end at this node's edge boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    edge_label: Vec<u8>,
    children: Vec<Node>,
}

impl Branch {
    /// Create a branch with `branching_factor` empty slots.
    ///
    /// The factor is checked by [`TrieConfig::validate`](crate::TrieConfig::validate).
    pub fn new(branching_factor: usize, edge_label: Vec<u8>) -> Self {
        Branch {
            edge_label,
            children: vec![Node::Null; branching_factor],
        }
    }

    pub fn edge_label(&self) -> &[u8] {
        &self.edge_label
    }

    pub fn set_edge_label(&mut self, edge_label: Vec<u8>) {
        self.edge_label = edge_label;
    }

    /// Number of slots, termination slot included
    pub fn branching_factor(&self) -> usize {
        self.children.len()
    }

    /// Check that this branch and every branch held inline below it have
    /// exactly `slots` slots
    pub fn fan_out_matches(&self, slots: usize) -> bool {
        self.children.len() == slots
            && self.children.iter().all(|child| match child {
                Node::Branch(inner) => inner.fan_out_matches(slots),
                _ => true,
            })
    }

    /// Slot selected by `byte`
    pub fn child_at(&mut self, byte: u8) -> Result<&mut Node> {
        let slots = self.children.len();
        let index = usize::from(byte);
        if index >= slots - 1 {
            return Err(Error::SlotOutOfRange { byte, slots });
        }
        Ok(&mut self.children[index])
    }

    /// Read-only access to the slot selected by `byte`
    pub fn child(&self, byte: u8) -> Option<&Node> {
        let index = usize::from(byte);
        if index + 1 >= self.children.len() {
            return None;
        }
        self.children.get(index)
    }

    /// Slot for a key ending exactly at this branch
    pub fn termination_slot(&mut self) -> &mut Node {
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn termination(&self) -> &Node {
        &self.children[self.children.len() - 1]
    }

    /// Occupied byte-indexed slots in ascending byte order
    pub fn children(&self) -> impl Iterator<Item = (u8, &Node)> {
        let byte_slots = self.children.len() - 1;
        self.children[..byte_slots]
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_null())
            .map(|(index, node)| (index as u8, node))
    }

    /// Check if no slot is occupied
    pub fn is_empty(&self) -> bool {
        self.children.iter().all(Node::is_null)
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Branch edge [{}] children {}",
            self.edge_label.escape_ascii(),
            self.children.iter().filter(|node| !node.is_null()).count()
        )
    }
}

/// Forwarding reference to a branch held by the store under the path that
/// leads to this slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchPlaceholder {
    edge_label: Vec<u8>,
    dirty: bool,
}

impl BranchPlaceholder {
    pub fn new(edge_label: Vec<u8>, dirty: bool) -> Self {
        BranchPlaceholder { edge_label, dirty }
    }

    /// A placeholder for a subtree modified since it was last finalized
    pub fn dirty(edge_label: Vec<u8>) -> Self {
        BranchPlaceholder::new(edge_label, true)
    }

    pub fn edge_label(&self) -> &[u8] {
        &self.edge_label
    }

    pub fn set_edge_label(&mut self, edge_label: Vec<u8>) {
        self.edge_label = edge_label;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Flag the referenced subtree as structurally touched
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

impl fmt::Display for BranchPlaceholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Placeholder edge [{}] dirty {}",
            self.edge_label.escape_ascii(),
            self.dirty
        )
    }
}

/// Terminal node holding the digest of one key/value pair
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordLeaf {
    edge_label: Vec<u8>,
    digest: Hash,
}

impl RecordLeaf {
    /// Fingerprint `(key, value)`; the edge label starts out empty
    pub fn new(key: &[u8], value: &[u8]) -> Self {
        RecordLeaf {
            edge_label: Vec::new(),
            digest: Hash::record(key, value),
        }
    }

    /// Builder-style edge label
    pub fn with_edge_label(mut self, edge_label: Vec<u8>) -> Self {
        self.edge_label = edge_label;
        self
    }

    /// A copy of this record under a different edge label
    pub fn relabeled(&self, edge_label: Vec<u8>) -> Self {
        RecordLeaf {
            edge_label,
            digest: self.digest,
        }
    }

    pub fn digest(&self) -> &Hash {
        &self.digest
    }

    pub fn edge_label(&self) -> &[u8] {
        &self.edge_label
    }
}

impl fmt::Display for RecordLeaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Record edge [{}] hash {}",
            self.edge_label.escape_ascii(),
            self.digest.short()
        )
    }
}
