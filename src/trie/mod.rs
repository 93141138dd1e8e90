//! Patricia Merkle trie
//!
//! A compressed radix trie where:
//! - Each edge carries the run of key bytes it compresses
//! - Each record leaf holds the digest of one key/value pair
//! - Subtrees are parked in a path-keyed store behind placeholders and
//!   swapped back in when an insertion walks through them

mod key;
mod node;
mod tree;

#[cfg(test)]
mod proptests;

pub use key::{Comparison, KeyCursor, Relation};
pub use node::{Branch, BranchPlaceholder, Node, NodeKind, RecordLeaf};
pub use tree::PatriciaTrie;
