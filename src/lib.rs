//! # pmtrie
//!
//! A path-compressed Merkle radix trie mapping byte-string keys to the
//! content hashes of their values.
//!
//! ## Core Concepts
//!
//! - **Edge labels**: each node holds the run of key bytes between it and
//!   its parent, so chains of single-child nodes never exist
//! - **Records**: leaves store `Hash(len(key) ++ key ++ value)`, never the value
//! - **Placeholders**: subtrees live in a path-keyed store and are swapped in
//!   when an insertion walks through them
//!
//! ## Example
//!
//! ```
//! use pmtrie::{PatriciaTrie, TrieConfig};
//!
//! let mut trie = PatriciaTrie::new(TrieConfig::default())?;
//! trie.insert(b"moshe", b"lerer")?;
//! trie.insert(b"mosho", b"lerer")?;
//! assert_eq!(trie.records()?.len(), 2);
//! # Ok::<(), pmtrie::Error>(())
//! ```

pub mod config;
pub mod model;
pub mod store;
pub mod trie;

mod error;

pub use config::TrieConfig;
pub use error::{Error, Result};
pub use model::Hash;
pub use store::{BranchStore, MemoryStore};
pub use trie::{
    Branch, BranchPlaceholder, Comparison, KeyCursor, Node, NodeKind, PatriciaTrie, RecordLeaf,
    Relation,
};

/// Snapshot format version
pub const VERSION: u32 = 1;

/// Magic bytes for snapshot identification
pub const MAGIC: &[u8; 8] = b"PMTRIE01";
