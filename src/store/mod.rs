//! Branch storage
//!
//! Branches that are not held inline by a parent live in a store keyed by the
//! path that leads to them. A snapshot writes a whole in-memory trie to a
//! single file, compressed with zstd.

mod memory;
mod snapshot;

pub use memory::{BranchStore, MemoryStore};
