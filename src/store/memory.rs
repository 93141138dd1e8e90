//! Path-keyed branch storage

use crate::trie::Branch;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where branches live when they are not held inline by a parent.
///
/// Entries are keyed by the byte path consumed from the root to reach the
/// branch. Writes overwrite; there is no versioning. A trie assumes it is the
/// only user of its store while an insertion runs.
pub trait BranchStore {
    /// Borrow the branch stored at `path`
    fn get(&self, path: &[u8]) -> Option<&Branch>;

    /// Remove the branch at `path` and hand ownership to the caller.
    ///
    /// A caller that takes a branch is expected to `put` it back once it is
    /// done mutating it.
    fn take(&mut self, path: &[u8]) -> Option<Branch>;

    /// Store `branch` at `path`, replacing any previous entry
    fn put(&mut self, path: Vec<u8>, branch: Branch);

    fn contains(&self, path: &[u8]) -> bool {
        self.get(path).is_some()
    }

    /// Number of stored branches
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored path keys
    fn paths(&self) -> Vec<Vec<u8>>;
}

/// In-memory [`BranchStore`] ordered by path key
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MemoryStore {
    branches: BTreeMap<Vec<u8>, Branch>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Iterate over `(path, branch)` pairs in path order
    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &Branch)> {
        self.branches.iter().map(|(path, branch)| (path.as_slice(), branch))
    }
}

impl BranchStore for MemoryStore {
    fn get(&self, path: &[u8]) -> Option<&Branch> {
        self.branches.get(path)
    }

    fn take(&mut self, path: &[u8]) -> Option<Branch> {
        self.branches.remove(path)
    }

    fn put(&mut self, path: Vec<u8>, branch: Branch) {
        self.branches.insert(path, branch);
    }

    fn len(&self) -> usize {
        self.branches.len()
    }

    fn paths(&self) -> Vec<Vec<u8>> {
        self.branches.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_overwrites() {
        let mut store = MemoryStore::new();
        store.put(b"er".to_vec(), Branch::new(257, b"a".to_vec()));
        store.put(b"er".to_vec(), Branch::new(257, b"b".to_vec()));

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(b"er").unwrap().edge_label(), b"b");
    }

    #[test]
    fn test_take_transfers_ownership() {
        let mut store = MemoryStore::new();
        store.put(b"m".to_vec(), Branch::new(257, b"osh".to_vec()));

        let branch = store.take(b"m").unwrap();
        assert_eq!(branch.edge_label(), b"osh");
        assert!(!store.contains(b"m"));
        assert!(store.take(b"m").is_none());

        store.put(b"m".to_vec(), branch);
        assert!(store.contains(b"m"));
    }

    #[test]
    fn test_paths_are_ordered() {
        let mut store = MemoryStore::new();
        store.put(b"m".to_vec(), Branch::new(257, Vec::new()));
        store.put(Vec::new(), Branch::new(257, Vec::new()));
        store.put(b"e".to_vec(), Branch::new(257, Vec::new()));

        assert_eq!(store.paths(), vec![Vec::new(), b"e".to_vec(), b"m".to_vec()]);
    }
}
