//! Patricia Merkle trie with lazily materialized subtrees
//!
//! The root branch always lives in the store under the configured root path
//! key. Below it, whole branches are parked in the store under the path that
//! leads to them and are represented in their parent slot by a
//! [`BranchPlaceholder`]. An insertion swaps each branch it needs out of the
//! store, mutates it, and puts it back before returning.

use super::key::{KeyCursor, Relation};
use super::node::{Branch, BranchPlaceholder, Node, RecordLeaf};
use crate::config::TrieConfig;
use crate::error::display_path;
use crate::model::Hash;
use crate::store::{BranchStore, MemoryStore};
use crate::{Error, Result};
use tracing::{debug, trace};

/// A radix trie mapping byte-string keys to record digests
pub struct PatriciaTrie<S = MemoryStore> {
    config: TrieConfig,
    store: S,
}

impl PatriciaTrie<MemoryStore> {
    /// Create an empty trie backed by an in-memory store
    pub fn new(config: TrieConfig) -> Result<Self> {
        PatriciaTrie::with_store(config, MemoryStore::new())
    }
}

impl<S: BranchStore> PatriciaTrie<S> {
    /// Create a trie over `store`, seeding an empty root branch if the store
    /// has none yet
    pub fn with_store(config: TrieConfig, mut store: S) -> Result<Self> {
        config.validate()?;
        if !store.contains(&config.root_path_key) {
            store.put(
                config.root_path_key.clone(),
                Branch::new(config.branching_factor, Vec::new()),
            );
        }
        Ok(PatriciaTrie { config, store })
    }

    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The root branch
    pub fn root(&self) -> Result<&Branch> {
        self.store
            .get(&self.config.root_path_key)
            .ok_or_else(|| Error::MissingBranch(display_path(&self.config.root_path_key)))
    }

    /// Digest of a node as seen by this trie (empty slots report the
    /// configured null digest; branches and placeholders have none)
    pub fn digest_of(&self, node: &Node) -> Option<Hash> {
        match node {
            Node::Null => Some(self.config.null_digest),
            other => other.digest().copied(),
        }
    }

    /// Insert or overwrite the record for `key`
    pub fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut cursor = KeyCursor::new(key);
        debug!(key = %key.escape_ascii(), "insert");

        let root_key = self.config.root_path_key.clone();
        let mut root = self
            .store
            .take(&root_key)
            .ok_or_else(|| Error::MissingBranch(display_path(&root_key)))?;
        let result = self.insert_into(&mut cursor, value, &mut root);
        self.store.put(root_key, root);
        result
    }

    fn insert_into(
        &mut self,
        cursor: &mut KeyCursor<'_>,
        value: &[u8],
        branch: &mut Branch,
    ) -> Result<()> {
        trace!(
            path = %cursor.key_so_far().escape_ascii(),
            remaining = %cursor.remaining().escape_ascii(),
            edge = %branch.edge_label().escape_ascii(),
            "visit branch"
        );

        let comparison = cursor.compare(branch.edge_label());
        match comparison.relation {
            Relation::Equal => {
                debug!("key ends at branch edge, writing termination slot");
                *branch.termination_slot() = Node::Record(RecordLeaf::new(cursor.key(), value));
                Ok(())
            }
            Relation::KeyExhausted | Relation::Diverge => {
                self.split_above(cursor, value, branch, comparison.matched)
            }
            Relation::EdgeExhausted => self.descend(cursor, value, branch, comparison.matched),
        }
    }

    /// The remaining key leaves `branch`'s edge label after `matched` bytes.
    ///
    /// A new branch labelled with the common prefix takes `branch`'s place.
    /// The old branch keeps the rest of its label past the divergent byte and
    /// moves to the store, referenced from the new branch by a placeholder.
    fn split_above(
        &mut self,
        cursor: &KeyCursor<'_>,
        value: &[u8],
        branch: &mut Branch,
        matched: usize,
    ) -> Result<()> {
        let edge = branch.edge_label();
        let common = edge[..matched].to_vec();
        let divergent = edge[matched];
        let truncated = edge[matched + 1..].to_vec();

        let mut parent = Branch::new(self.config.branching_factor, common.clone());
        let record = RecordLeaf::new(cursor.key(), value);
        let rest = cursor.remaining();
        if rest.len() == matched {
            *parent.termination_slot() = Node::Record(record);
        } else {
            *parent.child_at(rest[matched])? =
                Node::Record(record.with_edge_label(rest[matched + 1..].to_vec()));
        }
        *parent.child_at(divergent)? =
            Node::Placeholder(BranchPlaceholder::dirty(truncated.clone()));

        let mut path = cursor.key_so_far().to_vec();
        path.extend_from_slice(&common);
        path.push(divergent);
        self.check_subtree_path(&path)?;

        let mut demoted = std::mem::replace(branch, parent);
        demoted.set_edge_label(truncated);
        debug!(
            edge = %common.escape_ascii(),
            demoted_to = %path.escape_ascii(),
            "split above branch"
        );
        self.store.put(path, demoted);
        Ok(())
    }

    /// The branch's edge label is a strict prefix of the remaining key, so
    /// the key continues into one of the byte-indexed slots.
    fn descend(
        &mut self,
        cursor: &mut KeyCursor<'_>,
        value: &[u8],
        branch: &mut Branch,
        matched: usize,
    ) -> Result<()> {
        cursor.advance(matched);
        let byte = cursor.next().ok_or(Error::CursorExhausted)?;
        let slot = branch.child_at(byte)?;

        let replacement = match slot {
            Node::Null => {
                trace!(byte, "empty slot, attaching record");
                Node::Record(
                    RecordLeaf::new(cursor.key(), value)
                        .with_edge_label(cursor.remaining().to_vec()),
                )
            }
            Node::Placeholder(placeholder) => {
                placeholder.mark_dirty();
                let path = cursor.key_so_far().to_vec();
                self.check_subtree_path(&path)?;
                let mut child = self
                    .store
                    .take(&path)
                    .ok_or_else(|| Error::MissingBranch(display_path(&path)))?;
                trace!(path = %path.escape_ascii(), "loaded branch from store");

                let result = self.insert_into(cursor, value, &mut child);
                placeholder.set_edge_label(child.edge_label().to_vec());
                self.store.put(path, child);
                return result;
            }
            Node::Branch(child) => return self.insert_into(cursor, value, child),
            Node::Record(existing) => {
                let comparison = cursor.compare(existing.edge_label());
                if comparison.relation == Relation::Equal {
                    debug!("record exists, overwriting");
                    Node::Record(
                        RecordLeaf::new(cursor.key(), value)
                            .with_edge_label(existing.edge_label().to_vec()),
                    )
                } else {
                    self.split_below(cursor, value, existing, comparison.matched)?
                }
            }
        };

        *slot = replacement;
        Ok(())
    }

    /// Two records share a slot for the first `matched` bytes of their
    /// labels. A new branch labelled with that prefix is stored at the
    /// current path and both records hang off it. Returns the placeholder
    /// that takes the existing record's slot.
    fn split_below(
        &mut self,
        cursor: &KeyCursor<'_>,
        value: &[u8],
        existing: &RecordLeaf,
        matched: usize,
    ) -> Result<Node> {
        let common = existing.edge_label()[..matched].to_vec();
        let mut fork = Branch::new(self.config.branching_factor, common.clone());

        let old_rest = &existing.edge_label()[matched..];
        match old_rest.split_first() {
            None => *fork.termination_slot() = Node::Record(existing.relabeled(Vec::new())),
            Some((&byte, label)) => {
                *fork.child_at(byte)? = Node::Record(existing.relabeled(label.to_vec()))
            }
        }

        let record = RecordLeaf::new(cursor.key(), value);
        let new_rest = &cursor.remaining()[matched..];
        match new_rest.split_first() {
            None => *fork.termination_slot() = Node::Record(record),
            Some((&byte, label)) => {
                *fork.child_at(byte)? = Node::Record(record.with_edge_label(label.to_vec()))
            }
        }

        let path = cursor.key_so_far().to_vec();
        self.check_subtree_path(&path)?;
        debug!(
            edge = %common.escape_ascii(),
            stored_at = %path.escape_ascii(),
            "split below record"
        );
        self.store.put(path, fork);
        Ok(Node::Placeholder(BranchPlaceholder::dirty(common)))
    }

    fn check_subtree_path(&self, path: &[u8]) -> Result<()> {
        if path == self.config.root_path_key.as_slice() {
            return Err(Error::ReservedPath(display_path(path)));
        }
        Ok(())
    }

    /// Every record in the trie with the key rebuilt from the branching bytes
    /// and edge labels on its path, in path order
    pub fn records(&self) -> Result<Vec<(Vec<u8>, Hash)>> {
        let mut out = Vec::new();
        self.collect_records(self.root()?, &[], &mut out)?;
        Ok(out)
    }

    fn collect_records(
        &self,
        branch: &Branch,
        path: &[u8],
        out: &mut Vec<(Vec<u8>, Hash)>,
    ) -> Result<()> {
        let mut through = path.to_vec();
        through.extend_from_slice(branch.edge_label());

        if let Node::Record(leaf) = branch.termination() {
            out.push((through.clone(), *leaf.digest()));
        }
        for (byte, child) in branch.children() {
            let mut child_path = through.clone();
            child_path.push(byte);
            match child {
                Node::Null => {}
                Node::Record(leaf) => {
                    child_path.extend_from_slice(leaf.edge_label());
                    out.push((child_path, *leaf.digest()));
                }
                Node::Branch(inner) => self.collect_records(inner, &child_path, out)?,
                Node::Placeholder(_) => {
                    let stored = self.stored_branch(&child_path)?;
                    self.collect_records(stored, &child_path, out)?;
                }
            }
        }
        Ok(())
    }

    /// Render the trie as indented text, following placeholders into the
    /// store
    pub fn dump(&self) -> Result<String> {
        let root = self.root()?;
        let mut lines = vec![format!("root {}", root)];
        self.dump_branch(root, &[], 1, &mut lines)?;
        Ok(lines.join("\n"))
    }

    fn dump_branch(
        &self,
        branch: &Branch,
        path: &[u8],
        depth: usize,
        lines: &mut Vec<String>,
    ) -> Result<()> {
        let indent = "  ".repeat(depth);
        let mut through = path.to_vec();
        through.extend_from_slice(branch.edge_label());

        let termination = branch.termination();
        if !termination.is_null() {
            lines.push(format!(
                "{}$ {} key [{}]",
                indent,
                termination,
                through.escape_ascii()
            ));
        }
        for (byte, child) in branch.children() {
            let mut child_path = through.clone();
            child_path.push(byte);
            let label = [byte].escape_ascii().to_string();
            match child {
                Node::Null => {}
                Node::Record(leaf) => {
                    child_path.extend_from_slice(leaf.edge_label());
                    lines.push(format!(
                        "{}{}: {} key [{}]",
                        indent,
                        label,
                        leaf,
                        child_path.escape_ascii()
                    ));
                }
                Node::Branch(inner) => {
                    lines.push(format!("{}{}: {}", indent, label, inner));
                    self.dump_branch(inner, &child_path, depth + 1, lines)?;
                }
                Node::Placeholder(placeholder) => {
                    let stored = self.stored_branch(&child_path)?;
                    lines.push(format!(
                        "{}{}: {} -> stored [{}] {}",
                        indent,
                        label,
                        placeholder,
                        child_path.escape_ascii(),
                        stored
                    ));
                    self.dump_branch(stored, &child_path, depth + 1, lines)?;
                }
            }
        }
        Ok(())
    }

    fn stored_branch(&self, path: &[u8]) -> Result<&Branch> {
        self.store
            .get(path)
            .ok_or_else(|| Error::MissingBranch(display_path(path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trie::NodeKind;
    use std::collections::BTreeMap;

    fn trie() -> PatriciaTrie {
        PatriciaTrie::new(TrieConfig::default()).unwrap()
    }

    fn records(trie: &PatriciaTrie) -> BTreeMap<Vec<u8>, Hash> {
        trie.records().unwrap().into_iter().collect()
    }

    fn stored<'a>(trie: &'a PatriciaTrie, path: &[u8]) -> &'a Branch {
        trie.store().get(path).unwrap()
    }

    fn placeholder(node: Option<&Node>) -> &BranchPlaceholder {
        match node {
            Some(Node::Placeholder(placeholder)) => placeholder,
            other => panic!("expected placeholder, got {:?}", other),
        }
    }

    fn record(node: Option<&Node>) -> &RecordLeaf {
        match node {
            Some(Node::Record(leaf)) => leaf,
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn test_root_present_before_any_insert() {
        let trie = trie();
        assert_eq!(trie.store().len(), 1);

        let root = trie.store().get(b"").unwrap();
        assert!(root.edge_label().is_empty());
        assert!(root.is_empty());
        assert!(trie.records().unwrap().is_empty());
    }

    #[test]
    fn test_existing_root_is_kept() {
        let mut store = MemoryStore::new();
        store.put(Vec::new(), Branch::new(257, Vec::new()));
        let mut trie = PatriciaTrie::with_store(TrieConfig::default(), store).unwrap();
        trie.insert(b"a", b"1").unwrap();

        let store = trie.into_store();
        let trie = PatriciaTrie::with_store(TrieConfig::default(), store).unwrap();
        assert_eq!(trie.records().unwrap().len(), 1);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = TrieConfig::default().with_branching_factor(1);
        assert!(matches!(PatriciaTrie::new(config), Err(Error::Config(_))));
    }

    #[test]
    fn test_first_insert_attaches_record_to_root() {
        let mut trie = trie();
        trie.insert(b"eran", b"lerer").unwrap();

        let leaf = record(trie.root().unwrap().child(b'e'));
        assert_eq!(leaf.edge_label(), b"ran");
        assert_eq!(*leaf.digest(), Hash::record(b"eran", b"lerer"));
        assert_eq!(trie.store().len(), 1);
    }

    #[test]
    fn test_empty_key_uses_root_termination_slot() {
        let mut trie = trie();
        trie.insert(b"", b"nothing").unwrap();

        let root = trie.root().unwrap();
        assert_eq!(root.termination().kind(), NodeKind::Record);
        assert_eq!(records(&trie).get(&Vec::new()), Some(&Hash::record(b"", b"nothing")));
    }

    #[test]
    fn test_overwrite_keeps_single_record() {
        let mut trie = trie();
        trie.insert(b"eran", b"lerer").unwrap();
        trie.insert(b"eran", b"lereron").unwrap();

        let all = records(&trie);
        assert_eq!(all.len(), 1);
        assert_eq!(all[&b"eran".to_vec()], Hash::digest(b"4eranlereron"));
        assert_eq!(record(trie.root().unwrap().child(b'e')).edge_label(), b"ran");
    }

    #[test]
    fn test_overwrite_inside_stored_branch() {
        let mut trie = trie();
        trie.insert(b"moshe", b"a").unwrap();
        trie.insert(b"mosho", b"a").unwrap();
        trie.insert(b"moshe", b"b").unwrap();

        let all = records(&trie);
        assert_eq!(all.len(), 2);
        assert_eq!(all[&b"moshe".to_vec()], Hash::record(b"moshe", b"b"));
        assert_eq!(all[&b"mosho".to_vec()], Hash::record(b"mosho", b"a"));
    }

    #[test]
    fn test_split_below_on_divergence() {
        let mut trie = trie();
        trie.insert(b"eranit", b"v").unwrap();
        trie.insert(b"erere", b"v").unwrap();

        // Root slot now forwards to the store
        let forward = placeholder(trie.root().unwrap().child(b'e'));
        assert_eq!(forward.edge_label(), b"r");
        assert!(forward.is_dirty());

        let fork = stored(&trie, b"e");
        assert_eq!(fork.edge_label(), b"r");
        assert_eq!(record(fork.child(b'a')).edge_label(), b"nit");
        assert_eq!(record(fork.child(b'e')).edge_label(), b"re");
        assert!(fork.termination().is_null());
    }

    #[test]
    fn test_split_below_when_key_extends_record() {
        let mut trie = trie();
        trie.insert(b"eran", b"v").unwrap();
        trie.insert(b"eranit", b"v").unwrap();

        let fork = stored(&trie, b"e");
        assert_eq!(fork.edge_label(), b"ran");
        assert_eq!(*record(Some(fork.termination())).digest(), Hash::record(b"eran", b"v"));
        assert_eq!(record(fork.child(b'i')).edge_label(), b"t");
    }

    #[test]
    fn test_split_below_when_record_extends_key() {
        let mut trie = trie();
        trie.insert(b"eranit", b"v").unwrap();
        trie.insert(b"eran", b"v").unwrap();

        let fork = stored(&trie, b"e");
        assert_eq!(fork.edge_label(), b"ran");
        assert_eq!(*record(Some(fork.termination())).digest(), Hash::record(b"eran", b"v"));
        assert_eq!(record(fork.child(b'i')).edge_label(), b"t");
    }

    #[test]
    fn test_split_above_when_key_ends_inside_branch_edge() {
        let mut trie = trie();
        trie.insert(b"eran", b"v").unwrap();
        trie.insert(b"eranit", b"v").unwrap();
        trie.insert(b"er", b"v").unwrap();

        // The branch at "e" now carries only "r" and ends the key "er"
        let top = stored(&trie, b"e");
        assert_eq!(top.edge_label(), b"r");
        assert_eq!(*record(Some(top.termination())).digest(), Hash::record(b"er", b"v"));

        // The old branch moved under the path through the divergent byte
        let demoted_ref = placeholder(top.child(b'a'));
        assert_eq!(demoted_ref.edge_label(), b"n");
        assert!(demoted_ref.is_dirty());
        let demoted = stored(&trie, b"era");
        assert_eq!(demoted.edge_label(), b"n");
        assert_eq!(record(demoted.child(b'i')).edge_label(), b"t");

        // The root's placeholder follows the new edge label
        let forward = placeholder(trie.root().unwrap().child(b'e'));
        assert_eq!(forward.edge_label(), b"r");
    }

    #[test]
    fn test_split_above_when_key_diverges_inside_branch_edge() {
        let mut trie = trie();
        trie.insert(b"abcX1", b"v").unwrap();
        trie.insert(b"abcY", b"v").unwrap();
        trie.insert(b"abZ", b"v").unwrap();

        let top = stored(&trie, b"a");
        assert_eq!(top.edge_label(), b"b");
        assert_eq!(record(top.child(b'Z')).edge_label(), b"");
        assert_eq!(placeholder(top.child(b'c')).edge_label(), b"");
        assert_eq!(stored(&trie, b"abc").edge_label(), b"");

        trie.insert(b"abcX2", b"v").unwrap();
        let keys: Vec<Vec<u8>> = records(&trie).into_keys().collect();
        assert_eq!(
            keys,
            vec![
                b"abZ".to_vec(),
                b"abcX1".to_vec(),
                b"abcX2".to_vec(),
                b"abcY".to_vec()
            ]
        );
    }

    #[test]
    fn test_descent_marks_placeholder_dirty() {
        let mut store = MemoryStore::new();
        let mut root = Branch::new(257, Vec::new());
        *root.child_at(b'm').unwrap() =
            Node::Placeholder(BranchPlaceholder::new(b"osh".to_vec(), false));
        store.put(Vec::new(), root);
        store.put(b"m".to_vec(), Branch::new(257, b"osh".to_vec()));

        let mut trie = PatriciaTrie::with_store(TrieConfig::default(), store).unwrap();
        trie.insert(b"moshi", b"v").unwrap();

        assert!(placeholder(trie.root().unwrap().child(b'm')).is_dirty());
        assert_eq!(record(stored(&trie, b"m").child(b'i')).edge_label(), b"");
    }

    #[test]
    fn test_prefix_keys_in_every_order() {
        let keys: [&[u8]; 3] = [b"er", b"eran", b"eranit"];
        let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];

        for order in orders {
            let mut trie = trie();
            for &i in &order {
                trie.insert(keys[i], b"lerer").unwrap();
            }
            let all = records(&trie);
            let expected: BTreeMap<Vec<u8>, Hash> = keys
                .iter()
                .map(|key| (key.to_vec(), Hash::record(key, b"lerer")))
                .collect();
            assert_eq!(all, expected, "insertion order {:?}", order);
            assert!(!all.contains_key(&b"e".to_vec()));
            assert!(!all.contains_key(&b"era".to_vec()));
        }
    }

    #[test]
    fn test_end_to_end_scenario() {
        let mut trie = trie();
        trie.insert(b"eran", b"lerer").unwrap();
        trie.insert(b"eran", b"lereron").unwrap();
        trie.insert(b"eranit", b"lerer").unwrap();
        trie.insert(b"er", b"lerer").unwrap();
        trie.insert(b"moshe", b"lerer").unwrap();
        trie.insert(b"mosho", b"lerer").unwrap();

        let all = records(&trie);
        assert_eq!(all.len(), 5);
        assert_eq!(all[&b"eran".to_vec()], Hash::digest(b"4eranlereron"));
        assert_eq!(all[&b"eranit".to_vec()], Hash::record(b"eranit", b"lerer"));
        assert_eq!(all[&b"er".to_vec()], Hash::record(b"er", b"lerer"));

        assert_eq!(
            trie.store().paths(),
            vec![Vec::new(), b"e".to_vec(), b"era".to_vec(), b"m".to_vec()]
        );

        // "er" split from the "eran"/"eranit" subtree
        let er = stored(&trie, b"e");
        assert_eq!(er.edge_label(), b"r");
        assert_eq!(er.termination().kind(), NodeKind::Record);
        let eran = stored(&trie, b"era");
        assert_eq!(eran.edge_label(), b"n");
        assert_eq!(*record(Some(eran.termination())).digest(), Hash::digest(b"4eranlereron"));
        assert_eq!(record(eran.child(b'i')).edge_label(), b"t");

        // "moshe"/"mosho" fork after the shared "mosh"
        let mosh = stored(&trie, b"m");
        assert_eq!(mosh.edge_label(), b"osh");
        assert_eq!(record(mosh.child(b'e')).edge_label(), b"");
        assert_eq!(record(mosh.child(b'o')).edge_label(), b"");
        assert_eq!(placeholder(trie.root().unwrap().child(b'm')).edge_label(), b"osh");
    }

    #[test]
    fn test_byte_outside_branching_factor() {
        let config = TrieConfig::default().with_branching_factor(100);
        let mut trie = PatriciaTrie::new(config).unwrap();
        trie.insert(b"a", b"v").unwrap();

        assert!(matches!(
            trie.insert(b"z", b"v"),
            Err(Error::SlotOutOfRange { byte: b'z', slots: 100 })
        ));
        // The failed insertion leaves the root in the store
        assert!(trie.root().is_ok());
    }

    #[test]
    fn test_subtree_never_stored_under_root_key() {
        let config = TrieConfig::default().with_root_path_key(b"e".to_vec());
        let mut trie = PatriciaTrie::new(config).unwrap();
        trie.insert(b"eran", b"v").unwrap();

        assert!(matches!(
            trie.insert(b"eranit", b"v"),
            Err(Error::ReservedPath(_))
        ));
        assert_eq!(trie.root().unwrap().branching_factor(), 257);
    }

    #[test]
    fn test_split_above_never_stores_under_root_key() {
        let config = TrieConfig::default().with_root_path_key(b"era".to_vec());
        let mut trie = PatriciaTrie::new(config).unwrap();
        trie.insert(b"eran", b"v").unwrap();
        trie.insert(b"eranit", b"v").unwrap();
        assert!(trie.store().contains(b"e"));

        // Splitting the branch at "e" above its edge "ran" would demote it to "era"
        assert!(matches!(
            trie.insert(b"er", b"v"),
            Err(Error::ReservedPath(_))
        ));
        assert_eq!(trie.root().unwrap().branching_factor(), 257);
        assert!(trie.store().contains(b"e"));
        assert_eq!(trie.records().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_stored_branch_is_reported() {
        let mut trie = trie();
        trie.insert(b"moshe", b"v").unwrap();
        trie.insert(b"mosho", b"v").unwrap();

        let mut store = trie.into_store();
        store.take(b"m").unwrap();
        let mut trie = PatriciaTrie::with_store(TrieConfig::default(), store).unwrap();

        assert!(matches!(
            trie.insert(b"moshi", b"v"),
            Err(Error::MissingBranch(_))
        ));
        assert!(trie.dump().is_err());
    }

    #[test]
    fn test_digest_of_null_uses_config() {
        let trie = trie();
        assert_eq!(trie.digest_of(&Node::Null), Some(Hash::digest(b"HASH")));
        assert_eq!(
            trie.digest_of(&Node::Placeholder(BranchPlaceholder::dirty(Vec::new()))),
            None
        );
    }

    #[test]
    fn test_dump_shows_stored_subtrees() {
        let mut trie = trie();
        trie.insert(b"moshe", b"lerer").unwrap();
        trie.insert(b"mosho", b"lerer").unwrap();

        let dump = trie.dump().unwrap();
        assert!(dump.starts_with("root Branch edge [] children 1"));
        assert!(dump.contains("m: Placeholder edge [osh] dirty true -> stored [m]"));
        assert!(dump.contains("key [moshe]"));
        assert!(dump.contains("key [mosho]"));
    }
}
