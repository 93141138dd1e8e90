use super::*;
use crate::model::Hash;
use crate::TrieConfig;

use proptest::prelude::*;
use std::collections::BTreeMap;

// A small alphabet makes shared prefixes and every split case likely
fn key_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'a', b'b', b'c']), 0..7)
}

fn ops_strategy() -> impl Strategy<Value = Vec<(Vec<u8>, Vec<u8>)>> {
    prop::collection::vec(
        (key_strategy(), prop::collection::vec(any::<u8>(), 0..4)),
        1..40,
    )
}

fn build(ops: &[(Vec<u8>, Vec<u8>)]) -> PatriciaTrie {
    let mut trie = PatriciaTrie::new(TrieConfig::default()).unwrap();
    for (key, value) in ops {
        trie.insert(key, value).unwrap();
    }
    trie
}

/// Every placeholder resolves, and stored branches are reachable only
/// through one
fn validate_store(trie: &PatriciaTrie) {
    use crate::store::BranchStore;

    let mut reachable = vec![trie.config().root_path_key.clone()];
    let mut stack: Vec<(Vec<u8>, &Branch)> = vec![(Vec::new(), trie.root().unwrap())];
    while let Some((path, branch)) = stack.pop() {
        let mut through = path;
        through.extend_from_slice(branch.edge_label());
        for (byte, child) in branch.children() {
            let mut child_path = through.clone();
            child_path.push(byte);
            if let Node::Placeholder(placeholder) = child {
                let stored = trie.store().get(&child_path).expect("placeholder resolves");
                assert_eq!(placeholder.edge_label(), stored.edge_label());
                assert!(placeholder.is_dirty());
                reachable.push(child_path.clone());
                stack.push((child_path, stored));
            }
        }
    }
    reachable.sort();
    assert_eq!(reachable, trie.store().paths());
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_records_match_last_write(ops in ops_strategy()) {
        let trie = build(&ops);

        let mut expected = BTreeMap::new();
        for (key, value) in &ops {
            expected.insert(key.clone(), Hash::record(key, value));
        }
        let actual: BTreeMap<Vec<u8>, Hash> = trie.records().unwrap().into_iter().collect();

        // Walking edge labels and branching bytes rebuilds each inserted key
        prop_assert_eq!(trie.records().unwrap().len(), expected.len());
        prop_assert_eq!(actual, expected);
        validate_store(&trie);
    }

    #[test]
    fn prop_insertion_order_does_not_change_records(ops in ops_strategy()) {
        // One value per key so that order cannot change what is last written
        let mut unique = BTreeMap::new();
        for (key, value) in ops {
            unique.entry(key).or_insert(value);
        }
        let forward: Vec<_> = unique.into_iter().collect();
        let mut backward = forward.clone();
        backward.reverse();

        let mut forward_records = build(&forward).records().unwrap();
        let mut backward_records = build(&backward).records().unwrap();
        forward_records.sort();
        backward_records.sort();
        prop_assert_eq!(forward_records, backward_records);
    }
}
