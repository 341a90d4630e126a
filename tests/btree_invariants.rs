//! Randomized property tests: the tree is checked structurally after
//! operations and compared against `std::collections::BTreeMap` as the
//! model.

use granary::testing::{check_tree, KeyStream};
use granary::BTree;
use std::collections::BTreeMap;

const KEY_RANGE: u64 = 300;

fn run_model_checked(order: usize, seed: u64, ops: usize) {
    let mut tree: BTree<u64, u64> = BTree::new(order);
    let mut model: BTreeMap<u64, u64> = BTreeMap::new();
    let mut stream = KeyStream::new(seed);

    for op in 0..ops {
        let key = stream.next_below(KEY_RANGE);
        let value = stream.next_u64();
        if stream.next_below(3) < 2 {
            assert_eq!(
                tree.insert(key, value),
                model.insert(key, value),
                "insert disagreement for key {key} (order {order}, op {op})"
            );
        } else {
            assert_eq!(
                tree.remove(&key),
                model.remove(&key),
                "remove disagreement for key {key} (order {order}, op {op})"
            );
        }

        if op % 16 == 0 {
            check_tree(&tree);
        }
    }

    check_tree(&tree);
    assert_eq!(tree.len(), model.len());

    // Lookups agree over the whole key range, hits and misses alike.
    for key in 0..KEY_RANGE {
        assert_eq!(
            tree.get(&key),
            model.get(&key),
            "lookup disagreement for key {key} (order {order})"
        );
    }

    // In-order traversal yields exactly the model's ascending entries.
    let mut traversed: Vec<(u64, u64)> = Vec::new();
    tree.traverse(|k, v| traversed.push((*k, *v)));
    let expected: Vec<(u64, u64)> = model.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(traversed, expected);
}

#[test]
fn random_ops_order_four() {
    run_model_checked(4, 0xdead_beef, 2000);
}

#[test]
fn random_ops_order_five() {
    run_model_checked(5, 0xc0ff_ee11, 2000);
}

#[test]
fn random_ops_order_six() {
    run_model_checked(6, 0x5eed_0001, 2000);
}

#[test]
fn random_ops_order_ten() {
    run_model_checked(10, 0x0b57_ac1e, 3000);
}

/// Delete-heavy stream: drain a populated tree in random order.
#[test]
fn random_drain() {
    let mut tree: BTree<u64, u64> = BTree::new(5);
    let mut model: BTreeMap<u64, u64> = BTreeMap::new();
    let mut stream = KeyStream::new(42);

    for _ in 0..600 {
        let key = stream.next_below(KEY_RANGE);
        tree.insert(key, key);
        model.insert(key, key);
    }
    check_tree(&tree);

    while !model.is_empty() {
        // Alternate between the smallest remaining key and a random one.
        let target = if stream.next_below(2) == 0 {
            *model.keys().next().unwrap()
        } else {
            *model.keys().nth(stream.next_below(model.len() as u64) as usize).unwrap()
        };
        assert_eq!(tree.remove(&target), model.remove(&target));
        check_tree(&tree);
    }
    assert!(tree.is_empty());
}

/// Descending inserts exercise the left-leaning split paths.
#[test]
fn descending_insert_ascending_delete() {
    let mut tree: BTree<i64, i64> = BTree::new(6);
    for key in (0..500).rev() {
        tree.insert(key, -key);
    }
    check_tree(&tree);
    assert_eq!(tree.len(), 500);

    for key in 0..250 {
        assert_eq!(tree.remove(&key), Some(-key));
    }
    check_tree(&tree);

    let mut keys = Vec::new();
    tree.traverse(|k, _| keys.push(*k));
    assert_eq!(keys, (250..500).collect::<Vec<i64>>());
}

/// Internal-node deletion: removing separators forces the predecessor,
/// successor, and merge paths.
#[test]
fn delete_internal_separators() {
    let mut tree: BTree<u32, u32> = BTree::new(4);
    for key in 0..200 {
        tree.insert(key, key);
    }

    // Root and mid-level keys are separators at this size; delete a swath
    // straight through them.
    for key in (0..200).step_by(2) {
        assert_eq!(tree.remove(&key), Some(key));
        check_tree(&tree);
    }
    for key in 0..200u32 {
        assert_eq!(tree.get(&key).is_some(), key % 2 == 1);
    }
}
