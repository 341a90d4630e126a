//! Structural validation of a B-tree.
//!
//! [`check_tree`] walks every reachable node and asserts the full
//! invariant set: occupancy bands, strictly increasing keys, subtree key
//! bounds, child counts, and equal leaf depth. Property tests call it
//! after every few operations.

use crate::btree::node::Node;
use crate::btree::BTree;
use std::fmt::Debug;

/// Walk the whole tree and panic on the first violated invariant.
///
/// Checks, for every reachable node:
///
/// 1. at most `M - 1` keys; at least `M / 2 - 1` for non-root nodes,
///    at least 1 for a non-empty root
/// 2. keys strictly increasing, and strictly inside the bounds imposed
///    by the ancestors' separators
/// 3. an internal node with `n` keys has exactly `n + 1` children;
///    a leaf has none
/// 4. every leaf sits at the same depth
pub fn check_tree<K: Ord + Debug, V>(tree: &BTree<K, V>) {
    let order = tree.order();
    let min_keys = order / 2 - 1;
    let Some(root) = tree.root.as_ref() else {
        return;
    };
    assert!(
        !root.keys.is_empty(),
        "a non-empty tree must have a keyed root"
    );
    let mut leaf_depth = None;
    check_node(root, 0, true, order, min_keys, &mut leaf_depth, None, None);
}

#[allow(clippy::too_many_arguments)]
fn check_node<K: Ord + Debug, V>(
    node: &Node<K, V>,
    depth: usize,
    is_root: bool,
    order: usize,
    min_keys: usize,
    leaf_depth: &mut Option<usize>,
    lower: Option<&K>,
    upper: Option<&K>,
) {
    let n = node.keys.len();
    assert_eq!(
        node.keys.len(),
        node.values.len(),
        "key and value slots out of step at depth {depth}"
    );
    assert!(
        n <= order - 1,
        "node at depth {depth} holds {n} keys, maximum is {}",
        order - 1
    );
    if !is_root {
        assert!(
            n >= min_keys,
            "non-root node at depth {depth} holds {n} keys, minimum is {min_keys}: {:?}",
            node.keys
        );
    }

    for pair in node.keys.windows(2) {
        assert!(
            pair[0] < pair[1],
            "keys not strictly increasing at depth {depth}: {:?}",
            node.keys
        );
    }
    if let Some(lo) = lower {
        assert!(
            *lo < node.keys[0],
            "subtree key {:?} at depth {depth} violates lower bound {lo:?}",
            node.keys[0]
        );
    }
    if let Some(hi) = upper {
        assert!(
            node.keys[n - 1] < *hi,
            "subtree key {:?} at depth {depth} violates upper bound {hi:?}",
            node.keys[n - 1]
        );
    }

    if node.leaf {
        assert!(
            node.children.is_empty(),
            "leaf at depth {depth} has children"
        );
        match leaf_depth {
            None => *leaf_depth = Some(depth),
            Some(d) => assert_eq!(
                *d, depth,
                "leaves at different depths: {d} and {depth}"
            ),
        }
    } else {
        assert_eq!(
            node.children.len(),
            n + 1,
            "internal node at depth {depth} with {n} keys has {} children",
            node.children.len()
        );
        for (i, child) in node.children.iter().enumerate() {
            let lo = if i == 0 { lower } else { Some(&node.keys[i - 1]) };
            let hi = if i == n { upper } else { Some(&node.keys[i]) };
            check_node(child, depth + 1, false, order, min_keys, leaf_depth, lo, hi);
        }
    }
}
