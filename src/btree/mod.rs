//! An in-memory ordered key/value index backed by a B-tree of fixed order.
//!
//! The tree is built around the two classical top-down algorithms: insert
//! splits every full node on the way down (so a promoted key never has to
//! bubble back up), and delete fills every under-minimal child on the way
//! down by borrowing from a sibling or merging with one. Both keep the
//! structural invariants intact after every public call: all leaves at one
//! depth, strictly increasing keys per node, and `n + 1` children on every
//! internal node with `n` keys.
//!
//! The order `M` is fixed at construction time. A node holds at most
//! `M - 1` keys; a non-root node holds at least `M / 2 - 1` (integer
//! division, matching the split policy for every order).
//!
//! Mutation is strictly single threaded. There is no internal locking and
//! no operation suspends; a concurrent variant would need per-node locking
//! and is deliberately out of scope.
//!
//! # Example
//!
//! ```
//! use granary::BTree;
//!
//! let mut index: BTree<u32, Vec<u8>> = BTree::new(5);
//! index.insert(7, b"payload".to_vec());
//! assert_eq!(index.get(&7).map(Vec::as_slice), Some(&b"payload"[..]));
//! assert!(index.remove(&7).is_some());
//! assert!(index.is_empty());
//! ```

pub(crate) mod node;

use node::Node;
use std::fmt;
use std::mem;

/// An ordered key/value map over a B-tree of order `M`.
///
/// Keys are unique; inserting an existing key replaces its value and hands
/// the previous one back (the same contract as the standard library maps).
pub struct BTree<K, V> {
    pub(crate) root: Option<Box<Node<K, V>>>,
    pub(crate) order: usize,
    len: usize,
}

impl<K: Ord, V> BTree<K, V> {
    /// Create an empty tree of the given order.
    ///
    /// # Panics
    ///
    /// Panics if `order < 4`. Splitting a full node of a smaller order
    /// cannot produce two non-empty halves.
    pub fn new(order: usize) -> Self {
        assert!(order >= 4, "B-tree order must be at least 4");
        Self {
            root: None,
            order,
            len: 0,
        }
    }

    /// The order `M` the tree was constructed with.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Point lookup. Returns a view of the stored value, or `None`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.root.as_ref().and_then(|node| node.search(key))
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Insert a key/value pair, splitting full nodes on the way down.
    ///
    /// Returns the previous value when `key` was already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let order = self.order;
        let displaced = match &mut self.root {
            None => {
                let mut root = Node::new(true, order);
                root.keys.push(key);
                root.values.push(value);
                self.root = Some(Box::new(root));
                None
            }
            Some(root) if root.is_full(order) => {
                // A full root grows the tree by one level: the old root
                // becomes the single child of a fresh internal root and is
                // split before the descent continues.
                let old = mem::replace(root, Box::new(Node::new(false, order)));
                root.children.push(old);
                root.split_child(0, order);
                root.insert_non_full(key, value, order)
            }
            Some(root) => root.insert_non_full(key, value, order),
        };
        if displaced.is_none() {
            self.len += 1;
        }
        displaced
    }

    /// Remove `key`, returning its value, or `None` when absent.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let t = self.order / 2;
        let root = self.root.as_mut()?;
        let removed = root.remove(key, t);

        // The delete path may drain the root even on a miss (a fill merges
        // two children around its only separator). Collapse it either way.
        if root.keys.is_empty() {
            let old = self.root.take().expect("root checked above");
            if !old.leaf {
                let mut old = *old;
                self.root = old.children.pop();
            }
        }
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// In-order visit of every entry, ascending by key.
    pub fn traverse<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V),
    {
        if let Some(root) = &self.root {
            root.traverse(&mut visitor);
        }
    }

    /// Number of levels from the root down to the leaves (0 when empty).
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            depth += 1;
            node = n.children.first().map(|c| c.as_ref());
        }
        depth
    }
}

impl<K: Ord + fmt::Debug, V> BTree<K, V> {
    /// Structural dump for debugging and tests: one line per node,
    /// indented by depth, leaves marked.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        match &self.root {
            None => out.push_str("empty tree\n"),
            Some(root) => root.dump_into(0, &mut out),
        }
        out
    }
}
