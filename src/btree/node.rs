//! Node storage and the balance primitives (split, borrow, merge).
//!
//! A node owns its key and value slots outright; every rebalancing
//! operation *moves* entries between slots, so there is no separate
//! cleanup discipline and teardown is plain `Drop`.
//!
//! All occupancy thresholds are derived from the tree order `M`:
//! a node holds at most `M - 1` keys, and the delete path keeps every
//! child it descends into at `t = M / 2` keys or more (so a leaf removal
//! can never leave a non-root node below `t - 1`).

use std::cmp::Ordering;
use std::fmt;
use std::mem;

pub(crate) struct Node<K, V> {
    pub(crate) keys: Vec<K>,
    pub(crate) values: Vec<V>,
    pub(crate) children: Vec<Box<Node<K, V>>>,
    pub(crate) leaf: bool,
}

impl<K: Ord, V> Node<K, V> {
    pub(crate) fn new(leaf: bool, order: usize) -> Self {
        Self {
            keys: Vec::with_capacity(order - 1),
            values: Vec::with_capacity(order - 1),
            children: Vec::with_capacity(order),
            leaf,
        }
    }

    pub(crate) fn is_full(&self, order: usize) -> bool {
        self.keys.len() == order - 1
    }

    pub(crate) fn search(&self, key: &K) -> Option<&V> {
        match self.keys.binary_search(key) {
            Ok(idx) => Some(&self.values[idx]),
            Err(idx) => {
                if self.leaf {
                    None
                } else {
                    self.children[idx].search(key)
                }
            }
        }
    }

    /// Insert below a node that is guaranteed not to be full.
    ///
    /// Returns the displaced value when `key` was already present.
    pub(crate) fn insert_non_full(&mut self, key: K, value: V, order: usize) -> Option<V> {
        match self.keys.binary_search(&key) {
            Ok(idx) => Some(mem::replace(&mut self.values[idx], value)),
            Err(mut idx) => {
                if self.leaf {
                    self.keys.insert(idx, key);
                    self.values.insert(idx, value);
                    None
                } else {
                    if self.children[idx].is_full(order) {
                        self.split_child(idx, order);
                        // The promoted separator decides which half continues
                        // the descent; it may itself be the inserted key.
                        match key.cmp(&self.keys[idx]) {
                            Ordering::Greater => idx += 1,
                            Ordering::Equal => {
                                return Some(mem::replace(&mut self.values[idx], value));
                            }
                            Ordering::Less => {}
                        }
                    }
                    self.children[idx].insert_non_full(key, value, order)
                }
            }
        }
    }

    /// Split the full child at `idx` into two halves around its median.
    ///
    /// The left half keeps the first `⌈M/2⌉ - 1` keys, the key at that
    /// index moves up as the separator, and the remainder forms a fresh
    /// right sibling linked at `idx + 1`.
    pub(crate) fn split_child(&mut self, idx: usize, order: usize) {
        let mid = (order - 1) / 2;
        let child = &mut self.children[idx];

        let mut right_keys = child.keys.split_off(mid);
        let mut right_values = child.values.split_off(mid);
        let up_key = right_keys.remove(0);
        let up_value = right_values.remove(0);

        let mut right = Node::new(child.leaf, order);
        right.keys = right_keys;
        right.values = right_values;
        if !child.leaf {
            right.children = child.children.split_off(mid + 1);
        }

        self.keys.insert(idx, up_key);
        self.values.insert(idx, up_value);
        self.children.insert(idx + 1, Box::new(right));
    }

    /// Remove `key` from the subtree rooted here, filling every child to
    /// at least `t` keys before descending into it.
    pub(crate) fn remove(&mut self, key: &K, t: usize) -> Option<V> {
        match self.keys.binary_search(key) {
            Ok(idx) => {
                if self.leaf {
                    self.keys.remove(idx);
                    Some(self.values.remove(idx))
                } else {
                    Some(self.remove_internal(idx, key, t))
                }
            }
            Err(mut idx) => {
                if self.leaf {
                    return None;
                }
                if self.children[idx].keys.len() < t {
                    idx = self.fill_child(idx, t);
                }
                self.children[idx].remove(key, t)
            }
        }
    }

    /// Remove the separator at `idx` of an internal node.
    fn remove_internal(&mut self, idx: usize, key: &K, t: usize) -> V {
        if self.children[idx].keys.len() >= t {
            let (pred_key, pred_value) = self.children[idx].take_last(t);
            self.keys[idx] = pred_key;
            mem::replace(&mut self.values[idx], pred_value)
        } else if self.children[idx + 1].keys.len() >= t {
            let (succ_key, succ_value) = self.children[idx + 1].take_first(t);
            self.keys[idx] = succ_key;
            mem::replace(&mut self.values[idx], succ_value)
        } else {
            // Both neighbors are minimal: fold the separator and the right
            // child into the left child, then take the key out of the merge.
            self.merge_children(idx);
            self.children[idx]
                .remove(key, t)
                .expect("separator key must survive the merge")
        }
    }

    /// Bring the child at `idx` up to at least `t` keys. Returns the index
    /// of the child that now covers the original key range (it shifts left
    /// by one when the last child is merged into its predecessor).
    fn fill_child(&mut self, idx: usize, t: usize) -> usize {
        if idx > 0 && self.children[idx - 1].keys.len() >= t {
            self.borrow_from_prev(idx);
            idx
        } else if idx + 1 < self.children.len() && self.children[idx + 1].keys.len() >= t {
            self.borrow_from_next(idx);
            idx
        } else if idx + 1 < self.children.len() {
            self.merge_children(idx);
            idx
        } else {
            self.merge_children(idx - 1);
            idx - 1
        }
    }

    /// Rotate the left sibling's last entry through the parent into the
    /// front of `children[idx]`.
    fn borrow_from_prev(&mut self, idx: usize) {
        let (left, right) = self.children.split_at_mut(idx);
        let sibling = left.last_mut().expect("borrow requires a left sibling");
        let child = &mut right[0];

        let up_key = sibling.keys.pop().expect("left sibling holds >= t keys");
        let up_value = sibling.values.pop().expect("left sibling holds >= t keys");
        let down_key = mem::replace(&mut self.keys[idx - 1], up_key);
        let down_value = mem::replace(&mut self.values[idx - 1], up_value);

        child.keys.insert(0, down_key);
        child.values.insert(0, down_value);
        if !child.leaf {
            let moved = sibling
                .children
                .pop()
                .expect("internal sibling holds >= t + 1 children");
            child.children.insert(0, moved);
        }
    }

    /// Rotate the right sibling's first entry through the parent onto the
    /// back of `children[idx]`.
    fn borrow_from_next(&mut self, idx: usize) {
        let (left, right) = self.children.split_at_mut(idx + 1);
        let child = left.last_mut().expect("borrow target exists");
        let sibling = &mut right[0];

        let up_key = sibling.keys.remove(0);
        let up_value = sibling.values.remove(0);
        let down_key = mem::replace(&mut self.keys[idx], up_key);
        let down_value = mem::replace(&mut self.values[idx], up_value);

        child.keys.push(down_key);
        child.values.push(down_value);
        if !child.leaf {
            child.children.push(sibling.children.remove(0));
        }
    }

    /// Merge `children[idx]`, the separator at `idx`, and `children[idx + 1]`
    /// into a single node. The right sibling is consumed.
    fn merge_children(&mut self, idx: usize) {
        let mut right = *self.children.remove(idx + 1);
        let sep_key = self.keys.remove(idx);
        let sep_value = self.values.remove(idx);

        let left = &mut self.children[idx];
        left.keys.push(sep_key);
        left.values.push(sep_value);
        left.keys.append(&mut right.keys);
        left.values.append(&mut right.values);
        if !left.leaf {
            left.children.append(&mut right.children);
        }
    }

    /// Move the in-order last entry out of this subtree.
    fn take_last(&mut self, t: usize) -> (K, V) {
        if self.leaf {
            let key = self.keys.pop().expect("leaf on the take_last path is non-empty");
            let value = self.values.pop().expect("leaf on the take_last path is non-empty");
            (key, value)
        } else {
            let idx = self.children.len() - 1;
            let idx = if self.children[idx].keys.len() < t {
                self.fill_child(idx, t)
            } else {
                idx
            };
            self.children[idx].take_last(t)
        }
    }

    /// Move the in-order first entry out of this subtree.
    fn take_first(&mut self, t: usize) -> (K, V) {
        if self.leaf {
            let key = self.keys.remove(0);
            let value = self.values.remove(0);
            (key, value)
        } else {
            let idx = if self.children[0].keys.len() < t {
                self.fill_child(0, t)
            } else {
                0
            };
            self.children[idx].take_first(t)
        }
    }

    pub(crate) fn traverse<F>(&self, visitor: &mut F)
    where
        F: FnMut(&K, &V),
    {
        for i in 0..self.keys.len() {
            if !self.leaf {
                self.children[i].traverse(visitor);
            }
            visitor(&self.keys[i], &self.values[i]);
        }
        if !self.leaf {
            self.children[self.keys.len()].traverse(visitor);
        }
    }
}

impl<K: Ord + fmt::Debug, V> Node<K, V> {
    pub(crate) fn dump_into(&self, level: usize, out: &mut String) {
        for _ in 0..level {
            out.push_str("  ");
        }
        out.push_str(&format!("level {level}: ["));
        for (i, key) in self.keys.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!("{key:?}"));
        }
        out.push(']');
        if self.leaf {
            out.push_str(" (leaf)");
        }
        out.push('\n');
        for child in &self.children {
            child.dump_into(level + 1, out);
        }
    }
}
