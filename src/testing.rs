//! Testing utilities for both cores.
//!
//! This module backs the integration tests and is public so embedders can
//! reuse it for their own test suites. It provides:
//!
//! - **Assertions**: compare key/value outputs against expected pairs
//! - **Builders**: fluent input construction and a deterministic key stream
//! - **Fixtures**: canned corpora for the MapReduce scenarios
//! - **Tree checking**: a structural validator for every B-tree invariant
//!
//! # Example
//!
//! ```
//! use granary::BTree;
//! use granary::testing::check_tree;
//!
//! let mut tree: BTree<u32, u32> = BTree::new(5);
//! for k in 0..100 {
//!     tree.insert(k, k);
//! }
//! check_tree(&tree);
//! ```

pub mod assertions;
pub mod builders;
pub mod fixtures;
pub mod tree_check;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;
pub use tree_check::*;
