//! # Granary
//!
//! Two independent, self-contained systems cores in one crate:
//!
//! 1. **An ordered key/value index** ([`BTree`]): a B-tree of fixed order
//!    with point lookup, insert, delete, and in-order traversal, balanced
//!    by the classical top-down algorithms (preemptive split on the way
//!    down for insert, eager borrow/merge on the way down for delete).
//! 2. **An in-process parallel MapReduce engine** ([`Job`]): a fixed pool
//!    of worker threads maps disjoint slices of the input, routes
//!    intermediate pairs to hash-selected partitions, sorts each
//!    partition, groups runs of equal keys, and feeds them to a
//!    user-supplied reducer.
//!
//! The two cores share no state; they live together because each carries
//! one classic piece of systems engineering: balanced-tree invariants
//! under interleaved split and merge paths, and two-phase worker
//! coordination over partitioned shared state.
//!
//! ## Quick Start: the index
//!
//! ```
//! use granary::BTree;
//!
//! let mut index: BTree<u64, Vec<u8>> = BTree::new(5);
//! index.insert(42, b"first".to_vec());
//! index.insert(42, b"second".to_vec()); // replaces, returns the old payload
//!
//! assert_eq!(index.get(&42).map(Vec::as_slice), Some(&b"second"[..]));
//! assert!(index.remove(&42).is_some());
//! assert!(index.remove(&42).is_none());
//! ```
//!
//! ## Quick Start: word count
//!
//! ```
//! use granary::mapreduce::{builtin, Job};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut job = Job::new(4, builtin::word_count_map, builtin::word_count_reduce)?;
//! job.ingest_lines(["the quick brown fox", "the fox jumps"]);
//! job.run()?;
//!
//! let mut counts = job.take_output();
//! counts.sort_by_key(); // output carries no cross-partition order
//! # Ok(())
//! # }
//! ```
//!
//! Custom jobs supply their own callbacks; the emitter is the only
//! append capability a callback sees:
//!
//! ```
//! use granary::mapreduce::{Emitter, Group, Job};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut job = Job::new(
//!     2,
//!     |_key: &str, value: &str, emit: &mut Emitter<'_>| {
//!         emit.emit(value, "seen");
//!     },
//!     |key: &str, values: &Group<'_>, emit: &mut Emitter<'_>| {
//!         emit.emit(key, &values.len().to_string());
//!     },
//! )?;
//! job.ingest("0", "a");
//! job.ingest("1", "a");
//! job.run()?;
//! assert_eq!(job.take_output().len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Concurrency model
//!
//! The B-tree is strictly single-threaded; no operation is re-entrant or
//! thread-safe, and every mutation completes before returning.
//!
//! A job runs `W` workers (`1 ≤ W ≤ 16`) plus the coordinating thread,
//! synchronized through a single reusable barrier sized `W + 1`.
//! Per-partition locks serialize map-phase writers; the output lock
//! serializes reduce-phase emitters. Every map emission is visible to its
//! partition before the sort starts, every sort completes before any
//! reducer runs, and every reducer emission lands before
//! [`Job::run`](mapreduce::Job::run) returns. Within a partition, keys
//! arrive at the reducer strictly grouped; across partitions, output
//! order is unspecified.
//!
//! ## Feature Flags
//!
//! - `report` (default): post-run accounting via [`JobReport`]
//!
//! ## Module Overview
//!
//! - [`btree`] - the ordered index core
//! - [`mapreduce`] - the parallel engine core: carriers, partitions,
//!   coordinator, built-in jobs
//! - [`io`] - line input and tab-separated output for the driver
//! - [`report`] - post-run job accounting (feature `report`)
//! - [`testing`] - assertions, builders, fixtures, tree validation

pub mod btree;
pub mod io;
pub mod mapreduce;
pub mod testing;

#[cfg(feature = "report")]
pub mod report;

pub use btree::BTree;
pub use mapreduce::{
    default_workers, Emitter, Group, Job, JobError, KvList, KvPair, KEY_MAX, MAX_WORKERS,
    PARTITIONS, VALUE_MAX,
};

#[cfg(feature = "report")]
pub use report::JobReport;
