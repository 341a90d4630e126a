//! An in-process parallel MapReduce engine.
//!
//! A job partitions its input across a fixed pool of worker threads,
//! routes intermediate pairs to hash-selected partitions, groups by key
//! within each sorted partition, and invokes a user-supplied reducer.
//! See [`job`] for the coordination protocol and [`kv`] for the carrier
//! types.
//!
//! # Example
//!
//! ```
//! use granary::mapreduce::{builtin, Job};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut job = Job::new(4, builtin::word_count_map, builtin::word_count_reduce)?;
//! job.ingest_lines(["the quick brown fox", "the lazy dog"]);
//! job.run()?;
//!
//! let mut output = job.take_output();
//! output.sort_by_key();
//! assert_eq!(output.len(), 6);
//! # Ok(())
//! # }
//! ```

pub mod builtin;
pub mod job;
pub mod kv;
pub mod partition;

pub use job::{default_workers, Job, JobError, MapFn, ReduceFn, MAX_WORKERS};
pub use kv::{Emitter, Group, KvList, KvPair, INITIAL_CAPACITY, KEY_MAX, VALUE_MAX};
pub use partition::{hash_key, route, Partition, PARTITIONS};
