//! Hash-routed intermediate buckets.
//!
//! Intermediate pairs are spread across a fixed set of partitions by a
//! djb2 hash of the key. With `PARTITIONS` comfortably above the worker
//! cap, map-phase lock contention stays low; during the reduce phase each
//! partition is owned by exactly one worker, so its lock is uncontended.

use crate::mapreduce::kv::KvList;
use std::sync::{Mutex, MutexGuard};

/// Number of intermediate partitions per job.
pub const PARTITIONS: usize = 16;

/// One intermediate bucket: a [`KvList`] behind an exclusive lock.
///
/// Writers (map-phase emitters) must hold the lock. The coordinator sorts
/// each partition in place between the phases.
pub struct Partition {
    list: Mutex<KvList>,
}

impl Partition {
    pub(crate) fn new() -> Self {
        Self {
            list: Mutex::new(KvList::new()),
        }
    }

    /// Acquire the bucket. Poisoning means a user callback panicked while
    /// appending; the job is already lost at that point.
    pub fn lock(&self) -> MutexGuard<'_, KvList> {
        self.list.lock().unwrap()
    }
}

/// djb2 over the key bytes: `h = h * 33 + byte`, seeded with 5381.
pub fn hash_key(key: &str) -> u32 {
    let mut h: u32 = 5381;
    for &b in key.as_bytes() {
        h = h.wrapping_mul(33).wrapping_add(u32::from(b));
    }
    h
}

/// Partition index for a key.
pub fn route(key: &str) -> usize {
    hash_key(key) as usize % PARTITIONS
}
