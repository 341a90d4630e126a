//! Test data builders: fluent pair construction, a deterministic key
//! stream for property tests, and a drop-accounting payload.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A fluent builder for `(key, value)` input data.
///
/// # Example
///
/// ```
/// use granary::testing::KvTestDataBuilder;
///
/// let data = KvTestDataBuilder::new()
///     .add_pair("a", "1")
///     .add_line("first line")
///     .add_repeated("x", "0", 3)
///     .build();
///
/// assert_eq!(data.len(), 5);
/// ```
#[derive(Default)]
pub struct KvTestDataBuilder {
    pairs: Vec<(String, String)>,
}

impl KvTestDataBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a single pair.
    #[must_use]
    pub fn add_pair(mut self, key: &str, value: &str) -> Self {
        self.pairs.push((key.to_owned(), value.to_owned()));
        self
    }

    /// Add a line keyed by its decimal index, the way the driver keys
    /// file input.
    #[must_use]
    pub fn add_line(mut self, line: &str) -> Self {
        self.pairs.push((self.pairs.len().to_string(), line.to_owned()));
        self
    }

    /// Add `count` copies of the same pair.
    #[must_use]
    pub fn add_repeated(mut self, key: &str, value: &str, count: usize) -> Self {
        for _ in 0..count {
            self.pairs.push((key.to_owned(), value.to_owned()));
        }
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<(String, String)> {
        self.pairs
    }
}

/// A tiny deterministic xorshift generator for property tests.
///
/// Seeded streams make randomized operation sequences reproducible
/// without pulling in a randomness dependency.
pub struct KeyStream {
    state: u64,
}

impl KeyStream {
    /// Seed must be nonzero.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 0x9e37_79b9 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform-ish draw from `[0, bound)`.
    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}

/// Counts how many [`DropToken`]s created from it have been dropped.
///
/// Useful for verifying that teardown releases every stored payload
/// exactly once.
#[derive(Default)]
pub struct DropCounter {
    drops: Arc<AtomicUsize>,
}

impl DropCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint a payload that reports its own drop.
    #[must_use]
    pub fn token(&self) -> DropToken {
        DropToken {
            drops: Arc::clone(&self.drops),
        }
    }

    /// Number of tokens dropped so far.
    pub fn count(&self) -> usize {
        self.drops.load(Ordering::SeqCst)
    }
}

/// A payload that increments its counter exactly once, on drop.
pub struct DropToken {
    drops: Arc<AtomicUsize>,
}

impl Drop for DropToken {
    fn drop(&mut self) {
        self.drops.fetch_add(1, Ordering::SeqCst);
    }
}
