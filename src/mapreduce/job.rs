//! The coordinator: configuration, ingestion, and the two-phase run.
//!
//! A [`Job`] owns the input and output lists, the intermediate
//! partitions, and the user callbacks. [`Job::run`] spawns `W` scoped
//! worker threads and drives them through four rendezvous on a single
//! reusable barrier sized `W + 1`:
//!
//! 1. all workers ready, map phase begins
//! 2. map phase complete, the coordinator sorts every partition
//! 3. sorts complete, reduce phase begins
//! 4. reduce phase complete, the coordinator joins the workers
//!
//! Each worker maps a contiguous slice of the input and reduces a
//! contiguous slab of the partitions, the last worker absorbing the
//! remainder of both. The barrier publishes every map emission before any
//! sort runs, and every sort before any reducer reads.

use crate::mapreduce::kv::{Emitter, Group, KvList, KvPair};
use crate::mapreduce::partition::{route, Partition, PARTITIONS};
#[cfg(feature = "report")]
use crate::report::JobReport;
use anyhow::Result;
use rayon::prelude::*;
use std::fmt;
use std::sync::{Barrier, Mutex};
use std::thread;

/// Upper bound on the configurable worker count.
pub const MAX_WORKERS: usize = 16;

/// Map callback: `(key, value, emit)`.
pub type MapFn = dyn Fn(&str, &str, &mut Emitter<'_>) + Send + Sync;

/// Reduce callback: `(key, grouped values, emit)`.
pub type ReduceFn = dyn Fn(&str, &Group<'_>, &mut Emitter<'_>) + Send + Sync;

/// A recoverable configuration or lifecycle failure, surfaced before any
/// worker is spawned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobError {
    /// Worker count outside `1..=MAX_WORKERS`.
    InvalidWorkerCount { requested: usize },
    /// `run` was called with nothing ingested.
    EmptyInput,
    /// `run` was called a second time on the same instance.
    AlreadyRan,
}

impl fmt::Display for JobError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobError::InvalidWorkerCount { requested } => write!(
                f,
                "worker count must be between 1 and {MAX_WORKERS}, got {requested}"
            ),
            JobError::EmptyInput => write!(f, "no input data to run on"),
            JobError::AlreadyRan => write!(f, "job has already run"),
        }
    }
}

impl std::error::Error for JobError {}

/// Worker count matched to the machine, clamped to the configurable range.
pub fn default_workers() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}

/// A configured MapReduce job. See the module docs for the run protocol.
pub struct Job {
    workers: usize,
    input: KvList,
    output: Mutex<KvList>,
    partitions: Vec<Partition>,
    map_fn: Box<MapFn>,
    reduce_fn: Box<ReduceFn>,
    ran: bool,
    #[cfg(feature = "report")]
    report: Option<JobReport>,
}

impl Job {
    /// Bind the callbacks and allocate the partitions and output list.
    ///
    /// Fails with [`JobError::InvalidWorkerCount`] when `workers` is
    /// outside `1..=MAX_WORKERS`. Callback presence is enforced by the
    /// signature, so the only remaining configuration error is the range
    /// check.
    pub fn new<M, R>(workers: usize, map_fn: M, reduce_fn: R) -> Result<Self, JobError>
    where
        M: Fn(&str, &str, &mut Emitter<'_>) + Send + Sync + 'static,
        R: Fn(&str, &Group<'_>, &mut Emitter<'_>) + Send + Sync + 'static,
    {
        if workers == 0 || workers > MAX_WORKERS {
            return Err(JobError::InvalidWorkerCount { requested: workers });
        }
        Ok(Self {
            workers,
            input: KvList::new(),
            output: Mutex::new(KvList::new()),
            partitions: (0..PARTITIONS).map(|_| Partition::new()).collect(),
            map_fn: Box::new(map_fn),
            reduce_fn: Box::new(reduce_fn),
            ran: false,
            #[cfg(feature = "report")]
            report: None,
        })
    }

    /// Append one input pair.
    pub fn ingest(&mut self, key: &str, value: &str) {
        self.input.push(key, value);
    }

    /// Bulk-load lines as input pairs, keyed by decimal line index
    /// (continuing from whatever is already ingested).
    pub fn ingest_lines<I>(&mut self, lines: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut idx = self.input.len();
        for line in lines {
            self.input.push(&idx.to_string(), line.as_ref());
            idx += 1;
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn input_len(&self) -> usize {
        self.input.len()
    }

    /// Execute the job. Returns once the output list is complete.
    ///
    /// Fails with [`JobError::EmptyInput`] when nothing was ingested and
    /// [`JobError::AlreadyRan`] on a second call; in both cases no worker
    /// is spawned.
    pub fn run(&mut self) -> Result<()> {
        if self.ran {
            return Err(JobError::AlreadyRan.into());
        }
        self.ran = true;
        if self.input.is_empty() {
            return Err(JobError::EmptyInput.into());
        }

        let barrier = Barrier::new(self.workers + 1);
        let job = &*self;
        thread::scope(|s| {
            for id in 0..job.workers {
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait(); // map phase begins
                    job.map_slice(id);
                    barrier.wait(); // map phase done
                    barrier.wait(); // partitions sorted
                    job.reduce_slab(id);
                    barrier.wait(); // reduce phase done
                });
            }

            barrier.wait();
            barrier.wait();
            job.sort_partitions();
            barrier.wait();
            barrier.wait();
            // Scope exit joins every worker.
        });

        #[cfg(feature = "report")]
        {
            self.report = Some(self.collect_report());
        }
        Ok(())
    }

    /// Move the final output list out of the job.
    pub fn take_output(&mut self) -> KvList {
        std::mem::take(self.output.get_mut().unwrap())
    }

    /// Accounting for the completed run, if any.
    #[cfg(feature = "report")]
    pub fn report(&self) -> Option<&JobReport> {
        self.report.as_ref()
    }

    /// Map phase for one worker: its contiguous input slice, emitted pairs
    /// routed by key hash into the locked partitions.
    fn map_slice(&self, worker: usize) {
        let n = self.input.len();
        let per_worker = n / self.workers;
        let start = worker * per_worker;
        let end = if worker == self.workers - 1 {
            n
        } else {
            start + per_worker
        };

        let mut scratch = KvList::new();
        for pair in &self.input.as_slice()[start..end] {
            {
                let mut emit = scratch.emitter();
                (self.map_fn)(&pair.key, &pair.value, &mut emit);
            }
            for emitted in scratch.drain() {
                let p = route(&emitted.key);
                self.partitions[p].lock().append(emitted);
            }
        }
    }

    /// Sort every partition ascending by key. Runs on the coordinator
    /// between the second and third rendezvous; no partition is read until
    /// all sorts are published by the barrier.
    fn sort_partitions(&self) {
        self.partitions
            .par_iter()
            .for_each(|partition| partition.lock().sort_by_key());
    }

    /// Reduce phase for one worker: scan each owned partition for maximal
    /// runs of equal keys and hand every run to the reducer.
    fn reduce_slab(&self, worker: usize) {
        let per_worker = PARTITIONS / self.workers;
        let start = worker * per_worker;
        let end = if worker == self.workers - 1 {
            PARTITIONS
        } else {
            start + per_worker
        };

        let mut scratch = KvList::new();
        for p in start..end {
            let partition = self.partitions[p].lock();
            let items: &[KvPair] = partition.as_slice();
            let mut i = 0;
            while i < items.len() {
                let key = items[i].key.as_str();
                let mut j = i + 1;
                while j < items.len() && items[j].key == key {
                    j += 1;
                }
                {
                    let group = Group::new(&items[i..j]);
                    let mut emit = scratch.emitter();
                    (self.reduce_fn)(key, &group, &mut emit);
                }
                if !scratch.is_empty() {
                    let mut output = self.output.lock().unwrap();
                    for pair in scratch.drain() {
                        output.append(pair);
                    }
                }
                i = j;
            }
        }
    }

    #[cfg(feature = "report")]
    fn collect_report(&self) -> JobReport {
        let partition_sizes: Vec<usize> =
            self.partitions.iter().map(|p| p.lock().len()).collect();
        JobReport {
            workers: self.workers,
            input_pairs: self.input.len(),
            intermediate_pairs: partition_sizes.iter().sum(),
            partition_sizes,
            output_pairs: self.output.lock().unwrap().len(),
        }
    }
}
