//! Post-run job accounting (feature `report`, on by default).
//!
//! A [`JobReport`] is filled in by [`Job::run`](crate::Job::run) once the
//! output list is complete. It can be printed to stderr for a quick look
//! or serialized to JSON for tooling.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Counters describing one completed job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobReport {
    /// Configured worker count.
    pub workers: usize,
    /// Pairs ingested before the run.
    pub input_pairs: usize,
    /// Pairs emitted by the map phase, summed over all partitions.
    pub intermediate_pairs: usize,
    /// Map-phase emissions per partition, in partition order.
    pub partition_sizes: Vec<usize>,
    /// Pairs emitted by the reduce phase.
    pub output_pairs: usize,
}

impl JobReport {
    /// One-line summary on stderr.
    pub fn print(&self) {
        eprintln!(
            "job report: {} workers, {} input pairs, {} intermediate pairs, {} output pairs",
            self.workers, self.input_pairs, self.intermediate_pairs, self.output_pairs
        );
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the report to a file as pretty JSON.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let json = self.to_json().map_err(io::Error::other)?;
        std::fs::write(path, json)
    }
}
