//! File glue for the demonstration driver: line input, tab-separated
//! output.

use crate::mapreduce::kv::KvList;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Read a UTF-8 text file into lines, trailing newlines stripped.
pub fn load_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file {}", path.display()))?;
    Ok(text.lines().map(str::to_owned).collect())
}

/// Write `key\tvalue\n` records in list order.
pub fn write_pairs_tsv<P: AsRef<Path>>(path: P, pairs: &KvList) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for pair in pairs {
        writeln!(out, "{}\t{}", pair.key, pair.value)?;
    }
    out.flush()?;
    Ok(())
}
