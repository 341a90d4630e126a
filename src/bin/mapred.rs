//! Demonstration driver: run a built-in MapReduce job over a text file.
//!
//! ```text
//! mapred <input_file> <output_file> [word_count|char_freq]
//! ```
//!
//! Each input line becomes one input pair, keyed by its decimal line
//! index. Results are written as `key\tvalue\n` records, sorted by key
//! for readability. Exit code 0 on success, 1 on usage error, 2 on any
//! I/O or job failure.

use anyhow::Result;
use granary::io::{load_lines, write_pairs_tsv};
use granary::mapreduce::{builtin, default_workers, Emitter, Group, Job};
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 || args.len() > 4 {
        usage(&args[0]);
    }

    let kind = args.get(3).map(String::as_str).unwrap_or("word_count");
    type Map = fn(&str, &str, &mut Emitter<'_>);
    type Reduce = fn(&str, &Group<'_>, &mut Emitter<'_>);
    let (map_fn, reduce_fn): (Map, Reduce) = match kind {
        "word_count" => (builtin::word_count_map, builtin::word_count_reduce),
        "char_freq" => (builtin::char_freq_map, builtin::char_freq_reduce),
        _ => usage(&args[0]),
    };

    if let Err(err) = run(&args[1], &args[2], map_fn, reduce_fn) {
        eprintln!("mapred: {err:#}");
        process::exit(2);
    }
}

fn usage(program: &str) -> ! {
    eprintln!("usage: {program} <input_file> <output_file> [word_count|char_freq]");
    process::exit(1);
}

fn run(
    input: &str,
    output: &str,
    map_fn: fn(&str, &str, &mut Emitter<'_>),
    reduce_fn: fn(&str, &Group<'_>, &mut Emitter<'_>),
) -> Result<()> {
    let lines = load_lines(input)?;

    let mut job = Job::new(default_workers(), map_fn, reduce_fn)?;
    job.ingest_lines(lines);
    job.run()?;

    #[cfg(feature = "report")]
    if let Some(report) = job.report() {
        report.print();
    }

    let mut results = job.take_output();
    results.sort_by_key();
    write_pairs_tsv(output, &results)?;
    Ok(())
}
