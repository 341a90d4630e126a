//! Full-width stress: the maximum worker pool over a generated corpus,
//! compared against a single-worker run of the same job.

use anyhow::Result;
use granary::mapreduce::{builtin, Job, MAX_WORKERS};
use granary::testing::{generated_corpus, sorted_pairs};
use mark_flaky_tests::flaky;

const LINES: usize = 400;
const WORDS_PER_LINE: usize = 12;

#[flaky]
#[test]
fn max_workers_matches_single_worker() {
    let corpus = generated_corpus(LINES, WORDS_PER_LINE);

    let mut single = Job::new(1, builtin::word_count_map, builtin::word_count_reduce).unwrap();
    single.ingest_lines(corpus.clone());
    single.run().unwrap();
    let expected = sorted_pairs(&single.take_output());

    let mut wide =
        Job::new(MAX_WORKERS, builtin::word_count_map, builtin::word_count_reduce).unwrap();
    wide.ingest_lines(corpus);
    wide.run().unwrap();
    let actual = sorted_pairs(&wide.take_output());

    assert_eq!(actual, expected);
}

/// The report accounts for every pair that moved through the job.
#[cfg(feature = "report")]
#[test]
fn report_totals_add_up() -> Result<()> {
    let corpus = generated_corpus(LINES, WORDS_PER_LINE);
    let mut job = Job::new(MAX_WORKERS, builtin::word_count_map, builtin::word_count_reduce)?;
    job.ingest_lines(corpus);
    job.run()?;

    let report = job.report().expect("run populates the report").clone();
    assert_eq!(report.workers, MAX_WORKERS);
    assert_eq!(report.input_pairs, LINES);
    // One emission per word in the corpus.
    assert_eq!(report.intermediate_pairs, LINES * WORDS_PER_LINE);
    assert_eq!(
        report.partition_sizes.iter().sum::<usize>(),
        report.intermediate_pairs
    );

    let output = job.take_output();
    assert_eq!(report.output_pairs, output.len());

    // Reduced counts re-total to the number of mapped words.
    let total: u64 = output
        .iter()
        .map(|p| p.value.parse::<u64>().unwrap())
        .sum();
    assert_eq!(total, (LINES * WORDS_PER_LINE) as u64);
    Ok(())
}
