use anyhow::Result;
use granary::io::{load_lines, write_pairs_tsv};
use granary::mapreduce::{builtin, Job, KvList};
use granary::testing::fox_lines;
use std::fs;
use tempfile::TempDir;

#[test]
fn load_lines_strips_newlines() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("input.txt");
    fs::write(&path, "first line\nsecond line\n\nlast line")?;

    let lines = load_lines(&path)?;
    assert_eq!(lines, vec!["first line", "second line", "", "last line"]);
    Ok(())
}

#[test]
fn load_lines_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.txt");
    assert!(load_lines(&missing).is_err());
}

#[test]
fn write_pairs_is_tab_separated() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("out.tsv");

    let mut pairs = KvList::new();
    pairs.push("fox", "2");
    pairs.push("the", "3");
    write_pairs_tsv(&path, &pairs)?;

    assert_eq!(fs::read_to_string(&path)?, "fox\t2\nthe\t3\n");
    Ok(())
}

#[test]
fn write_empty_list_writes_empty_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("empty.tsv");
    write_pairs_tsv(&path, &KvList::new())?;
    assert_eq!(fs::read_to_string(&path)?, "");
    Ok(())
}

/// End to end: file in, word counts out, the way the driver wires it.
#[test]
fn file_to_file_word_count() -> Result<()> {
    let dir = TempDir::new()?;
    let input = dir.path().join("corpus.txt");
    let output = dir.path().join("counts.tsv");
    fs::write(&input, fox_lines().join("\n"))?;

    let mut job = Job::new(4, builtin::word_count_map, builtin::word_count_reduce)?;
    job.ingest_lines(load_lines(&input)?);
    job.run()?;

    let mut results = job.take_output();
    results.sort_by_key();
    write_pairs_tsv(&output, &results)?;

    let written = fs::read_to_string(&output)?;
    assert_eq!(
        written,
        "brown\t1\ndog\t1\nfox\t2\njumps\t1\nlazy\t1\nquick\t1\nthe\t3\n"
    );
    Ok(())
}
