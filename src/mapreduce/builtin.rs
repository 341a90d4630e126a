//! Built-in map/reduce function pairs.
//!
//! These back the command-line driver and double as realistic fixtures
//! for the integration tests. Both reducers sum decimal counts, so they
//! are trivially commutative and associative, which is what makes the
//! output independent of the worker count.

use crate::mapreduce::kv::{Emitter, Group};
use regex::Regex;
use std::sync::OnceLock;

fn word_pattern() -> &'static Regex {
    static WORD: OnceLock<Regex> = OnceLock::new();
    WORD.get_or_init(|| Regex::new(r"[\p{Alphabetic}\p{N}']+").expect("word pattern compiles"))
}

/// Emit `(word, "1")` for every word in the line, lowercased.
pub fn word_count_map(_key: &str, value: &str, emit: &mut Emitter<'_>) {
    for m in word_pattern().find_iter(value) {
        emit.emit(&m.as_str().to_lowercase(), "1");
    }
}

/// Sum the counts for one word.
pub fn word_count_reduce(key: &str, values: &Group<'_>, emit: &mut Emitter<'_>) {
    emit.emit(key, &sum_counts(values).to_string());
}

/// Emit `(char, "1")` for every alphabetic character, lowercased.
pub fn char_freq_map(_key: &str, value: &str, emit: &mut Emitter<'_>) {
    let mut buf = [0u8; 4];
    for c in value.chars().filter(|c| c.is_alphabetic()) {
        for lc in c.to_lowercase() {
            emit.emit(lc.encode_utf8(&mut buf), "1");
        }
    }
}

/// Sum the counts for one character.
pub fn char_freq_reduce(key: &str, values: &Group<'_>, emit: &mut Emitter<'_>) {
    emit.emit(key, &sum_counts(values).to_string());
}

fn sum_counts(values: &Group<'_>) -> u64 {
    values
        .values()
        .map(|v| v.parse::<u64>().unwrap_or(0))
        .sum()
}
