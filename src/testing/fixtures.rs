//! Canned corpora for MapReduce tests.

/// The three-line word count corpus used across the integration tests.
///
/// Expected counts: `brown:1 dog:1 fox:2 jumps:1 lazy:1 quick:1 the:3`.
#[must_use]
pub fn fox_lines() -> Vec<String> {
    vec![
        "the quick brown fox".to_owned(),
        "the lazy dog".to_owned(),
        "the fox jumps".to_owned(),
    ]
}

/// A single mixed-case line for character frequency tests.
///
/// Expected counts: `a:2 b:2 c:2`.
#[must_use]
pub fn mixed_case_line() -> Vec<String> {
    vec!["AbcAbc".to_owned()]
}

/// Generate a larger corpus by cycling a fixed vocabulary, `words_per_line`
/// words across `lines` lines. Deterministic, so two runs over it are
/// comparable.
#[must_use]
pub fn generated_corpus(lines: usize, words_per_line: usize) -> Vec<String> {
    const VOCABULARY: [&str; 12] = [
        "grain", "mill", "stone", "water", "wheel", "flour", "harvest", "barley", "oat", "rye",
        "chaff", "husk",
    ];
    (0..lines)
        .map(|line| {
            (0..words_per_line)
                .map(|w| VOCABULARY[(line * 7 + w * 3) % VOCABULARY.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}
