//! Assertion functions for comparing job outputs with expected pairs.

use crate::mapreduce::kv::KvList;

/// Assert that a list matches the expected pairs exactly, in order.
///
/// # Panics
///
/// Panics with a detailed message if length or content differ.
///
/// # Example
///
/// ```
/// use granary::KvList;
/// use granary::testing::assert_pairs_equal;
///
/// let mut list = KvList::new();
/// list.push("a", "1");
/// list.push("b", "2");
/// assert_pairs_equal(&list, &[("a", "1"), ("b", "2")]);
/// ```
pub fn assert_pairs_equal(actual: &KvList, expected: &[(&str, &str)]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "pair list length mismatch:\n  expected length: {}\n  actual length: {}\n  expected: {expected:?}\n  actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (pair, (ek, ev))) in actual.iter().zip(expected.iter()).enumerate() {
        assert!(
            pair.key == *ek && pair.value == *ev,
            "pair mismatch at index {i}:\n  expected: ({ek:?}, {ev:?})\n  actual: ({:?}, {:?})",
            pair.key,
            pair.value
        );
    }
}

/// Assert that a list matches the expected pairs, ignoring order.
///
/// Both sides are sorted by key and then value before comparison, so this
/// is the right check for reduce output, which carries no cross-partition
/// ordering guarantee.
///
/// # Panics
///
/// Panics with a detailed message if the multisets differ.
pub fn assert_pairs_unordered_equal(actual: &KvList, expected: &[(&str, &str)]) {
    let mut actual_pairs: Vec<(&str, &str)> = actual
        .iter()
        .map(|p| (p.key.as_str(), p.value.as_str()))
        .collect();
    let mut expected_pairs: Vec<(&str, &str)> = expected.to_vec();
    actual_pairs.sort_unstable();
    expected_pairs.sort_unstable();

    assert_eq!(
        actual_pairs, expected_pairs,
        "pair multiset mismatch (both sides sorted)"
    );
}

/// Sorted `(key, value)` snapshot of a list, for comparing two job runs.
pub fn sorted_pairs(list: &KvList) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = list
        .iter()
        .map(|p| (p.key.clone(), p.value.clone()))
        .collect();
    pairs.sort_unstable();
    pairs
}
