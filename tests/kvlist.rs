use granary::mapreduce::{hash_key, route, Group, KvList, KvPair, KEY_MAX, PARTITIONS, VALUE_MAX};
use granary::testing::assert_pairs_equal;

#[test]
fn push_copies_and_preserves_order() {
    let mut list = KvList::new();
    list.push("b", "2");
    list.push("a", "1");
    assert_eq!(list.len(), 2);
    assert_pairs_equal(&list, &[("b", "2"), ("a", "1")]);
}

/// Oversized strings are clipped to the bounded maxima.
#[test]
fn push_truncates_to_bounds() {
    let long_key = "k".repeat(KEY_MAX + 50);
    let long_value = "v".repeat(VALUE_MAX + 1);

    let mut list = KvList::new();
    list.push(&long_key, &long_value);

    let pair = list.iter().next().unwrap();
    assert_eq!(pair.key.len(), KEY_MAX);
    assert_eq!(pair.value.len(), VALUE_MAX);
}

/// Truncation never splits a multibyte character.
#[test]
fn truncation_respects_char_boundaries() {
    // Two bytes per char, so an odd byte limit falls mid-char.
    let key = "é".repeat(KEY_MAX); // 2 * KEY_MAX bytes
    let mut list = KvList::new();
    list.push(&key, "x");

    let pair = list.iter().next().unwrap();
    assert!(pair.key.len() <= KEY_MAX);
    assert!(pair.key.is_char_boundary(pair.key.len()));
    assert!(pair.key.chars().all(|c| c == 'é'));
}

#[test]
fn grows_past_initial_capacity() {
    let mut list = KvList::new();
    for i in 0..500 {
        list.push(&format!("key{i}"), "v");
    }
    assert_eq!(list.len(), 500);
}

#[test]
fn sort_is_lexicographic_by_key() {
    let mut list = KvList::new();
    list.push("pear", "3");
    list.push("apple", "1");
    list.push("banana", "2");
    list.push("apple", "0");
    list.sort_by_key();

    let keys: Vec<&str> = list.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(keys, vec!["apple", "apple", "banana", "pear"]);
}

#[test]
fn emitter_appends_through_the_capability() {
    let mut list = KvList::new();
    {
        let mut emit = list.emitter();
        emit.emit("x", "1");
        emit.emit("y", "2");
    }
    assert_pairs_equal(&list, &[("x", "1"), ("y", "2")]);
}

#[test]
fn group_exposes_the_value_slots() {
    let pairs = vec![
        KvPair {
            key: "w".to_owned(),
            value: "1".to_owned(),
        },
        KvPair {
            key: "w".to_owned(),
            value: "2".to_owned(),
        },
    ];
    let group = Group::new(&pairs);
    assert_eq!(group.len(), 2);
    assert!(!group.is_empty());
    assert_eq!(group.values().collect::<Vec<_>>(), vec!["1", "2"]);
}

/// djb2 reference values.
#[test]
fn hash_is_djb2() {
    assert_eq!(hash_key(""), 5381);
    assert_eq!(hash_key("a"), 5381 * 33 + 97);
    assert_eq!(hash_key("ab"), (5381 * 33 + 97) * 33 + 98);
}

#[test]
fn route_stays_in_range() {
    for key in ["", "a", "some longer key", "éàü"] {
        assert!(route(key) < PARTITIONS);
    }
}

/// Sanity check, not a strict bound: a diverse key population lands
/// reasonably evenly across the partitions.
#[test]
fn hash_distribution_is_roughly_balanced() {
    let mut counts = [0usize; PARTITIONS];
    let total = 2000;
    for i in 0..total {
        let key = format!("key-{}-{}", i, i * i);
        counts[route(&key)] += 1;
    }

    let average = total / PARTITIONS;
    let populated = counts.iter().filter(|&&c| c > 0).count();
    assert!(
        populated >= PARTITIONS * 3 / 4,
        "too many empty partitions: {counts:?}"
    );
    let max = counts.iter().copied().max().unwrap();
    assert!(
        max <= average * 4,
        "partition skew too high: max {max}, average {average}, counts {counts:?}"
    );
}
