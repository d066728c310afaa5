use primehash::{
    HashTable, TableConfig, TableError, TableExtensions,
    prime::{Primality, is_prime},
    try_from_iter,
};

fn key(i: usize) -> String {
    format!("key-{i}")
}

#[test]
fn base_fifty_grows_to_a_prime_above_one_hundred() {
    let mut table = HashTable::new();
    assert_eq!(table.base_size(), 50);
    assert_eq!(table.size(), 53);

    for i in 0..40 {
        table.insert(key(i), format!("value-{i}")).unwrap();
        assert_eq!(is_prime(table.size()), Primality::Prime);
    }

    assert!(table.size() >= 100);
    assert_eq!(table.size(), 101);
    assert_eq!(table.len(), 40);
    for i in 0..40 {
        assert_eq!(table.search(&key(i)).unwrap(), Some(format!("value-{i}").as_str()));
    }
}

#[test]
fn resize_keeps_last_written_values() {
    let mut table = HashTable::new();
    for i in 0..30 {
        table.insert(key(i), "first").unwrap();
    }
    for i in 0..30 {
        table.insert(key(i), "second").unwrap();
    }
    assert_eq!(table.len(), 30);

    // Push through two grows
    for i in 30..120 {
        table.insert(key(i), "first").unwrap();
    }
    assert_eq!(table.size_index(), 2);

    for i in 0..30 {
        assert_eq!(table.search(&key(i)).unwrap(), Some("second"));
    }
    for i in 30..120 {
        assert_eq!(table.search(&key(i)).unwrap(), Some("first"));
    }
}

#[test]
fn count_tracks_distinct_keys() {
    let mut table = HashTable::new();
    let mut expected = std::collections::HashSet::new();

    for round in 0..5 {
        for i in 0..60 {
            let k = key((i * 7 + round) % 80);
            table.insert(k.as_str(), round.to_string()).unwrap();
            expected.insert(k);
            assert_eq!(table.len(), expected.len());
        }
        for i in (0..80).step_by(3) {
            let k = key(i);
            table.delete(&k).unwrap();
            expected.remove(&k);
            assert_eq!(table.len(), expected.len());
        }
    }
}

#[test]
fn shrink_stops_at_configured_floor() {
    let config = TableConfig::new().with_initial_base_size(20);
    let mut table = HashTable::with_config(config).unwrap();
    assert_eq!(table.size(), 23);

    for i in 0..300 {
        table.insert(key(i), "value").unwrap();
    }
    assert!(table.base_size() > 20);

    for i in 0..300 {
        table.delete(&key(i)).unwrap();
        assert!(table.base_size() >= 20);
    }

    assert!(table.is_empty());
    assert_eq!(table.base_size(), 20);
    assert_eq!(table.size(), 23);
}

#[test]
fn churn_at_the_floor_keeps_lookups_bounded() {
    let mut table = HashTable::new();

    // Tombstones pile up because a table at its floor never shrinks
    for i in 0..1_000 {
        table.insert(key(i), "value").unwrap();
        table.delete(&key(i)).unwrap();
    }

    assert!(table.is_empty());
    assert_eq!(table.size(), 53);
    assert!(table.tombstones() > 0);
    assert!(table.tombstones() <= table.size());
    assert_eq!(table.search("never inserted").unwrap(), None);
    assert!(table.probe_count("never inserted") <= table.size());

    table.compact().unwrap();
    assert_eq!(table.tombstones(), 0);
    assert_eq!(table.probe_count("never inserted"), 1);
}

#[test]
fn malformed_keys_are_rejected_without_side_effects() {
    let mut table = try_from_iter([("a", "1"), ("b", "2")]).unwrap();

    assert!(matches!(table.insert("", "value"), Err(TableError::EmptyKey)));
    assert!(matches!(table.delete(""), Err(TableError::EmptyKey)));
    assert_eq!(table.len(), 2);
    assert!(table.contains_key("a"));
    assert!(table.contains_key("b"));
}
