use crate::{TrieError, TrieMap, UpdateKind};

#[test]
fn get_and_contains() {
    let map = TrieMap::new().insert(String::from("a"), 1).insert(String::from("b"), 2);
    assert_eq!(map.get("a"), Some(&1));
    assert_eq!(map.get("z"), None);
    assert!(map.contains_key("b"));
    assert_eq!(map.get_key_value("b"), Some((&String::from("b"), &2)));
    assert_eq!(map.get_or_err("z"), Err(TrieError::KeyNotFound));
    assert_eq!(map["a"], 1);
}

#[test]
fn strict_add_rejects_present_key() {
    let map = TrieMap::new().insert(1, "one");
    assert_eq!(map.add(1, "uno").unwrap_err(), TrieError::KeyAlreadyExists);
    let grown = map.add(2, "two").expect("absent key");
    assert_eq!(grown.len(), 2);
}

#[test]
fn update_reports_previous_value() {
    let map = TrieMap::new().insert("k", 1);
    let (_, previous) = map.update(UpdateKind::SetItem, "k", 2).expect("present");
    assert_eq!(previous, Some(1));
    let (_, previous) = map.update(UpdateKind::TryAdd, "k", 3).expect("infallible");
    assert_eq!(previous, None);
}

#[test]
fn remove_entry_returns_value() {
    let map = TrieMap::new().insert("a", 10).insert("b", 20);
    let (rest, removed) = map.remove_entry("a");
    assert_eq!(removed, Some(10));
    assert_eq!(rest.len(), 1);
    assert!(map.contains_key("a"));

    let (same, missing) = rest.remove_entry("zz");
    assert_eq!(missing, None);
    assert_eq!(same, rest);
}

#[test]
fn keys_and_values() {
    let map: TrieMap<i32, i32> = (0..10).map(|i| (i, i * i)).collect();
    let mut keys: Vec<i32> = map.keys().copied().collect();
    let mut values: Vec<i32> = map.values().copied().collect();
    keys.sort_unstable();
    values.sort_unstable();
    assert_eq!(keys, (0..10).collect::<Vec<_>>());
    assert_eq!(values, (0..10).map(|i| i * i).collect::<Vec<_>>());
    assert_eq!(map.iter().len(), 10);
}

#[test]
fn iteration_pairs_keys_with_values() {
    let map: TrieMap<u32, u32> = (0..300).map(|i| (i, i + 1)).collect();
    assert!(map.iter().all(|(k, v)| *v == k + 1));
    assert!(map.clone().into_iter().all(|(k, v)| v == k + 1));
}

#[test]
fn union_is_left_biased() {
    let left = TrieMap::new().insert(1, "left").insert(2, "left");
    let right = TrieMap::new().insert(2, "right").insert(3, "right");
    let merged = left.union(&right);

    assert_eq!(merged.len(), 3);
    assert_eq!(merged.get(&1), Some(&"left"));
    assert_eq!(merged.get(&2), Some(&"left"));
    assert_eq!(merged.get(&3), Some(&"right"));
}

#[test]
fn union_with_empty() {
    let empty = TrieMap::new();
    let right = TrieMap::new().insert(1, 1);
    assert_eq!(empty.union(&right), right);
    assert_eq!(right.union(&empty), right);
}

#[test]
fn extend_overwrites() {
    let mut map = TrieMap::new().insert("a", 1);
    map.extend([("a", 2), ("b", 3)]);
    assert_eq!(map.get("a"), Some(&2));
    assert_eq!(map.len(), 2);
}

#[test]
fn values_affect_content_hash() {
    let a = TrieMap::new().insert(1, 10);
    let b = TrieMap::new().insert(1, 11);
    assert_ne!(a.content_hash(), b.content_hash());
    assert_eq!(a.content_hash(), b.insert(1, 10).content_hash());
}

#[test]
fn builder_roundtrip() {
    let map: TrieMap<i32, i32> = (0..50).map(|i| (i, i)).collect();
    let mut builder = map.to_builder();
    assert_eq!(builder.insert(0, 100), Some(0));
    assert_eq!(builder.remove(&1), Some(1));
    let rebuilt = builder.build();

    assert_eq!(rebuilt.get(&0), Some(&100));
    assert!(!rebuilt.contains_key(&1));
    assert_eq!(map.get(&0), Some(&0));
    assert_eq!(map.len(), 50);
}

#[test]
fn insert_entry_returns_previous_value() {
    let (map, previous) = TrieMap::new().insert_entry("k", 1);
    assert_eq!(previous, None);
    let (updated, previous) = map.insert_entry("k", 2);
    assert_eq!(previous, Some(1));
    assert_eq!(updated.get("k"), Some(&2));
    assert_eq!(map.get("k"), Some(&1));
}
