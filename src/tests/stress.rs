use super::validate;
use crate::{TrieSet, TrieSetBuilder};

/// Insert all, verify all, remove all.
#[test]
fn ten_thousand_keys() {
    let mut set = TrieSet::new();
    for i in 0_u64..10_000 {
        set = set.try_add(i);
    }
    assert_eq!(set.len(), 10_000);
    validate(&set);

    for i in 0_u64..10_000 {
        assert!(set.contains(&i), "missing key {i}");
    }

    for i in 0_u64..10_000 {
        let next = set.remove(&i);
        assert_eq!(next.len(), set.len() - 1, "failed to remove key {i}");
        set = next;
    }
    assert!(set.is_empty());
    validate(&set);
}

/// Insert, re-insert and remove interleaved.
#[test]
fn interleaved_operations() {
    let mut builder = TrieSetBuilder::new();
    builder.extend(0_u64..2000);
    // Re-inserting is a no-op.
    builder.extend((0_u64..2000).step_by(2));
    // Remove odd keys.
    for i in (1_u64..2000).step_by(2) {
        assert!(builder.remove(&i));
    }
    let set = builder.build();

    assert_eq!(set.len(), 1000);
    assert!((0_u64..2000).all(|i| set.contains(&i) == (i % 2 == 0)));
    validate(&set);
}

#[test]
fn string_keys() {
    let keys: Vec<String> = (0..3000).map(|i| format!("key-{i:05}")).collect();
    let set: TrieSet<String> = keys.iter().cloned().collect();

    assert_eq!(set.len(), keys.len());
    assert!(keys.iter().all(|k| set.contains(k.as_str())));
    assert_eq!(set.iter().count(), keys.len());
    validate(&set);
}
