use rstest::rstest;

use super::validate;
use crate::TrieSet;

fn set(keys: &[i32]) -> TrieSet<i32> {
    keys.iter().copied().collect()
}

#[test]
fn operations_on_overlapping_sets() {
    let a = set(&[1, 2, 3]);
    let b = set(&[2, 3, 4]);

    assert_eq!(a.union(&b), set(&[1, 2, 3, 4]));
    assert_eq!(a.intersection(&b), set(&[2, 3]));
    assert_eq!(a.difference(&b), set(&[1]));
    assert_eq!(a.symmetric_difference(&b), set(&[1, 4]));

    for result in [
        a.union(&b),
        a.intersection(&b),
        a.difference(&b),
        a.symmetric_difference(&b),
    ] {
        validate(&result);
    }
}

#[test]
fn operands_are_not_modified() {
    let a = set(&[1, 2, 3]);
    let b = set(&[2, 3, 4]);
    let _ = a.union(&b);
    let _ = a.difference(&b);
    let _ = a.symmetric_difference(&b);
    assert_eq!(a, set(&[1, 2, 3]));
    assert_eq!(b, set(&[2, 3, 4]));
}

#[test]
fn union_with_empty_returns_other() {
    let empty = TrieSet::new();
    let b = set(&[5, 6]);
    assert!(empty.union(&b).ptr_eq(&b));
    assert_eq!(b.union(&empty), b);
}

#[test]
fn union_iter_adds_missing_keys() {
    let a = set(&[1, 2]);
    let grown = a.union_iter([2, 3, 3, 4]);
    assert_eq!(grown, set(&[1, 2, 3, 4]));
    validate(&grown);
}

/// Both strategies of `difference` agree.
#[rstest]
#[case::small_other(&[1, 2, 3, 4, 5, 6], &[2, 4], &[1, 3, 5, 6])]
#[case::large_other(&[1, 2], &[2, 4, 6, 8], &[1])]
#[case::disjoint(&[1, 2], &[3, 4], &[1, 2])]
#[case::everything(&[1, 2], &[1, 2], &[])]
fn difference_cases(#[case] a: &[i32], #[case] b: &[i32], #[case] expected: &[i32]) {
    let result = set(a).difference(&set(b));
    assert_eq!(result, set(expected));
    validate(&result);
}

#[test]
fn symmetric_difference_is_commutative() {
    let a: TrieSet<i32> = (0..200).collect();
    let b: TrieSet<i32> = (100..300).collect();
    assert_eq!(a.symmetric_difference(&b), b.symmetric_difference(&a));
    assert_eq!(a.symmetric_difference(&b).len(), 200);
}

#[test]
fn self_operations() {
    let a: TrieSet<i32> = (0..40).collect();
    assert_eq!(a.union(&a), a);
    assert_eq!(a.intersection(&a), a);
    assert!(a.difference(&a).is_empty());
    assert!(a.symmetric_difference(&a).is_empty());
}

// ---------------------------------------------------------------------------
// Relations
// ---------------------------------------------------------------------------

#[rstest]
#[case::empty_empty(&[], &[], true, false, true, false, false)]
#[case::empty_nonempty(&[], &[1], true, true, false, false, false)]
#[case::nonempty_empty(&[1], &[], false, false, true, true, false)]
#[case::equal(&[1, 2], &[2, 1], true, false, true, false, true)]
#[case::strict_subset(&[1], &[1, 2], true, true, false, false, true)]
#[case::strict_superset(&[1, 2, 3], &[3], false, false, true, true, true)]
#[case::partial_overlap(&[1, 2], &[2, 3], false, false, false, false, true)]
#[case::disjoint(&[1], &[2], false, false, false, false, false)]
#[allow(clippy::fn_params_excessive_bools)]
fn relations(
    #[case] a: &[i32],
    #[case] b: &[i32],
    #[case] subset: bool,
    #[case] proper_subset: bool,
    #[case] superset: bool,
    #[case] proper_superset: bool,
    #[case] overlaps: bool,
) {
    let (a, b) = (set(a), set(b));
    assert_eq!(a.is_subset(&b), subset, "is_subset");
    assert_eq!(a.is_proper_subset(&b), proper_subset, "is_proper_subset");
    assert_eq!(a.is_superset(&b), superset, "is_superset");
    assert_eq!(a.is_proper_superset(&b), proper_superset, "is_proper_superset");
    assert_eq!(a.overlaps(&b), overlaps, "overlaps");
}

#[test]
fn set_equals_ignores_construction_order() {
    let forward: TrieSet<i32> = (0..500).collect();
    let backward: TrieSet<i32> = (0..500).rev().collect();
    assert!(forward.set_equals(&backward));
    assert!(!forward.set_equals(&forward.remove(&7)));
    assert!(!forward.remove(&7).set_equals(&forward));
}

#[test]
fn singleton_holds_one_key() {
    let one: TrieSet<&str> = TrieSet::singleton("only");
    assert_eq!(one.len(), 1);
    assert!(one.contains("only"));
    assert!(one.is_proper_subset(&one.try_add("other")));
}
