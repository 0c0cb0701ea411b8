use super::tests::validate_array;
use super::*;

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Narrow key range so inserts, removals and lookups keep colliding.
fn key_strategy() -> impl Strategy<Value = i32> {
    -48i32..48
}

fn capacity_strategy() -> impl Strategy<Value = usize> {
    0usize..=6
}

#[derive(Clone, Debug, Arbitrary)]
enum Op {
    #[proptest(weight = 50)]
    Insert(#[proptest(strategy = "key_strategy()")] i32, u64),
    #[proptest(weight = 30)]
    Remove(#[proptest(strategy = "key_strategy()")] i32),
    #[proptest(weight = 15)]
    Get(#[proptest(strategy = "key_strategy()")] i32),
    #[proptest(weight = 2)]
    Size,
    #[proptest(weight = 2)]
    Compact,
    #[proptest(weight = 1)]
    Clear,
}

fn ops_strategy() -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(any::<Op>(), 0..=1500)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        max_shrink_iters: 50_000,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_equivalence_btreemap(capacity in capacity_strategy(), ops in ops_strategy()) {
        let mut a: SparseArray<u64> = SparseArray::with_capacity(capacity);
        let mut m: BTreeMap<i32, u64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(key, value) => {
                    prop_assert_eq!(a.insert(key, value), m.insert(key, value));
                }
                Op::Remove(key) => {
                    prop_assert_eq!(a.remove(key), m.remove(&key));
                    prop_assert_eq!(a.get(key), None);
                }
                Op::Get(key) => {
                    prop_assert_eq!(a.get(key), m.get(&key));
                    prop_assert_eq!(a.contains_key(key), m.contains_key(&key));
                }
                Op::Size => {
                    prop_assert_eq!(a.size(), m.len());
                    prop_assert!(!a.has_garbage());
                }
                Op::Compact => {
                    let pending = a.tombstones();
                    prop_assert_eq!(a.compact(), pending);
                }
                Op::Clear => {
                    let capacity = a.capacity();
                    a.clear();
                    m.clear();
                    prop_assert_eq!(a.capacity(), capacity);
                }
            }

            prop_assert_eq!(a.len(), m.len());
        }

        validate_array(&a);
        let got: Vec<(i32, u64)> = a.iter().map(|(k, v)| (k, *v)).collect();
        let expected: Vec<(i32, u64)> = m.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(&got, &expected);

        a.compact();
        validate_array(&a);
        let compacted: Vec<(i32, u64)> = a.iter().map(|(k, v)| (k, *v)).collect();
        prop_assert_eq!(compacted, expected);
    }

    #[test]
    fn prop_remove_idempotent(keys in prop::collection::vec(key_strategy(), 0..200), victim in key_strategy()) {
        let mut once: SparseArray<u64> = keys.iter().map(|&k| (k, k as u64)).collect();
        let mut twice = once.clone();

        once.remove(victim);
        twice.remove(victim);
        twice.remove(victim);

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(once.tombstones(), twice.tombstones());
        prop_assert_eq!(twice.get(victim), None);
        prop_assert_eq!(once.size(), twice.size());
    }

    #[test]
    fn prop_owned_values_released_once(capacity in capacity_strategy(), ops in ops_strategy()) {
        let token = Rc::new(());
        let mut a: SparseArray<Rc<()>> = SparseArray::with_capacity(capacity);

        for op in ops {
            match op {
                Op::Insert(key, _) => {
                    // The displaced value, if any, drops here.
                    a.insert(key, Rc::clone(&token));
                }
                Op::Remove(key) => {
                    a.remove(key);
                }
                Op::Get(key) => {
                    let _ = a.get(key);
                }
                Op::Size => {
                    a.size();
                }
                Op::Compact => {
                    a.compact();
                }
                Op::Clear => a.clear(),
            }

            prop_assert_eq!(Rc::strong_count(&token), 1 + a.len());
        }

        drop(a);
        prop_assert_eq!(Rc::strong_count(&token), 1);
    }

    #[test]
    fn prop_swap_and_take_preserve_contents(
        left in prop::collection::vec((key_strategy(), any::<u64>()), 0..64),
        right in prop::collection::vec((key_strategy(), any::<u64>()), 0..64),
        drop_left in prop::collection::vec(key_strategy(), 0..16),
    ) {
        let mut a: SparseArray<u64> = left.iter().copied().collect();
        let mut b: SparseArray<u64> = right.iter().copied().collect();
        for key in &drop_left {
            a.remove(*key);
        }
        let a_before: Vec<(i32, u64)> = a.iter().map(|(k, v)| (k, *v)).collect();
        let b_before: Vec<(i32, u64)> = b.iter().map(|(k, v)| (k, *v)).collect();

        a.swap(&mut b);
        validate_array(&a);
        validate_array(&b);
        prop_assert!(!a.has_garbage() && !b.has_garbage());
        prop_assert_eq!(a.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>(), b_before);
        prop_assert_eq!(b.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>(), a_before.clone());

        let taken = b.take();
        prop_assert!(b.is_empty());
        prop_assert_eq!(b.capacity(), DEFAULT_CAPACITY);
        prop_assert_eq!(taken.iter().map(|(k, v)| (k, *v)).collect::<Vec<_>>(), a_before);
    }
}
