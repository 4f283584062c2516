#![cfg(test)]

// Property tests for OrderedStringMap kept inside the crate so they can
// check bucket-table invariants that the public API does not expose.

use crate::ordered_string_map::OrderedStringMap;
use crate::DefaultHashBuilder;
use proptest::prelude::*;
use std::collections::HashMap;

// Pool-indexed operations so that shrinking converges on earlier keys.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    InsertWith(usize, i32),
    Find(usize),
    Contains(String),
    Mutate(usize, i32),
    Clear,
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::InsertWith(i, v)),
            3 => idx.clone().prop_map(Op::Find),
            2 => prop_oneof![
                contains_pool.prop_map(|s: String| s),
                "[a-z]{0,5}".prop_map(|s| s)
            ]
            .prop_map(Op::Contains),
            2 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            1 => Just(Op::Clear),
            1 => Just(Op::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: state-machine equivalence against an insertion-ordered model
// (Vec of pairs plus a key -> position HashMap).
// Invariants exercised after every operation:
// - Duplicate inserts return Ok(false) and leave the log untouched.
// - `find` returns the model position; `contains_key`/`count` agree.
// - Iteration order equals insertion order.
// - Bucket count is a power of two and at least twice the entry count,
//   and every entry is reachable from its cached hash.
// - `clear` followed by reinsertion behaves like a fresh map.
fn run_scenario<const LOG2: u32>(pool: &[String], ops: &[Op]) -> Result<(), TestCaseError> {
    let mut sut: OrderedStringMap<i32, u32, DefaultHashBuilder, LOG2> =
        OrderedStringMap::with_hasher(DefaultHashBuilder::default());
    let mut order: Vec<(String, i32)> = Vec::new();
    let mut pos: HashMap<String, usize> = HashMap::new();

    for op in ops {
        match op {
            Op::Insert(i, v) | Op::InsertWith(i, v) => {
                let k = &pool[*i];
                let already = pos.contains_key(k);
                let res = if matches!(op, Op::Insert(..)) {
                    sut.insert(k, *v)
                } else {
                    sut.insert_with(k, || *v)
                };
                prop_assert_eq!(res, Ok(!already));
                if !already {
                    pos.insert(k.clone(), order.len());
                    order.push((k.clone(), *v));
                }
            }
            Op::Find(i) => {
                let k = &pool[*i];
                prop_assert_eq!(sut.find(k), pos.get(k).copied());
                prop_assert_eq!(sut.get(k), pos.get(k).map(|&p| &order[p].1));
            }
            Op::Contains(s) => {
                let present = pos.contains_key(s);
                prop_assert_eq!(sut.contains_key(s), present);
                prop_assert_eq!(sut.count(s), usize::from(present));
            }
            Op::Mutate(i, d) => {
                let k = &pool[*i];
                if let Some(&p) = pos.get(k) {
                    let v = sut.get_mut(k).expect("present in map");
                    *v = v.wrapping_add(*d);
                    order[p].1 = order[p].1.wrapping_add(*d);
                } else {
                    prop_assert!(sut.get_mut(k).is_none());
                }
            }
            Op::Clear => {
                sut.clear();
                order.clear();
                pos.clear();
            }
            Op::Iterate => {
                let seen: Vec<(String, i32)> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                prop_assert_eq!(&seen, &order);
            }
        }

        prop_assert_eq!(sut.len(), order.len());
        prop_assert_eq!(sut.is_empty(), order.is_empty());
        sut.check_invariants();
    }

    for (p, (k, v)) in order.iter().enumerate() {
        prop_assert_eq!(sut.get_index(p), Some((k.as_str(), v)));
        prop_assert_eq!(sut[p], *v);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_default_table((pool, ops) in arb_scenario()) {
        run_scenario::<6>(&pool, &ops)?;
    }

    #[test]
    fn prop_state_machine_tiny_table((pool, ops) in arb_scenario()) {
        run_scenario::<1>(&pool, &ops)?;
    }

    // Property: a fresh map and a cleared-then-refilled map agree on every
    // lookup and on iteration order.
    #[test]
    fn prop_clear_then_refill_matches_fresh(
        keys in proptest::collection::vec("[a-z]{0,4}", 0..40),
        junk in proptest::collection::vec("[A-Z]{1,3}", 0..40),
    ) {
        let mut fresh: OrderedStringMap<usize> = OrderedStringMap::new();
        let mut reused: OrderedStringMap<usize> = OrderedStringMap::new();
        for (i, k) in junk.iter().enumerate() {
            let _ = reused.insert(k, i);
        }
        reused.clear();
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(fresh.insert(k, i), reused.insert(k, i));
        }
        for k in keys.iter().chain(junk.iter()) {
            prop_assert_eq!(fresh.get(k), reused.get(k));
            prop_assert_eq!(fresh.find(k), reused.find(k));
        }
        prop_assert!(fresh.iter().eq(reused.iter()));
        reused.check_invariants();
    }
}
