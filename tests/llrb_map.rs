use std::collections::BTreeMap;
use std::ops::{Bound, RangeBounds};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use simplelog::{Config, LevelFilter, TestLogger};

use llrb_tree::llrb_map;
use llrb_tree::{Error, LlrbMap, Rank};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// How often the randomized tests run the full integrity check.
const CHECK_EVERY: usize = 64;

fn init_logger() {
    // Another test may already have installed it.
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}

/// Keys drawn from a range smaller than `TEST_SIZE` so that collisions occur.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn bound_strategy() -> impl Strategy<Value = Bound<i64>> {
    prop_oneof![
        key_strategy().prop_map(Bound::Included),
        key_strategy().prop_map(Bound::Excluded),
        Just(Bound::Unbounded),
    ]
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Put(i64, i64),
    Delete(i64),
    Get(i64),
    Contains(i64),
    Floor(i64),
    Ceiling(i64),
    Rank(i64),
    Select(usize),
    DeleteMin,
    DeleteMax,
    Min,
    Max,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        6 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Put(k, v)),
        4 => key_strategy().prop_map(MapOp::Delete),
        1 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::Contains),
        1 => key_strategy().prop_map(MapOp::Floor),
        1 => key_strategy().prop_map(MapOp::Ceiling),
        1 => key_strategy().prop_map(MapOp::Rank),
        1 => (0usize..1_200).prop_map(MapOp::Select),
        1 => Just(MapOp::DeleteMin),
        1 => Just(MapOp::DeleteMax),
        1 => Just(MapOp::Min),
        1 => Just(MapOp::Max),
    ]
}

fn model_floor(model: &BTreeMap<i64, i64>, key: i64) -> Option<&i64> {
    model.range(..=key).next_back().map(|(k, _)| k)
}

fn model_ceiling(model: &BTreeMap<i64, i64>, key: i64) -> Option<&i64> {
    model.range(key..).next().map(|(k, _)| k)
}

// ─── Core symbol table operations ───────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both `LlrbMap` and
    /// `BTreeMap`, asserting identical answers and intact invariants.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut st: LlrbMap<i64, i64> = LlrbMap::new();
        let mut model: BTreeMap<i64, i64> = BTreeMap::new();

        for (step, op) in ops.iter().enumerate() {
            match *op {
                MapOp::Put(k, v) => {
                    prop_assert_eq!(st.put(k, v), model.insert(k, v), "put({}, {})", k, v);
                }
                MapOp::Delete(k) => {
                    prop_assert_eq!(st.delete(&k), model.remove(&k), "delete({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(st.get(&k), model.get(&k), "get({})", k);
                }
                MapOp::Contains(k) => {
                    prop_assert_eq!(st.contains(&k), model.contains_key(&k), "contains({})", k);
                }
                MapOp::Floor(k) => {
                    prop_assert_eq!(st.floor(&k).ok(), model_floor(&model, k), "floor({})", k);
                }
                MapOp::Ceiling(k) => {
                    prop_assert_eq!(st.ceiling(&k).ok(), model_ceiling(&model, k), "ceiling({})", k);
                }
                MapOp::Rank(k) => {
                    prop_assert_eq!(st.rank(&k), model.range(..k).count(), "rank({})", k);
                }
                MapOp::Select(i) => {
                    let expected = model.keys().nth(i).ok_or(Error::InvalidArgument { rank: i, len: model.len() });
                    prop_assert_eq!(st.select(i), expected, "select({})", i);
                }
                MapOp::DeleteMin => {
                    prop_assert_eq!(st.delete_min().ok(), model.pop_first());
                }
                MapOp::DeleteMax => {
                    prop_assert_eq!(st.delete_max().ok(), model.pop_last());
                }
                MapOp::Min => {
                    prop_assert_eq!(st.min().ok(), model.keys().next());
                }
                MapOp::Max => {
                    prop_assert_eq!(st.max().ok(), model.keys().next_back());
                }
            }

            prop_assert_eq!(st.len(), model.len());
            if step % CHECK_EVERY == 0 {
                prop_assert_eq!(st.check(), Ok(()));
            }
        }

        prop_assert_eq!(st.check(), Ok(()));
        prop_assert!(st.iter().eq(model.iter()));
    }

    /// Ranged counts and enumeration agree with `BTreeMap::range`, including
    /// inverted ranges, which `BTreeMap` would reject.
    #[test]
    fn ranges_match_btreemap(
        keys in proptest::collection::btree_set(key_strategy(), 0..300),
        lo in bound_strategy(),
        hi in bound_strategy(),
    ) {
        let st: LlrbMap<i64, ()> = keys.iter().map(|&k| (k, ())).collect();
        let expected: Vec<i64> = keys.iter().copied().filter(|k| (lo, hi).contains(k)).collect();

        prop_assert_eq!(st.range_count((lo, hi)), expected.len());
        prop_assert_eq!(st.keys_in((lo, hi)).copied().collect::<Vec<_>>(), expected.clone());
        let mut reversed: Vec<i64> = st.range((lo, hi)).rev().map(|(k, ())| *k).collect();
        reversed.reverse();
        prop_assert_eq!(reversed, expected.clone());
        prop_assert_eq!(st.range((lo, hi)).len(), expected.len());
    }

    /// Any insertion order yields the same contents, and deleting every key
    /// in any order returns the map to empty with invariants intact.
    #[test]
    fn insert_then_delete_everything(
        keys in proptest::collection::vec(key_strategy(), 0..400),
        picks in proptest::collection::vec(any::<proptest::sample::Index>(), 400),
    ) {
        let mut st = LlrbMap::new();
        let mut model = BTreeMap::new();
        for (i, &k) in keys.iter().enumerate() {
            st.put(k, i);
            model.insert(k, i);
        }
        prop_assert!(st.iter().eq(model.iter()));

        let mut pending: Vec<i64> = model.keys().copied().collect();
        for pick in &picks {
            if pending.is_empty() {
                break;
            }
            let k = pending.swap_remove(pick.index(pending.len()));
            prop_assert_eq!(st.delete(&k), model.remove(&k));
            prop_assert_eq!(st.check(), Ok(()));
        }
        prop_assert!(st.is_empty());
        prop_assert_eq!(st.height(), None);
    }
}

// ─── Scenarios ──────────────────────────────────────────────────────────────

fn search_example() -> LlrbMap<&'static str, usize> {
    let mut st = LlrbMap::new();
    for (i, key) in ["S", "E", "A", "R", "C", "H"].into_iter().enumerate() {
        st.put(key, i);
    }
    st
}

#[test]
fn search_example_answers_ordered_queries() {
    init_logger();
    let st = search_example();

    assert_eq!(st.len(), 6);
    assert_eq!(st.min(), Ok(&"A"));
    assert_eq!(st.max(), Ok(&"S"));
    assert_eq!(st.select(0), Ok(&"A"));
    assert_eq!(st.rank("H"), 3);
    assert_eq!(st.floor("G"), Ok(&"E"));
    assert_eq!(st.ceiling("I"), Ok(&"R"));
    assert_eq!(st.get("C"), Some(&4));

    let keys: Vec<&str> = st.keys_in::<&str, _>("C"..="R").copied().collect();
    assert_eq!(keys, ["C", "E", "H", "R"]);
    assert_eq!(st.range_count::<&str, _>("C"..="R"), 4);
    assert_eq!(st.keys().copied().collect::<Vec<_>>(), ["A", "C", "E", "H", "R", "S"]);
    assert_eq!(st.check(), Ok(()));
}

#[test]
fn search_example_level_order() {
    let st = search_example();
    assert_eq!(st.level_order(), [&"R", &"E", &"S", &"C", &"H", &"A"]);
    assert_eq!(st.height(), Some(3));
}

#[test]
fn delete_min_twice_leaves_largest() {
    init_logger();
    let mut st = LlrbMap::from([("A", 1), ("B", 2), ("C", 3)]);

    assert_eq!(st.delete_min(), Ok(("A", 1)));
    assert_eq!(st.delete_min(), Ok(("B", 2)));
    assert_eq!(st.len(), 1);
    assert_eq!(st.get("C"), Some(&3));
    assert_eq!(st.check(), Ok(()));
}

#[test]
fn empty_map_reports_errors() {
    init_logger();
    let mut st: LlrbMap<i32, i32> = LlrbMap::new();

    assert!(st.is_empty());
    assert_eq!(st.min(), Err(Error::EmptyContainer { operation: "min" }));
    assert_eq!(st.max(), Err(Error::EmptyContainer { operation: "max" }));
    assert_eq!(st.delete_min(), Err(Error::EmptyContainer { operation: "delete_min" }));
    assert_eq!(st.delete_max(), Err(Error::EmptyContainer { operation: "delete_max" }));
    assert_eq!(st.floor(&0), Err(Error::NoSuchElement { operation: "floor" }));
    assert_eq!(st.ceiling(&0), Err(Error::NoSuchElement { operation: "ceiling" }));
    assert_eq!(st.select(0), Err(Error::InvalidArgument { rank: 0, len: 0 }));
    assert_eq!(st.rank(&0), 0);
    assert_eq!(st.range_count::<i32, _>(..), 0);
    assert_eq!(st.keys().next(), None);
    assert_eq!(st.delete(&0), None);
    assert_eq!(st.check(), Ok(()));
}

#[test]
fn floor_and_ceiling_outside_the_keys() {
    let st = LlrbMap::from([(10, 'a'), (20, 'b')]);
    assert_eq!(st.floor(&9), Err(Error::NoSuchElement { operation: "floor" }));
    assert_eq!(st.ceiling(&21), Err(Error::NoSuchElement { operation: "ceiling" }));
    assert_eq!(st.floor(&100), Ok(&20));
    assert_eq!(st.ceiling(&-100), Ok(&10));
}

#[test]
fn put_replaces_without_growing() {
    let mut st = LlrbMap::new();
    assert_eq!(st.put("k", 1), None);
    assert_eq!(st.put("k", 2), Some(1));
    assert_eq!(st.len(), 1);
    assert_eq!(st["k"], 2);
}

#[test]
fn delete_is_idempotent() {
    let mut st: LlrbMap<u32, u32> = (0..50).map(|k| (k, k)).collect();
    assert_eq!(st.delete(&25), Some(25));
    let snapshot = st.clone();
    assert_eq!(st.delete(&25), None);
    assert_eq!(st, snapshot);
    assert_eq!(st.level_order(), snapshot.level_order());
    assert_eq!(st.check(), Ok(()));
}

#[test]
fn put_or_delete_treats_none_as_delete() {
    let mut st = LlrbMap::new();
    assert_eq!(st.put_or_delete(1, Some("one")), None);
    assert_eq!(st.put_or_delete(1, Some("uno")), Some("one"));
    assert_eq!(st.put_or_delete(1, None), Some("uno"));
    assert_eq!(st.put_or_delete(1, None), None);
    assert!(st.is_empty());
}

#[test]
fn ascending_inserts_stay_balanced() {
    init_logger();
    let st: LlrbMap<u32, ()> = (0..4_096).map(|k| (k, ())).collect();
    assert_eq!(st.check(), Ok(()));
    // 2 * log2(4097) rounded down, counted in links.
    assert!(st.height().is_some_and(|h| h <= 23));
}

#[test]
fn rank_indexing_reads_and_writes() {
    let mut st = LlrbMap::from([("b", 2), ("a", 1), ("c", 3)]);
    assert_eq!(st[Rank(0)], 1);
    st[Rank(2)] += 10;
    assert_eq!(st.get("c"), Some(&13));
    assert_eq!(st.get_by_rank(1), Some((&"b", &2)));
}

#[test]
fn iterators_are_double_ended_and_exact() {
    let st: LlrbMap<u8, char> = [(3, 'c'), (1, 'a'), (2, 'b'), (4, 'd')].into_iter().collect();

    let mut iter = st.iter();
    assert_eq!(iter.len(), 4);
    assert_eq!(iter.next(), Some((&1, &'a')));
    assert_eq!(iter.next_back(), Some((&4, &'d')));
    assert_eq!(iter.len(), 2);

    assert_eq!(st.values().rev().collect::<String>(), "dcba");
    assert_eq!(st.keys_in(2..).len(), 3);

    let mut owned = st.clone().into_iter();
    assert_eq!(owned.next_back(), Some((4, 'd')));
    assert_eq!(owned.len(), 3);

    let empty: llrb_map::IntoIter<u8, char> = Default::default();
    assert_eq!(empty.count(), 0);
}

#[test]
fn clear_resets_everything() {
    init_logger();
    let mut st: LlrbMap<u32, u32> = (0..100).map(|k| (k, k)).collect();
    st.clear();
    assert!(st.is_empty());
    assert_eq!(st.min_entry(), None);
    assert_eq!(st.check(), Ok(()));
    st.put(7, 7);
    assert_eq!(st.select(0), Ok(&7));
}

#[test]
fn error_messages_are_readable() {
    let st: LlrbMap<u32, u32> = LlrbMap::new();
    assert_eq!(st.min().unwrap_err().to_string(), "`min` called on an empty map");
    assert_eq!(st.select(4).unwrap_err().to_string(), "rank 4 is out of range for a map of 0 entries");
}

#[test]
fn min_and_max_on_ordered_values() {
    let mut st: LlrbMap<i64, i64> = (-5..=5).map(|k| (k, k * k)).collect();
    assert_eq!(st.min(), Ok(&-5));
    assert_eq!(st.max(), Ok(&5));
    assert_eq!(st.delete_max(), Ok((5, 25)));
    assert_eq!(st.max(), Ok(&4));
}
