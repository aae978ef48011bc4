use std::collections::HashSet;

use linked_map::LinkedHashMap;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Keys come from a small range so puts and removes keep colliding.
fn key_strategy() -> impl Strategy<Value = u8> {
    0u8..48
}

#[derive(Debug, Clone)]
enum MapOp {
    Put(u8, i32),
    Remove(u8),
    Get(u8),
    ContainsKey(u8),
    PopFront,
    PopBack,
    Clear,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        8 => (key_strategy(), any::<i32>()).prop_map(|(k, v)| MapOp::Put(k, v)),
        4 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        2 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => Just(MapOp::PopFront),
        1 => Just(MapOp::PopBack),
        1 => Just(MapOp::Clear),
    ]
}

/// The reference: a plain vector of entries, oldest first, searched linearly.
#[derive(Default)]
struct Model(Vec<(u8, i32)>);

impl Model {
    fn position(&self, k: u8) -> Option<usize> {
        self.0.iter().position(|(key, _)| *key == k)
    }

    fn put(&mut self, k: u8, v: i32) -> Option<i32> {
        let previous = self.remove(k);
        self.0.push((k, v));
        previous
    }

    fn remove(&mut self, k: u8) -> Option<i32> {
        self.position(k).map(|i| self.0.remove(i).1)
    }

    fn get(&self, k: u8) -> Option<&i32> {
        self.position(k).map(|i| &self.0[i].1)
    }
}

fn assert_matches_model(map: &LinkedHashMap<u8, i32>, model: &Model) {
    let forward: Vec<(u8, i32)> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(model.0, forward);

    let mut backward: Vec<(u8, i32)> =
        map.iter().rev().map(|(k, v)| (*k, *v)).collect();
    backward.reverse();
    assert_eq!(model.0, backward);

    assert_eq!(model.0.len(), map.len());
    assert_eq!(model.0.is_empty(), map.is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Replays a random sequence of operations on both the map and a model
    /// and asserts identical results and identical order at every step.
    #[test]
    fn map_ops_match_model(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut map: LinkedHashMap<u8, i32> = LinkedHashMap::new();
        let mut model = Model::default();

        for op in &ops {
            match *op {
                MapOp::Put(k, v) => {
                    prop_assert_eq!(model.put(k, v), map.put(k, v), "put({}, {})", k, v);
                    prop_assert_eq!(Some((&k, &v)), map.back());
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(model.remove(k), map.remove(&k), "remove({})", k);
                    prop_assert!(!map.contains_key(&k));
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(model.get(k), map.get(&k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(model.get(k).is_some(), map.contains_key(&k));
                }
                MapOp::PopFront => {
                    let expected = if model.0.is_empty() { None } else { Some(model.0.remove(0)) };
                    prop_assert_eq!(expected, map.pop_front());
                }
                MapOp::PopBack => {
                    prop_assert_eq!(model.0.pop(), map.pop_back());
                }
                MapOp::Clear => {
                    model.0.clear();
                    map.clear();
                }
            }

            assert_matches_model(&map, &model);
        }
    }

    /// The final size is always the number of distinct keys put.
    #[test]
    fn len_counts_distinct_keys(keys in proptest::collection::vec(any::<u16>(), 0..512)) {
        let mut map = LinkedHashMap::new();

        for (i, k) in keys.iter().enumerate() {
            map.put(*k, i);
        }

        let distinct: HashSet<&u16> = keys.iter().collect();
        prop_assert_eq!(distinct.len(), map.len());
        prop_assert_eq!(distinct, map.key_set());
    }

    /// Every key iterates at the position of its last put.
    #[test]
    fn order_follows_last_put(keys in proptest::collection::vec(0u8..16, 0..256)) {
        let mut map = LinkedHashMap::new();

        for (i, k) in keys.iter().enumerate() {
            map.put(*k, i);
        }

        for (k, last) in map.iter() {
            let expected = keys.iter().rposition(|key| key == k);
            prop_assert_eq!(expected, Some(*last));
        }

        let positions: Vec<usize> = map.values().copied().collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        prop_assert_eq!(sorted, positions);
    }
}

#[test]
fn remove_in_insertion_order_counts_down() {
    let n = 100;
    let mut map = LinkedHashMap::with_capacity(n);

    for i in 0..n {
        map.put(i.to_string(), i);
    }

    for i in 0..n {
        assert_eq!(Some(i), map.remove(i.to_string().as_str()));
        assert_eq!(n - i - 1, map.len());
        assert_eq!(None, map.get(i.to_string().as_str()));
    }

    assert!(map.is_empty());
    assert_eq!(0, map.iter().count());
}

#[test]
fn to_vec_and_to_hash_map_agree_with_len() {
    let mut map = LinkedHashMap::new();
    map.put_all(vec![("a", 1), ("b", 2), ("c", 3), ("b", 4)]);

    assert_eq!(vec![1, 3, 4], map.to_vec());
    assert_eq!(map.len(), map.to_vec().len());

    let plain = map.to_hash_map();
    assert_eq!(map.len(), plain.len());
    for (k, v) in &map {
        assert_eq!(Some(v), plain.get(k));
    }
}

#[test]
fn clear_behaves_like_a_fresh_map() {
    let mut map = LinkedHashMap::new();
    map.extend(vec![("a", 1), ("b", 2)]);
    map.clear();
    assert!(map.is_empty());

    let mut fresh = LinkedHashMap::new();
    for m in [&mut map, &mut fresh].iter_mut() {
        m.put("b", 3);
        m.put("a", 4);
    }

    assert_eq!(fresh, map);
}

#[test]
fn prototype_named_keys_do_not_leak() {
    let mut map: LinkedHashMap<String, &str> = LinkedHashMap::new();

    for key in ["__proto__", "constructor", "prototype", "toString", "valueOf"].iter() {
        assert!(!map.contains_key(*key));
        map.put((*key).to_owned(), *key);
    }

    map.put("plain".to_owned(), "plain");

    assert_eq!(6, map.len());
    assert_eq!(Some(&"__proto__"), map.get("__proto__"));
    assert_eq!(Some(&"plain"), map.get("plain"));
    assert_eq!(Some("valueOf"), map.remove("valueOf"));
    assert_eq!(Some(&"toString"), map.get("toString"));

    let keys: Vec<&str> = map.keys().map(String::as_str).collect();
    assert_eq!(vec!["__proto__", "constructor", "prototype", "toString", "plain"], keys);
}
