use std::{
    borrow::Borrow,
    hash::{BuildHasher, Hash},
};

use crate::LinkedHashMap;

/// Describes what an insertion-ordered map is.
pub trait OrderedMap<K, V>
where
    K: Eq + Hash,
{
    /// Put a value into the map at the back of the insertion order. If the
    /// key was already present it moves to the back, and its previous value
    /// is returned.
    fn put(&mut self, k: K, v: V) -> Option<V>;

    /// Get a value from the map without disturbing the order.
    fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Get a mutable reference to a value without disturbing the order.
    fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Take the entry out of the map, returning its value if there was one.
    fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// Clears the map entirely.
    fn clear(&mut self);

    /// The number of entries stored in the map right now.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V, S> OrderedMap<K, V> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn put(&mut self, k: K, v: V) -> Option<V> {
        LinkedHashMap::put(self, k, v)
    }

    fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LinkedHashMap::get(self, k)
    }

    fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LinkedHashMap::get_mut(self, k)
    }

    fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LinkedHashMap::contains_key(self, k)
    }

    fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        LinkedHashMap::remove(self, k)
    }

    fn clear(&mut self) {
        LinkedHashMap::clear(self)
    }

    fn len(&self) -> usize {
        LinkedHashMap::len(self)
    }
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;
    use crate::LinkedHashMap;

    // drives a map purely through the trait, the way wrappers see it
    fn fill<M: OrderedMap<String, usize>>(map: &mut M, words: &[&str]) {
        for (i, word) in words.iter().enumerate() {
            map.put((*word).to_owned(), i);
        }
    }

    #[test]
    fn test_trait_dispatch() {
        let mut map: LinkedHashMap<String, usize> = LinkedHashMap::new();
        fill(&mut map, &["a", "b", "a"]);

        assert_eq!(2, OrderedMap::len(&map));
        assert_eq!(Some(&2), OrderedMap::get(&map, "a"));
        assert!(OrderedMap::contains_key(&map, "b"));
        assert_eq!(Some(1), OrderedMap::remove(&mut map, "b"));
        assert!(!OrderedMap::is_empty(&map));

        OrderedMap::clear(&mut map);
        assert!(OrderedMap::is_empty(&map));
    }
}
