use super::iter::{IntoIter, Iter, Keys, Values};
use super::KeyHash;
use crate::linked_list::{LinkedList, NodeHandle};
use hashbrown::HashTable;
use std::{
    borrow::Borrow,
    collections::{hash_map::RandomState, HashMap, HashSet},
    fmt,
    hash::{BuildHasher, Hash, Hasher},
    ops::Index,
};

/// A layer on top of a hash table that internally links nodes together
/// so they can be iterated over in insertion order.
///
/// Putting a key that's already present moves it to the back: a key's
/// position always reflects the last time it was put, not the first.
///
/// Any value of `K` is a key in its own right. The index holds nothing but
/// the keys that have been put, so there are no reserved or inherited
/// entries to collide with.
///
/// The map is not synchronised. Share it across threads behind a lock, such
/// as [`SharedMap`](crate::SharedMap).
pub struct LinkedHashMap<K, V, S = RandomState> {
    hash_builder: S,
    index: HashTable<NodeHandle>,
    entries: LinkedList<K, V>,
}

impl<K, V> LinkedHashMap<K, V, RandomState>
where
    K: Eq + Hash,
{
    /// Makes a new, empty map.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Makes a new, empty map with room for `capacity` entries before it
    /// reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        LinkedHashMap::with_capacity_and_hash_builder(
            capacity,
            Default::default(),
        )
    }
}

impl<K, V, S> LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Makes a new, empty map which hashes its keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hash_builder(0, hash_builder)
    }

    pub fn with_capacity_and_hash_builder(
        capacity: usize,
        hash_builder: S,
    ) -> Self {
        Self {
            hash_builder,
            index: HashTable::with_capacity(capacity),
            entries: LinkedList::with_capacity(capacity),
        }
    }

    /// Puts a value in the map at the back of the insertion order, returning
    /// the value previously stored at that key.
    ///
    /// If the key was already present its old entry is removed first, so the
    /// key moves to the back rather than keeping its original position.
    ///
    /// ```
    /// use linked_map::LinkedHashMap;
    ///
    /// let mut map = LinkedHashMap::new();
    /// map.put("a", 1);
    /// map.put("b", 2);
    /// assert_eq!(Some(1), map.put("a", 3));
    ///
    /// let entries: Vec<_> = map.iter().collect();
    /// assert_eq!(vec![(&"b", &2), (&"a", &3)], entries);
    /// ```
    pub fn put(&mut self, k: K, v: V) -> Option<V> {
        #[cfg(test)]
        let original_len = self.len();
        let k_hash = self.k_hash(&k);

        let previous = self.remove_hashed(k_hash, &k).map(|(_, v)| v);

        let handle = self.entries.push_back(k_hash, k, v);
        let entries = &self.entries;
        self.index
            .insert_unique(k_hash, handle, |h| entries.node(*h).hash);

        #[cfg(test)]
        {
            let grew_by = if previous.is_some() { 0 } else { 1 };
            assert_eq!(original_len + grew_by, self.len());
            assert_eq!(Some(handle), self.entries.tail());
            self.continuity_test();
        }

        previous
    }

    /// Puts every entry of `iter` in order, as if by repeated calls to
    /// [`put`](Self::put).
    pub fn put_all<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in iter {
            self.put(k, v);
        }
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.k_hash(k), k).is_some()
    }

    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.k_hash(k), k)
            .map(|h| &self.entries.node(h).value)
    }

    /// Gets the value at `k`, or `default` if there isn't one.
    pub fn get_or<'a, Q>(&'a self, k: &Q, default: &'a V) -> &'a V
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(k).unwrap_or(default)
    }

    /// Gets a mutable reference to the value at `k`. Changing a value in
    /// place doesn't count as putting it, so the entry keeps its position.
    pub fn get_mut<Q>(&mut self, k: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let handle = self.find(self.k_hash(k), k)?;
        Some(&mut self.entries.node_mut(handle).value)
    }

    pub fn get_key_value<Q>(&self, k: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.find(self.k_hash(k), k).map(|h| {
            let node = self.entries.node(h);
            (&node.key, &node.value)
        })
    }

    /// Removes the entry at `k`, returning its value if there was one.
    pub fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(k).map(|(_, v)| v)
    }

    /// Removes the entry at `k`, returning both the stored key and its value
    /// if there was one.
    pub fn remove_entry<Q>(&mut self, k: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        #[cfg(test)]
        let original_len = self.len();
        let removed = self.remove_hashed(self.k_hash(k), k);

        #[cfg(test)]
        {
            let shrank_by = if removed.is_some() { 1 } else { 0 };
            assert_eq!(original_len - shrank_by, self.len());
            self.continuity_test();
        }

        removed
    }

    /// The oldest entry in the map.
    pub fn front(&self) -> Option<(&K, &V)> {
        self.entries.head().map(|h| {
            let node = self.entries.node(h);
            (&node.key, &node.value)
        })
    }

    /// The youngest entry in the map.
    pub fn back(&self) -> Option<(&K, &V)> {
        self.entries.tail().map(|h| {
            let node = self.entries.node(h);
            (&node.key, &node.value)
        })
    }

    /// Removes and returns the oldest entry in the map.
    pub fn pop_front(&mut self) -> Option<(K, V)> {
        let head = self.entries.head()?;
        let popped = self.remove_handle(head);

        #[cfg(test)]
        self.continuity_test();

        Some(popped)
    }

    /// Removes and returns the youngest entry in the map.
    pub fn pop_back(&mut self) -> Option<(K, V)> {
        let tail = self.entries.tail()?;
        let popped = self.remove_handle(tail);

        #[cfg(test)]
        self.continuity_test();

        Some(popped)
    }

    /// The set of keys in the map. Use [`keys`](Self::keys) for them in
    /// insertion order.
    pub fn key_set(&self) -> HashSet<&K> {
        self.keys().collect()
    }

    fn k_hash<Q>(&self, k: &Q) -> KeyHash
    where
        Q: Hash + ?Sized,
    {
        let mut h = self.hash_builder.build_hasher();
        k.hash(&mut h);
        h.finish()
    }

    fn find<Q>(&self, k_hash: KeyHash, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let entries = &self.entries;
        self.index
            .find(k_hash, |h| key_matches(&entries.node(*h).key, k))
            .copied()
    }

    fn remove_hashed<Q>(&mut self, k_hash: KeyHash, k: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Eq + ?Sized,
    {
        let entries = &self.entries;
        let handle = match self
            .index
            .find_entry(k_hash, |h| key_matches(&entries.node(*h).key, k))
        {
            Ok(occupied) => occupied.remove().0,
            Err(_) => return None,
        };

        Some(self.entries.remove_node(handle))
    }

    fn remove_handle(&mut self, handle: NodeHandle) -> (K, V) {
        let k_hash = self.entries.node(handle).hash;

        if let Ok(occupied) = self.index.find_entry(k_hash, |h| *h == handle) {
            occupied.remove();
        }

        self.entries.remove_node(handle)
    }

    #[cfg(test)]
    fn continuity_test(&self) {
        assert_eq!(self.index.len(), self.entries.len());

        if self.is_empty() {
            assert!(self.entries.head().is_none());
            assert!(self.entries.tail().is_none());
        } else {
            assert!(self.entries.head().is_some());
            assert!(self.entries.tail().is_some());
        }

        // walk the list forwards, checking each hop against the back link
        // and making sure every node is reachable through the index
        let mut count = 0;
        let mut prev = None;
        let mut cursor = self.entries.head();

        while let Some(handle) = cursor {
            count += 1;
            assert!(count <= self.len());
            assert_eq!(prev, self.entries.prev(handle));

            let node = self.entries.node(handle);
            assert_eq!(Some(handle), self.find(node.hash, &node.key));

            prev = Some(handle);
            cursor = self.entries.next(handle);
        }

        assert_eq!(self.entries.tail(), prev);
        assert_eq!(self.len(), count);

        // and again in reverse
        count = 0;
        cursor = self.entries.tail();

        while let Some(handle) = cursor {
            count += 1;
            assert!(count <= self.len());
            cursor = self.entries.prev(handle);
        }

        assert_eq!(self.len(), count);
    }
}

fn key_matches<K, Q>(key: &K, k: &Q) -> bool
where
    K: Borrow<Q>,
    Q: Eq + ?Sized,
{
    <K as Borrow<Q>>::borrow(key) == k
}

impl<K, V, S> LinkedHashMap<K, V, S> {
    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry, keeping the allocated buffers around for reuse.
    pub fn clear(&mut self) {
        self.index.clear();
        self.entries.clear();
    }

    /// Iterates over the entries in insertion order. Every call starts a new
    /// traversal from the oldest entry.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.entries)
    }

    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Calls `visitor` with each key and value in insertion order.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V),
    {
        for (k, v) in self.iter() {
            visitor(k, v);
        }
    }

    /// Copies the values out in insertion order.
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.values().cloned().collect()
    }

    /// Copies the entries out into a plain, unordered `HashMap`.
    pub fn to_hash_map(&self) -> HashMap<K, V>
    where
        K: Clone + Eq + Hash,
        V: Clone,
    {
        self.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }
}

impl<K, V, S> Clone for LinkedHashMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        // handles are positions in the store, which the clone keeps intact
        Self {
            hash_builder: self.hash_builder.clone(),
            index: self.index.clone(),
            entries: self.entries.clone(),
        }
    }
}

impl<K, V, S> Default for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<K, V, S> fmt::Debug for LinkedHashMap<K, V, S>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Two maps are equal when they hold equal entries in the same order.
impl<K, V, S> PartialEq for LinkedHashMap<K, V, S>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, S> Eq for LinkedHashMap<K, V, S>
where
    K: Eq,
    V: Eq,
{
}

impl<K, Q, V, S> Index<&Q> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Panics if the key isn't present.
    fn index(&self, k: &Q) -> &V {
        match self.get(k) {
            Some(v) => v,
            None => panic!("no entry found for key"),
        }
    }
}

impl<K, V, S> Extend<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.put_all(iter);
    }
}

impl<K, V, S> FromIterator<(K, V)> for LinkedHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.put_all(iter);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a LinkedHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for LinkedHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self.entries }
    }
}
