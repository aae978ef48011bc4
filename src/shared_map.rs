use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{borrow::Borrow, hash::Hash, marker::PhantomData, sync::Arc};

use crate::ordered_map::OrderedMap;

/// Wrapper for an ordered map which is shareable across thread boundaries.
///
/// The map itself does no locking of its own; this puts a single lock around
/// the whole of it, so every operation sees a consistent map.
pub struct SharedMap<M, K, V>(Arc<RwLock<M>>, PhantomData<K>, PhantomData<V>)
where
    M: OrderedMap<K, V>,
    K: Eq + Hash,
    V: Clone;

impl<M, K, V> SharedMap<M, K, V>
where
    M: OrderedMap<K, V>,
    K: Eq + Hash,
    V: Clone,
{
    /// Wraps a map into a shared map accessor, making it safe to move across
    /// thread boundaries. Enforces an additional constraint of Clone on
    /// values.
    pub fn with_map(map: M) -> Self {
        Self(Arc::from(RwLock::from(map)), PhantomData, PhantomData)
    }

    /// Puts an item into the map.
    pub fn put(&self, k: K, v: V) -> Option<V> {
        self.0.write().put(k, v)
    }

    /// Get an item from the map. This clones it to minimize the lock time of
    /// the map.
    pub fn get<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.read().get(k).cloned()
    }

    pub fn contains_key<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.read().contains_key(k)
    }

    /// Remove an item from the map, returning the removed item if it existed.
    pub fn remove<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.0.write().remove(k)
    }

    /// Clears the map.
    pub fn clear(&self) {
        self.0.write().clear()
    }

    /// The number of elements in the map at present.
    pub fn len(&self) -> usize {
        self.0.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.read().is_empty()
    }

    /// Locks the map for reading, e.g. to iterate over it. Writers wait until
    /// the guard is dropped.
    pub fn read(&self) -> RwLockReadGuard<'_, M> {
        self.0.read()
    }

    /// Locks the map for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, M> {
        self.0.write()
    }
}

impl<M, K, V> Clone for SharedMap<M, K, V>
where
    M: OrderedMap<K, V>,
    K: Eq + Hash,
    V: Clone,
{
    fn clone(&self) -> Self {
        SharedMap(self.0.clone(), PhantomData, PhantomData)
    }
}
