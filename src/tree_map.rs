use std::{cmp::Ordering, mem};

use crate::tree_base::{
    comparator::Comparator,
    tree::{Rejected, Tree},
};

/// A key/value pair stored in a [`TreeMap`]; only the key takes part in
/// ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<K, V>(pub K, pub V);

impl<K, V> Entry<K, V> {
    pub fn key(&self) -> &K {
        &self.0
    }

    pub fn value(&self) -> &V {
        &self.1
    }

    pub fn into_value(self) -> V {
        self.1
    }
}

/// Orders entries by key.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyOrder;

impl<K: Ord, V> Comparator<Entry<K, V>> for KeyOrder {
    #[inline]
    fn compare(&self, lhs: &Entry<K, V>, rhs: &Entry<K, V>) -> Ordering {
        lhs.key().cmp(rhs.key())
    }
}

/// An ordered map owning a [`Tree`] of entries.
#[derive(Clone, Debug)]
pub struct TreeMap<K, V> {
    _tree: Tree<Entry<K, V>, KeyOrder>,
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self {
            _tree: Tree::with_comparator(KeyOrder),
        }
    }

    pub fn is_empty(&self) -> bool {
        self._tree.is_empty()
    }

    pub fn len(&self) -> usize {
        self._tree.len()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.entry(key).is_some()
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        match self._tree.try_add(Entry(key, value)) {
            Ok(()) => None,
            Err(Rejected { item, resident }) => Some(mem::replace(&mut resident.1, item.1)),
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.entry(key).map(Entry::value)
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self._tree
            .rm_by(|entry| key.cmp(entry.key()))
            .map(Entry::into_value)
    }

    pub fn first(&self) -> Option<(&K, &V)> {
        self._tree.find_min().map(|entry| (entry.key(), entry.value()))
    }

    pub fn last(&self) -> Option<(&K, &V)> {
        self._tree.find_max().map(|entry| (entry.key(), entry.value()))
    }

    /// Pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> + '_ {
        self._tree.iter().map(|entry| (entry.key(), entry.value()))
    }

    /// Moves every entry into a new map, leaving this one empty.
    pub fn take(&mut self) -> Self {
        Self {
            _tree: Tree::take_guts(&mut self._tree),
        }
    }

    pub fn rebalance(&mut self) {
        self._tree.rebalance();
    }

    fn entry(&self, key: &K) -> Option<&Entry<K, V>> {
        self._tree.find_by(|entry| key.cmp(entry.key()))
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.put(key, value);
        }
        map
    }
}

impl<K: Ord, V: PartialEq> PartialEq for TreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self._tree == other._tree
    }
}
