//! Insertion-ordered associative container.
//!
//! [`OrderedMap`] backs both JSON objects (string keys) and JSON arrays
//! (index keys). Keys are unique. Traversal is exposed only through
//! [`OrderedMap::fold`] and [`OrderedMap::for_each`], which visit entries in
//! insertion order.
//!
//! # Duplicate keys
//!
//! The last insert wins: the entry keeps the position of its first insertion
//! and takes the newest value.

use std::borrow::Borrow;
use std::hash::Hash;

use indexmap::IndexMap;

/// An insertion-ordered map with unique keys.
#[derive(Debug, Clone)]
pub struct OrderedMap<K, V> {
    entries: IndexMap<K, V>,
}

impl<K, V> OrderedMap<K, V> {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fold over the entries in insertion order.
    pub fn fold<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, &K, &V) -> B,
    {
        self.entries
            .iter()
            .fold(init, |acc, (key, value)| f(acc, key, value))
    }

    /// Visit every entry in insertion order.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        self.fold((), |(), key, value| f(key, value));
    }
}

impl<K: Hash + Eq, V> OrderedMap<K, V> {
    /// Insert an entry.
    ///
    /// If the key is already present its value is replaced in place and the
    /// previous value is returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Look up a value by key.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Returns true if the key is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }
}

impl<V> OrderedMap<usize, V> {
    /// Append under the next sequential index and return that index.
    ///
    /// Keeps array keys exactly `0..len` as long as no other insert is used.
    pub fn push(&mut self, value: V) -> usize {
        let index = self.entries.len();
        self.entries.insert(index, value);
        index
    }
}

impl<K, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

// Order-sensitive, unlike `IndexMap`'s own equality.
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
