use std::{
    borrow::Borrow,
    collections::{hash_map, HashMap},
    hash::Hash,
    ops::Add,
};

use num_traits::Zero;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// A key-value map where every key that was never set reads as `default`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SparseArray<K, V>
where
    K: Eq + Hash,
{
    entries: HashMap<K, V>,
    default: V,
}

impl<K, V> SparseArray<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty array whose absent entries read as `default`.
    pub fn new(default: V) -> Self {
        SparseArray {
            entries: HashMap::new(),
            default,
        }
    }

    /// Returns the stored value for `key`, or the default value if the key is absent.
    pub fn get(&self, key: &K) -> V
    where
        V: Clone,
    {
        self.get_ref(key).clone()
    }

    /// Borrowing version of [`SparseArray::get`].
    pub fn get_ref(&self, key: &K) -> &V {
        self.entries.get(key).unwrap_or(&self.default)
    }

    /// Returns the stored value only if `key` has been set.
    pub fn try_get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }

    /// Inserts or overwrites the value at `key`.
    pub fn set(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    /// `self[key] = self[key] + value`, where an absent entry starts from the default.
    pub fn add_assign(&mut self, key: K, value: V)
    where
        V: Clone + Add<Output = V>,
    {
        let current = self
            .entries
            .remove(&key)
            .unwrap_or_else(|| self.default.clone());
        self.entries.insert(key, current + value);
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }

    /// Removes `key`, returning `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Number of explicitly stored entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_value(&self) -> &V {
        &self.default
    }

    /// Iterates over the stored entries. The order is unspecified but stable as long as the
    /// array is not mutated.
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.entries.iter()
    }

    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.entries.keys()
    }

    /// Drops every stored entry, keeping the default value.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Replaces the contents of `self` with an independent snapshot of `other`, including its
    /// default value.
    pub fn copy_from(&mut self, other: &SparseArray<K, V>)
    where
        K: Clone,
        V: Clone,
    {
        self.entries.clone_from(&other.entries);
        self.default = other.default.clone();
    }
}

impl<K, V> Default for SparseArray<K, V>
where
    K: Eq + Hash,
    V: Zero,
{
    fn default() -> Self {
        SparseArray::new(V::zero())
    }
}

impl<'a, K, V> IntoIterator for &'a SparseArray<K, V>
where
    K: Eq + Hash,
{
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_key_reads_default() {
        let array = SparseArray::<usize, f64>::new(-1.5);
        assert_eq!(array.get(&7), -1.5);
        assert!(!array.contains_key(&7));
        assert_eq!(array.count(), 0);
    }

    #[test]
    fn test_set_overwrites() {
        let mut array = SparseArray::<&str, usize>::new(0);
        array.set("x", 1);
        array.set("x", 4);
        assert_eq!(array.get(&"x"), 4);
        assert_eq!(array.count(), 1);
    }

    #[test]
    fn test_add_assign_starts_from_default() {
        let mut array = SparseArray::<usize, f64>::default();
        array.add_assign(3, 2.0);
        array.add_assign(3, 0.5);
        assert_eq!(array.get(&3), 2.5);

        let mut offset = SparseArray::<usize, f64>::new(10.0);
        offset.add_assign(0, 1.0);
        assert_eq!(offset.get(&0), 11.0);
    }

    #[test]
    fn test_remove() {
        let mut array = SparseArray::<usize, f64>::default();
        array.set(1, 3.0);
        assert!(array.remove(&1));
        assert!(!array.remove(&1));
        assert_eq!(array.get(&1), 0.0);
        assert!(array.is_empty());
    }

    #[test]
    fn test_copy_from_is_independent() {
        let mut source = SparseArray::<String, usize>::new(99);
        source.set("a".to_string(), 0);
        source.set("b".to_string(), 1);

        let mut copy = SparseArray::<String, usize>::new(0);
        copy.set("stale".to_string(), 5);
        copy.copy_from(&source);

        source.set("a".to_string(), 42);
        source.remove(&"b".to_string());

        assert_eq!(copy.get(&"a".to_string()), 0);
        assert_eq!(copy.get(&"b".to_string()), 1);
        assert!(!copy.contains_key("stale"));
        assert_eq!(copy.try_get("a"), Some(&0));
        assert_eq!(*copy.default_value(), 99);
    }

    #[test]
    fn test_iteration_covers_stored_entries() {
        let mut array = SparseArray::<usize, i32>::default();
        for i in 0..5 {
            array.set(i, (i * i) as i32);
        }
        let mut seen: Vec<_> = array.iter().map(|(&k, &v)| (k, v)).collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![(0, 0), (1, 1), (2, 4), (3, 9), (4, 16)]);
    }
}
