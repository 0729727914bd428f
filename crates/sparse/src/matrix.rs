use std::{collections::hash_map, hash::Hash, ops::Add};

use num_traits::Zero;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::SparseArray;

/// A two dimensional [`SparseArray`] addressed by `(row, col)`.
///
/// Cells are keyed by the tuple itself, so equality and hashing are component-wise.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct SparseMatrix<K0, K1, V>
where
    K0: Eq + Hash,
    K1: Eq + Hash,
{
    cells: SparseArray<(K0, K1), V>,
}

impl<K0, K1, V> SparseMatrix<K0, K1, V>
where
    K0: Eq + Hash,
    K1: Eq + Hash,
{
    pub fn new(default: V) -> Self {
        SparseMatrix {
            cells: SparseArray::new(default),
        }
    }

    /// Returns the value at `(row, col)`, or the default value if the cell was never set.
    pub fn get(&self, row: K0, col: K1) -> V
    where
        V: Clone,
    {
        self.cells.get(&(row, col))
    }

    pub fn set(&mut self, row: K0, col: K1, value: V) {
        self.cells.set((row, col), value);
    }

    /// `self[row, col] = self[row, col] + value`.
    pub fn add_assign(&mut self, row: K0, col: K1, value: V)
    where
        V: Clone + Add<Output = V>,
    {
        self.cells.add_assign((row, col), value);
    }

    pub fn contains(&self, row: K0, col: K1) -> bool {
        self.cells.contains_key(&(row, col))
    }

    /// Removes the cell at `(row, col)`, returning `true` if it was present.
    pub fn remove(&mut self, row: K0, col: K1) -> bool {
        self.cells.remove(&(row, col))
    }

    pub fn count(&self) -> usize {
        self.cells.count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn default_value(&self) -> &V {
        self.cells.default_value()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, (K0, K1), V> {
        self.cells.iter()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Replaces the contents of `self` with an independent snapshot of `other`.
    pub fn copy_from(&mut self, other: &SparseMatrix<K0, K1, V>)
    where
        K0: Clone,
        K1: Clone,
        V: Clone,
    {
        self.cells.copy_from(&other.cells);
    }
}

impl<K0, K1, V> Default for SparseMatrix<K0, K1, V>
where
    K0: Eq + Hash,
    K1: Eq + Hash,
    V: Zero,
{
    fn default() -> Self {
        SparseMatrix::new(V::zero())
    }
}

impl<'a, K0, K1, V> IntoIterator for &'a SparseMatrix<K0, K1, V>
where
    K0: Eq + Hash,
    K1: Eq + Hash,
{
    type Item = (&'a (K0, K1), &'a V);
    type IntoIter = hash_map::Iter<'a, (K0, K1), V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
