#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};
use sparse::{SparseArray, SparseMatrix};

/// The coefficients, right-hand side and variable columns of a system of linear equations, as
/// assembled by [`crate::EquationParser`].
///
/// Row `i` of `matrix` and entry `i` of `rhs` belong to the i'th completed equation. Variables
/// get dense column indices `0..variable_count()` in the order they are first seen.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EquationSystem {
    pub matrix: SparseMatrix<usize, usize, f64>,
    pub rhs: SparseArray<usize, f64>,
    pub variables: SparseArray<String, usize>,
    pub equation_count: usize,
}

impl EquationSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variable_count(&self) -> usize {
        self.variables.count()
    }

    /// Returns the column of `name`, assigning the next free column on first sight.
    pub fn variable_index(&mut self, name: &str) -> usize {
        if let Some(&index) = self.variables.try_get(name) {
            return index;
        }
        let index = self.variables.count();
        self.variables.set(name.to_owned(), index);
        index
    }

    /// Variable names ordered by column index.
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<(&String, &usize)> = self.variables.iter().collect();
        names.sort_unstable_by_key(|&(_, &index)| index);
        names.into_iter().map(|(name, _)| name.as_str()).collect()
    }
}
