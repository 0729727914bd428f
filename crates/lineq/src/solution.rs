use std::fmt;

/// Solved variable values in the order the variables first appeared in the input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Solution {
    values: Vec<(String, f64)>,
}

impl Solution {
    /// The value of variable `name`, if it was part of the system.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|&(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, f64)> for Solution {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Solution {
            values: iter.into_iter().collect(),
        }
    }
}

/// Renders `name = value` pairs separated by spaces, e.g. `x = 1 y = 2.5`.
impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}
