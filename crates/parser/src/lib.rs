//! Turns lines of text such as `2x + 3y = 8` into a sparse coefficient matrix, a right-hand side
//! vector and a map from variable names to column indices.
mod equation_parser;
mod status;
mod system;

pub use equation_parser::{EquationParser, ParserConfig};
pub use status::ParseStatus;
pub use system::EquationSystem;

use thiserror::Error;

/// The first error found while parsing, and the 0-based character offset in the line where it
/// was found.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("{status} (at position {position})")]
pub struct ParseError {
    pub status: ParseStatus,
    pub position: usize,
}

impl ParseError {
    pub(crate) fn new(status: ParseStatus, position: usize) -> Self {
        debug_assert!(status.is_error());
        ParseError { status, position }
    }
}
