//! Solves systems of linear equations given as free-form text, e.g. `2x + 3y = 8, 3x - y = 1`.
//!
//! The text is split into lines, each line is fed to an [`EquationParser`] session that builds
//! the coefficient matrix, and the resulting square system is solved with the refined Crout LU
//! solver from the `linear` crate. Every call owns its own parser session and system, so calls
//! are independent of each other.
use std::cmp::Ordering;

use linear::{Crout, LSolver, RefinementConfig};
use log::debug;
use parser::{EquationParser, EquationSystem, ParserConfig};

mod error;
mod solution;

pub use error::Error;
pub use solution::Solution;

/// Options for a single solve.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SolveOptions {
    pub parser: ParserConfig,
    pub refinement: RefinementConfig,
}

/// Splits input text into equation lines.
///
/// Lines are separated by `\r\n`, `\r`, `\n`, the two characters `\` `n`, or a comma. Empty
/// pieces are kept.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        let separator_len = match bytes[i] {
            b'\r' if bytes.get(i + 1) == Some(&b'\n') => 2,
            b'\\' if bytes.get(i + 1) == Some(&b'n') => 2,
            b'\r' | b'\n' | b',' => 1,
            _ => 0,
        };

        if separator_len == 0 {
            i += 1;
        } else {
            lines.push(&text[start..i]);
            i += separator_len;
            start = i;
        }
    }
    lines.push(&text[start..]);

    lines
}

/// Parses all of `text` into a fresh [`EquationSystem`].
pub fn parse_text(text: &str, config: ParserConfig) -> Result<EquationSystem, Error> {
    let mut system = EquationSystem::new();
    let mut parser = EquationParser::with_config(config);

    for line in split_lines(text) {
        parser.parse(line, &mut system)?;
    }
    parser.finish()?;

    Ok(system)
}

/// Solves the system in `text` with default options.
pub fn solve_text(text: &str) -> Result<Solution, Error> {
    solve_text_with(text, &SolveOptions::default())
}

pub fn solve_text_with(text: &str, options: &SolveOptions) -> Result<Solution, Error> {
    let system = parse_text(text, options.parser)?;

    let equations = system.equation_count;
    let variables = system.variable_count();
    debug!("parsed {} equations in {} variables", equations, variables);

    match equations.cmp(&variables) {
        Ordering::Less => return Err(Error::TooFewEquations { equations, variables }),
        Ordering::Greater => return Err(Error::TooManyEquations { equations, variables }),
        Ordering::Equal => {}
    }

    let mut solver = Crout::new(options.refinement);
    solver.setup(equations, &system.matrix)?;
    let x = solver.solve(&system.matrix, &system.rhs)?;
    debug!(
        "solved after {} refinement iterations, final ratio {:e}",
        solver.num_iters(),
        solver.res_norm()
    );

    Ok(system
        .variable_names()
        .into_iter()
        .enumerate()
        .map(|(index, name)| (name.to_owned(), x.get(&index)))
        .collect())
}

/// Solves the system in `text` and renders the outcome.
///
/// Never fails: the result is either the solution, as in `x = 1 y = 2`, or a diagnostic message.
pub fn solve_equation_text(text: &str) -> String {
    match solve_text(text) {
        Ok(solution) => solution.to_string(),
        Err(err) => {
            debug!("could not solve input: {:?}", err);
            err.to_string()
        }
    }
}
