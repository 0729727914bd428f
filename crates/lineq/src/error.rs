use parser::{ParseError, ParseStatus};
use thiserror::Error;

/// Everything that can stop a text system from being solved. The `Display` text is the message
/// reported to the user.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("{status}")]
    Parse { status: ParseStatus, position: usize },

    #[error("Only {equations} equations is too few equations for {variables} variables")]
    TooFewEquations { equations: usize, variables: usize },

    #[error("{equations} equations is too many equations for only {variables} variables")]
    TooManyEquations { equations: usize, variables: usize },

    #[error("Error - the system of equations is singular.")]
    Singular { row: usize },

    #[error("Error - the system of equations is ill conditioned.")]
    IllConditioned { cause: linear::Conditioning },
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Error::Parse {
            status: err.status,
            position: err.position,
        }
    }
}

impl From<linear::Error> for Error {
    fn from(err: linear::Error) -> Self {
        match err {
            linear::Error::Singular { row } => Error::Singular { row },
            linear::Error::IllConditioned { cause } => Error::IllConditioned { cause },
        }
    }
}
