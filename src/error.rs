//! Parser error types.
//!
//! Parsing never aborts on error — the parser records a [`ParseError`] and
//! keeps going, producing a partial tree the evaluator must not execute.
//! Hosts gate evaluation on the error list being empty.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no prefix parse function for {0}")]
    NoPrefixParseFn(String),

    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: String, got: String },

    #[error("could not parse {0:?} as integer")]
    InvalidInteger(String),
}
