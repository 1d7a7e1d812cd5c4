//! Error handling for JSON parsing.
//!
//! Parsing has exactly one failure class: the input is malformed. The error
//! carries no position and no cause, so every failing production reports the
//! same value regardless of which branch rejected the input.

use thiserror::Error;

/// Signal that a parse attempt failed.
///
/// Produced for grammar violations, premature end of input, unexpected
/// characters, and exceeded [`Limits`](crate::Limits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("malformed JSON input")]
pub struct ParseError;

/// Result type for parse operations.
pub type ParseResult<T> = Result<T, ParseError>;
