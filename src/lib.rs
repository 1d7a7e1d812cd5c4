//! json-tree - a minimal JSON value library.
//!
//! This crate provides an owned JSON value tree, a recursive-descent parser
//! that builds one from a character stream, and a serializer that renders a
//! tree back to compact text.
//!
//! # Architecture
//!
//! - [`value`] - the value model: [`Value`], [`Number`], [`Kind`]
//! - [`map`] - [`OrderedMap`], the insertion-ordered container behind
//!   arrays and objects
//! - [`context`] - [`ParseContext`], a one-character-lookahead cursor
//! - [`parser`] - one function per grammar production
//! - [`serialize`] - compact serialization
//! - [`limits`] - parser configuration
//! - [`error`] - the parse failure signal
//! - [`conformance`] - corpus-driven conformance runner
//!
//! # Grammar
//!
//! The parser accepts a permissive superset of JSON. Trailing commas are
//! accepted, numbers are unsigned runs of digits with at most one `.`, and
//! input following the first complete value is ignored. See [`parser`] for
//! the full list. Parsing either yields a value or fails with [`ParseError`],
//! which carries no position.
//!
//! # Example
//!
//! ```
//! use json_tree::{parse, serialize, Value};
//!
//! let value = parse(r#"{ "a": 1, "b": [2, 3.5] }"#).unwrap();
//! assert_eq!(value.get("a"), Some(&Value::from(1i64)));
//! assert_eq!(serialize(&value), r#"{"a":1,"b":[2,3.5]}"#);
//!
//! assert!(parse("[1.2.3]").is_err());
//! ```

// Malformed input must surface as ParseError, never as a panic.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod conformance;
pub mod context;
pub mod error;
pub mod limits;
pub mod map;
pub mod parser;
pub mod serialize;
pub mod value;

use std::io::{BufReader, Read};

use log::{debug, trace};

pub use context::{ParseContext, ReadChars};
pub use error::{ParseError, ParseResult};
pub use limits::Limits;
pub use map::OrderedMap;
pub use serialize::{encode_string, serialize, write_value};
pub use value::{Array, Kind, Number, Object, Value};

/// Parse a string with default [`Limits`].
pub fn parse(input: &str) -> ParseResult<Value> {
    parse_with_limits(input, Limits::default())
}

/// Parse a string with custom limits.
pub fn parse_with_limits(input: &str, limits: Limits) -> ParseResult<Value> {
    run(ParseContext::with_limits(input.chars(), limits))
}

/// Parse any character stream with default [`Limits`].
pub fn parse_chars<I: IntoIterator<Item = char>>(chars: I) -> ParseResult<Value> {
    run(ParseContext::new(chars.into_iter()))
}

/// Parse UTF-8 text read from `reader`.
///
/// The reader is buffered internally. A read error or invalid UTF-8 ends
/// the stream, which makes the parse fail unless a complete value was
/// already read.
pub fn parse_reader<R: Read>(reader: R) -> ParseResult<Value> {
    run(ParseContext::new(ReadChars::new(BufReader::new(reader))))
}

fn run<I: Iterator<Item = char>>(mut ctx: ParseContext<I>) -> ParseResult<Value> {
    let result = parser::parse_any(&mut ctx);
    match &result {
        Ok(value) => trace!("parsed {} value", value.kind().name()),
        Err(_) => debug!(
            "parse failed at nesting depth {} (limit {})",
            ctx.depth(),
            ctx.limits().max_nesting_depth
        ),
    }
    result
}
