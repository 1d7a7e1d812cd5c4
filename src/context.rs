//! Character cursor used by the parser.
//!
//! [`ParseContext`] wraps any character stream and offers single-character
//! lookahead: `ok`/`peek`/`advance` plus whitespace skipping. There is no
//! rewind. A context is built for one parse and dropped afterwards.
//!
//! [`ReadChars`] adapts an [`io::Read`] byte stream into characters so that
//! files and sockets can be parsed without buffering the whole input.

use std::io::{self, Read};
use std::iter::Peekable;
use std::str::Chars;

use log::debug;

use crate::error::{ParseError, ParseResult};
use crate::limits::Limits;

/// Returns true for the ASCII whitespace class: space, tab, LF, VT, FF, CR.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Cursor over a character stream.
pub struct ParseContext<I: Iterator<Item = char>> {
    chars: Peekable<I>,
    limits: Limits,
    depth: usize,
}

impl<I: Iterator<Item = char>> ParseContext<I> {
    /// Create a context with default [`Limits`].
    pub fn new(chars: I) -> Self {
        Self::with_limits(chars, Limits::default())
    }

    /// Create a context with custom limits.
    pub fn with_limits(chars: I, limits: Limits) -> Self {
        Self {
            chars: chars.peekable(),
            limits,
            depth: 0,
        }
    }

    /// Returns true while the stream has input left and is not in an error state.
    pub fn ok(&mut self) -> bool {
        self.chars.peek().is_some()
    }

    /// The next unconsumed character, or None once `!ok()`.
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Consume exactly one character.
    pub fn advance(&mut self) -> Option<char> {
        self.chars.next()
    }

    /// Consume the next character only if it equals `expected`.
    pub fn eat(&mut self, expected: char) -> bool {
        self.chars.next_if_eq(&expected).is_some()
    }

    /// Skip whitespace, stopping at the first other character or at end of input.
    pub fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| is_whitespace(*c)).is_some() {}
    }

    /// Current number of open arrays/objects.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Limits this context enforces.
    pub fn limits(&self) -> Limits {
        self.limits
    }

    /// Open one nesting level, failing if the limit would be exceeded.
    pub(crate) fn enter(&mut self) -> ParseResult<()> {
        if self.depth >= self.limits.max_nesting_depth {
            debug!(
                "nesting depth {} exceeds limit {}",
                self.depth + 1,
                self.limits.max_nesting_depth
            );
            return Err(ParseError);
        }
        self.depth += 1;
        Ok(())
    }

    /// Close one nesting level.
    pub(crate) fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

impl<'a> ParseContext<Chars<'a>> {
    /// Create a context over an in-memory string.
    pub fn for_str(input: &'a str) -> Self {
        Self::new(input.chars())
    }
}

impl<R: Read> ParseContext<ReadChars<R>> {
    /// Create a context over a byte reader decoded as UTF-8.
    pub fn for_reader(reader: R) -> Self {
        Self::new(ReadChars::new(reader))
    }
}

/// UTF-8 decoding character iterator over an [`io::Read`].
///
/// The iterator ends on end of input, on the first I/O error, or on the
/// first invalid UTF-8 sequence. It is fused. [`ReadChars::failed`]
/// tells the error cases apart from a clean end.
pub struct ReadChars<R> {
    bytes: io::Bytes<R>,
    done: bool,
    failed: bool,
}

impl<R: Read> ReadChars<R> {
    /// Wrap a reader. Callers should pass a buffered reader.
    pub fn new(reader: R) -> Self {
        Self {
            bytes: reader.bytes(),
            done: false,
            failed: false,
        }
    }

    /// Returns true if decoding stopped because of an I/O or UTF-8 error.
    pub fn failed(&self) -> bool {
        self.failed
    }

    fn next_byte(&mut self) -> Option<u8> {
        match self.bytes.next()? {
            Ok(b) => Some(b),
            Err(err) => {
                debug!("read error: {err}");
                self.failed = true;
                None
            }
        }
    }

    fn decode(&mut self) -> Option<char> {
        let lead = self.next_byte()?;
        let Some(width) = utf8_width(lead) else {
            debug!("invalid UTF-8 lead byte {lead:#04x}");
            self.failed = true;
            return None;
        };

        let mut buf = [lead, 0, 0, 0];
        for slot in buf.iter_mut().take(width).skip(1) {
            match self.next_byte() {
                Some(b) => *slot = b,
                None => {
                    self.failed = true;
                    return None;
                }
            }
        }

        match std::str::from_utf8(&buf[..width]) {
            Ok(s) => s.chars().next(),
            Err(_) => {
                debug!("invalid UTF-8 sequence {:02x?}", &buf[..width]);
                self.failed = true;
                None
            }
        }
    }
}

impl<R: Read> Iterator for ReadChars<R> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        if self.done {
            return None;
        }
        let c = self.decode();
        if c.is_none() {
            self.done = true;
        }
        c
    }
}

/// Encoded length of a UTF-8 sequence from its lead byte.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}
