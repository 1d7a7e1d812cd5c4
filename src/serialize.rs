//! Compact JSON serialization.
//!
//! Renders a [`Value`] tree without any whitespace between tokens. Object
//! members come out in insertion order, array elements in index order.
//! Strings are re-escaped with the same table the parser decodes, and every
//! other character is written verbatim.

use std::fmt::{self, Write};

use crate::value::{Array, Number, Object, Value};

/// Serialize a value to compact JSON text.
pub fn serialize(value: &Value) -> String {
    render(0, |out| write_value(out, value))
}

/// Serialize a value into any [`fmt::Write`] sink.
pub fn write_value<W: Write>(out: &mut W, value: &Value) -> fmt::Result {
    match value {
        Value::Null => out.write_str("null"),
        Value::Bool(true) => out.write_str("true"),
        Value::Bool(false) => out.write_str("false"),
        Value::Number(n) => write_number(out, *n),
        Value::String(s) => write_string(out, s),
        Value::Array(elements) => write_array(out, elements),
        Value::Object(members) => write_object(out, members),
    }
}

/// Re-encode a string as a quoted JSON string literal.
pub fn encode_string(s: &str) -> String {
    render(s.len() + 2, |out| write_string(out, s))
}

fn render<F: FnOnce(&mut String) -> fmt::Result>(capacity: usize, write: F) -> String {
    let mut output = String::with_capacity(capacity);
    // Writing into a String cannot fail.
    let _ = write(&mut output);
    output
}

/// Two-character escape for `c`, if it is in the escape table.
pub fn escape(c: char) -> Option<&'static str> {
    match c {
        '\\' => Some("\\\\"),
        '\r' => Some("\\r"),
        '\n' => Some("\\n"),
        '\x0B' => Some("\\v"),
        '\t' => Some("\\t"),
        '"' => Some("\\\""),
        _ => None,
    }
}

fn write_string<W: Write>(out: &mut W, s: &str) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match escape(c) {
            Some(esc) => out.write_str(esc)?,
            None => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

/// Decimal text of a number.
///
/// Doubles use the shortest text that round-trips and always contain a `.`
/// so they read back as doubles. Non-finite doubles have no JSON form and
/// are written as `null`.
fn write_number<W: Write>(out: &mut W, n: Number) -> fmt::Result {
    match n {
        Number::Int(i) => write!(out, "{i}"),
        Number::Double(d) if !d.is_finite() => out.write_str("null"),
        Number::Double(d) => {
            let text = d.to_string();
            out.write_str(&text)?;
            if !text.contains('.') {
                out.write_str(".0")?;
            }
            Ok(())
        }
    }
}

fn write_array<W: Write>(out: &mut W, elements: &Array) -> fmt::Result {
    out.write_char('[')?;
    elements.fold(Ok::<_, fmt::Error>(true), |state, _, value| {
        let first = state?;
        if !first {
            out.write_char(',')?;
        }
        write_value(out, value)?;
        Ok(false)
    })?;
    out.write_char(']')
}

fn write_object<W: Write>(out: &mut W, members: &Object) -> fmt::Result {
    out.write_char('{')?;
    members.fold(Ok::<_, fmt::Error>(true), |state, key, value| {
        let first = state?;
        if !first {
            out.write_char(',')?;
        }
        write_string(out, key)?;
        out.write_char(':')?;
        write_value(out, value)?;
        Ok(false)
    })?;
    out.write_char('}')
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self)
    }
}
