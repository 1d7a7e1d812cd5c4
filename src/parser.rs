//! Recursive-descent JSON parser.
//!
//! One function per grammar production. Each production skips leading
//! whitespace, checks its lookahead, and either consumes exactly its own
//! characters or fails. A failure is final for the whole parse: the cursor
//! may already have moved, and nothing backtracks into another production.
//!
//! The grammar is a permissive superset of JSON:
//!
//! - a comma before `}` or `]` is accepted, and commas between members are
//!   optional (`[1 2]` parses as two elements)
//! - numbers are runs of `[0-9.]`, without sign or exponent
//! - any lookahead not claimed by another production is handed to the null
//!   production, which fails on anything but `null`
//! - an object key must be followed directly by `:`, with no whitespace
//! - input after the first complete value is not examined

use log::trace;

use crate::context::ParseContext;
use crate::error::{ParseError, ParseResult};
use crate::value::{Array, Number, Object, Value};

/// Parse any value, dispatching on one character of lookahead.
pub fn parse_any<I: Iterator<Item = char>>(ctx: &mut ParseContext<I>) -> ParseResult<Value> {
    ctx.skip_whitespace();
    match ctx.peek() {
        None => {
            trace!("value production reached end of input");
            Err(ParseError)
        }
        Some('{') => parse_object(ctx),
        Some('"') => parse_string(ctx).map(Value::String),
        Some(c) if c.is_ascii_digit() || c == '.' => parse_number(ctx),
        Some('[') => parse_array(ctx),
        Some('t' | 'f') => parse_bool(ctx),
        Some(_) => parse_null(ctx),
    }
}

/// Parse `{ "key": value, ... }`.
pub fn parse_object<I: Iterator<Item = char>>(ctx: &mut ParseContext<I>) -> ParseResult<Value> {
    ctx.skip_whitespace();
    if !ctx.eat('{') {
        trace!("object production: expected '{{'");
        return Err(ParseError);
    }
    ctx.enter()?;
    ctx.skip_whitespace();

    let mut members = Object::new();
    loop {
        match ctx.peek() {
            None => {
                trace!("object production: unterminated object");
                return Err(ParseError);
            }
            Some('}') => {
                ctx.advance();
                ctx.leave();
                return Ok(Value::Object(members));
            }
            Some(_) => {}
        }

        let key = parse_string(ctx)?;
        if !ctx.eat(':') {
            trace!("object production: expected ':' after key {key:?}");
            return Err(ParseError);
        }
        let value = parse_any(ctx)?;
        members.insert(key, value);

        ctx.skip_whitespace();
        ctx.eat(',');
        ctx.skip_whitespace();
    }
}

/// Parse `[ value, ... ]`. Elements are keyed `0, 1, 2, …` in parse order.
pub fn parse_array<I: Iterator<Item = char>>(ctx: &mut ParseContext<I>) -> ParseResult<Value> {
    ctx.skip_whitespace();
    if !ctx.eat('[') {
        trace!("array production: expected '['");
        return Err(ParseError);
    }
    ctx.enter()?;
    ctx.skip_whitespace();

    let mut elements = Array::new();
    loop {
        match ctx.peek() {
            None => {
                trace!("array production: unterminated array");
                return Err(ParseError);
            }
            Some(']') => {
                ctx.advance();
                ctx.leave();
                return Ok(Value::Array(elements));
            }
            Some(_) => {}
        }

        let value = parse_any(ctx)?;
        elements.push(value);

        ctx.skip_whitespace();
        ctx.eat(',');
        ctx.skip_whitespace();
    }
}

/// Decode the character following a backslash.
///
/// Characters outside the escape table pass through literally.
pub fn unescape(c: char) -> char {
    match c {
        'r' => '\r',
        'n' => '\n',
        't' => '\t',
        'v' => '\x0B',
        // `\\`, `\"` and everything else map to themselves.
        other => other,
    }
}

/// Parse a quoted string and return its decoded contents.
pub fn parse_string<I: Iterator<Item = char>>(ctx: &mut ParseContext<I>) -> ParseResult<String> {
    ctx.skip_whitespace();
    if !ctx.eat('"') {
        trace!("string production: expected '\"'");
        return Err(ParseError);
    }

    let mut result = String::new();
    loop {
        match ctx.advance() {
            None => {
                trace!("string production: unterminated string");
                return Err(ParseError);
            }
            Some('"') => return Ok(result),
            Some('\\') => match ctx.advance() {
                Some(c) => result.push(unescape(c)),
                None => {
                    trace!("string production: input ends inside escape");
                    return Err(ParseError);
                }
            },
            Some(c) => result.push(c),
        }
    }
}

/// Collect the longest run of characters matching `pred`.
fn take_while<I, P>(ctx: &mut ParseContext<I>, pred: P) -> String
where
    I: Iterator<Item = char>,
    P: Fn(char) -> bool,
{
    let mut rep = String::new();
    while let Some(c) = ctx.peek() {
        if !pred(c) {
            break;
        }
        rep.push(c);
        ctx.advance();
    }
    rep
}

/// Parse a run of `[0-9.]` as an integer or a double.
pub fn parse_number<I: Iterator<Item = char>>(ctx: &mut ParseContext<I>) -> ParseResult<Value> {
    ctx.skip_whitespace();
    let rep = take_while(ctx, |c| c.is_ascii_digit() || c == '.');
    number_from_text(&rep).map(Value::Number)
}

/// Validate and convert the text collected by the number production.
pub fn number_from_text(rep: &str) -> ParseResult<Number> {
    if rep.is_empty() {
        trace!("number production: no digits");
        return Err(ParseError);
    }
    if rep.starts_with("00") {
        trace!("number production rejected {rep:?}: redundant leading zero");
        return Err(ParseError);
    }

    match rep.matches('.').count() {
        0 => rep.parse::<i64>().map(Number::Int).map_err(|_| {
            trace!("number production rejected {rep:?}: integer out of range");
            ParseError
        }),
        1 => {
            if rep.starts_with('.') || rep.ends_with('.') {
                trace!("number production rejected {rep:?}: dot at boundary");
                return Err(ParseError);
            }
            match rep.parse::<f64>() {
                Ok(d) if d.is_finite() => Ok(Number::Double(d)),
                _ => {
                    trace!("number production rejected {rep:?}: double out of range");
                    Err(ParseError)
                }
            }
        }
        _ => {
            trace!("number production rejected {rep:?}: multiple dots");
            Err(ParseError)
        }
    }
}

/// Parse `true` or `false`.
pub fn parse_bool<I: Iterator<Item = char>>(ctx: &mut ParseContext<I>) -> ParseResult<Value> {
    ctx.skip_whitespace();
    let word = take_while(ctx, |c| c.is_ascii_lowercase());
    match word.as_str() {
        "true" => Ok(Value::Bool(true)),
        "false" => Ok(Value::Bool(false)),
        _ => {
            trace!("bool production rejected {word:?}");
            Err(ParseError)
        }
    }
}

/// Parse `null`.
pub fn parse_null<I: Iterator<Item = char>>(ctx: &mut ParseContext<I>) -> ParseResult<Value> {
    ctx.skip_whitespace();
    let word = take_while(ctx, |c| c.is_ascii_lowercase());
    if word == "null" {
        Ok(Value::Null)
    } else {
        trace!("null production rejected {word:?}");
        Err(ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limits::Limits;

    fn parse_str(input: &str) -> ParseResult<Value> {
        parse_any(&mut ParseContext::for_str(input))
    }

    #[test]
    fn test_parse_literals() {
        assert_eq!(parse_str("null").unwrap(), Value::Null);
        assert_eq!(parse_str("true").unwrap(), Value::Bool(true));
        assert_eq!(parse_str("false").unwrap(), Value::Bool(false));
    }

    #[test]
    fn test_literal_accumulation_is_greedy() {
        assert!(parse_str("tru").is_err());
        assert!(parse_str("truely").is_err());
        assert!(parse_str("nul").is_err());
        assert!(parse_str("nulls").is_err());
        // Non-lowercase characters end the word.
        assert_eq!(parse_str("trueX").unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_parse_numbers() {
        assert_eq!(parse_str("42").unwrap(), Value::Number(Number::Int(42)));
        assert_eq!(parse_str("0").unwrap(), Value::Number(Number::Int(0)));
        assert_eq!(parse_str("4.5").unwrap(), Value::Number(Number::Double(4.5)));
        assert_eq!(parse_str("0.25").unwrap(), Value::Number(Number::Double(0.25)));
    }

    #[test]
    fn test_number_validation() {
        assert!(number_from_text("").is_err());
        assert!(number_from_text("00").is_err());
        assert!(number_from_text("001").is_err());
        assert!(number_from_text("1.").is_err());
        assert!(number_from_text(".5").is_err());
        assert!(number_from_text("1.2.3").is_err());
        assert!(number_from_text(".").is_err());
        // Only the first two characters are checked for leading zeros.
        assert_eq!(number_from_text("01"), Ok(Number::Int(1)));
        assert_eq!(number_from_text("0.0"), Ok(Number::Double(0.0)));
    }

    #[test]
    fn test_number_range() {
        assert_eq!(
            number_from_text("9223372036854775807"),
            Ok(Number::Int(i64::MAX))
        );
        assert!(number_from_text("9223372036854775808").is_err());

        let huge = format!("1{}.0", "0".repeat(400));
        assert!(number_from_text(&huge).is_err());
    }

    #[test]
    fn test_number_stops_at_non_numeric() {
        let mut ctx = ParseContext::for_str("12e5");
        assert_eq!(parse_number(&mut ctx).unwrap(), Value::Number(Number::Int(12)));
        assert_eq!(ctx.peek(), Some('e'));
    }

    #[test]
    fn test_sign_is_not_a_number() {
        // '-' is not claimed by the number production and falls to null.
        assert!(parse_str("-1").is_err());
    }

    #[test]
    fn test_parse_string_escapes() {
        assert_eq!(
            parse_str(r#""a\nb""#).unwrap(),
            Value::String("a\nb".to_string())
        );
        assert_eq!(
            parse_str(r#""\\ \" \r \t \v""#).unwrap(),
            Value::String("\\ \" \r \t \x0B".to_string())
        );
        // Unknown escapes drop the backslash.
        assert_eq!(
            parse_str(r#""\q\/A""#).unwrap(),
            Value::String("q/A".to_string())
        );
    }

    #[test]
    fn test_unterminated_string() {
        assert!(parse_str(r#""abc"#).is_err());
        assert!(parse_str(r#""abc\"#).is_err());
    }

    #[test]
    fn test_parse_array() {
        let v = parse_str("[1, 2, 3]").unwrap();
        assert_eq!(
            v,
            Value::from(vec![Value::from(1i64), Value::from(2i64), Value::from(3i64)])
        );
        assert_eq!(parse_str("[]").unwrap(), Value::from(Vec::new()));
        assert_eq!(parse_str("[ ]").unwrap(), Value::from(Vec::new()));
    }

    #[test]
    fn test_trailing_comma_accepted() {
        let v = parse_str("[1,2,]").unwrap();
        assert_eq!(v.as_array().map(|a| a.len()), Some(2));

        let v = parse_str(r#"{"a":1,}"#).unwrap();
        assert_eq!(v.get("a"), Some(&Value::from(1i64)));
    }

    #[test]
    fn test_missing_comma_accepted() {
        let v = parse_str("[1 2]").unwrap();
        assert_eq!(v.as_array().map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_parse_object() {
        let v = parse_str(r#" { "a": 1 , "b": [true] } "#).unwrap();
        let keys = v.as_object().unwrap().fold(Vec::new(), |mut acc, k, _| {
            acc.push(k.clone());
            acc
        });
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(v.get("b").and_then(|b| b.get_index(0)), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_object_failures() {
        assert!(parse_str("{").is_err());
        assert!(parse_str(r#"{"a"}"#).is_err());
        assert!(parse_str(r#"{"a":}"#).is_err());
        assert!(parse_str(r#"{a:1}"#).is_err());
        assert!(parse_str(r#"{"a":1"#).is_err());
    }

    #[test]
    fn test_colon_must_follow_key_directly() {
        assert!(parse_str(r#"{"a" :1}"#).is_err());
        assert!(parse_str(r#"{ "a":1}"#).is_ok());
        assert!(parse_str(r#"{"a": 1}"#).is_ok());
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let v = parse_str(r#"{"a":1,"b":2,"a":3}"#).unwrap();
        assert_eq!(v.get("a"), Some(&Value::from(3i64)));
        assert_eq!(v.as_object().map(|o| o.len()), Some(2));
    }

    #[test]
    fn test_dispatch_fallback_to_null() {
        assert!(parse_str("x").is_err());
        assert!(parse_str("}").is_err());
        assert!(parse_str("").is_err());
        assert!(parse_str("   ").is_err());
    }

    #[test]
    fn test_trailing_input_ignored() {
        let mut ctx = ParseContext::for_str("null extra");
        assert_eq!(parse_any(&mut ctx).unwrap(), Value::Null);
        ctx.skip_whitespace();
        assert_eq!(ctx.peek(), Some('e'));
    }

    #[test]
    fn test_nesting_depth_limit() {
        let limits = Limits::new().with_max_nesting_depth(2);

        let mut ctx = ParseContext::with_limits("[[1]]".chars(), limits);
        assert!(parse_any(&mut ctx).is_ok());

        let mut ctx = ParseContext::with_limits("[[[1]]]".chars(), limits);
        assert!(parse_any(&mut ctx).is_err());

        let mut ctx = ParseContext::with_limits(r#"[{"a":[]}]"#.chars(), limits);
        assert!(parse_any(&mut ctx).is_err());
    }

    #[test]
    fn test_sibling_containers_do_not_accumulate_depth() {
        let limits = Limits::new().with_max_nesting_depth(2);
        let mut ctx = ParseContext::with_limits("[[],[],[],{}]".chars(), limits);
        assert!(parse_any(&mut ctx).is_ok());
        assert_eq!(ctx.depth(), 0);
    }
}
