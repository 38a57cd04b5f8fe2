//! YAJP (Yet Another JSON Parser): a strict RFC 8259 conformance parser.
//!
//! Converts JSON text into a typed value tree, rejecting anything that
//! deviates from the grammar: leading zeros, trailing commas, unescaped
//! control characters, malformed escapes, trailing data after the root
//! value. Not a streaming engine; the whole input is in memory before
//! parsing begins.
//!
//! # Parsing Pipeline
//!
//! A character cursor over the input feeds a recursive-descent
//! dispatcher that routes on the first significant character of each value
//! and recurses through objects and arrays down to the string, number, and
//! literal sub-parsers.
//!
//! Numbers keep their grammar shape: a literal without fraction or exponent
//! becomes an arbitrary-precision [`Value::Integer`], anything with `.`,
//! `e`, or `E` becomes a [`Value::Float`].

mod cursor;
mod encode;
mod error;
mod parser;
mod value;

pub use encode::encode;
pub use error::{ParseError, Result};
pub use value::Value;

use cursor::Cursor;

/// Parse a JSON document from a string.
///
/// The input must contain exactly one value, optionally surrounded by
/// whitespace. On failure the error names the offending character or
/// condition and carries the character offset where the parse stopped.
///
/// Recursion depth equals the input's nesting depth, so adversarially deep
/// nesting can exhaust the call stack.
///
/// # Example
///
/// ```
/// use yajp::parse;
///
/// let value = parse(r#"{"answer": 42}"#).unwrap();
/// assert_eq!(value.as_object().unwrap()["answer"].as_i64(), Some(42));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    let mut cursor = Cursor::new(input);
    parser::parse_root(&mut cursor)
}
