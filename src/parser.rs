//! Recursive-descent JSON parser.
//!
//! The element dispatcher inspects the first significant character of a value
//! and routes to the sub-parser its sigil implies. Object and array parsing
//! recurse back into the dispatcher for nested values, bottoming out at the
//! string, number, and literal parsers. Everything reads through the shared
//! [`Cursor`]; no sub-parser touches the position directly.

use crate::cursor::Cursor;
use crate::error::{ParseError, Result};
use crate::value::Value;
use indexmap::IndexMap;
use num_bigint::BigInt;

/// JSON whitespace: space, tab, line feed, carriage return.
fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// A character that may legally follow a keyword literal.
fn is_literal_terminator(c: char) -> bool {
    is_whitespace(c) || matches!(c, ',' | ']' | '}')
}

/// Consume whitespace characters until the next significant character.
fn skip_whitespace(cursor: &mut Cursor) {
    while cursor.peek().is_some_and(is_whitespace) {
        // Whitespace was just peeked, so consuming cannot fail.
        let _ = cursor.consume();
    }
}

// ============================================================================
// Element Dispatcher
// ============================================================================

/// Parse the single root value of a document.
///
/// Enforces the root-only rules: an empty or all-whitespace input fails with
/// `UnexpectedEof`, and any content remaining after the value fails with
/// `TrailingData`.
pub fn parse_root(cursor: &mut Cursor) -> Result<Value> {
    skip_whitespace(cursor);
    if cursor.peek().is_none() {
        return Err(ParseError::UnexpectedEof {
            position: cursor.position(),
        });
    }
    let value = parse_element(cursor)?;
    skip_whitespace(cursor);
    if let Some(found) = cursor.peek() {
        return Err(ParseError::TrailingData {
            found,
            position: cursor.position(),
        });
    }
    Ok(value)
}

/// Parse exactly one value, dispatching on its sigil.
fn parse_element(cursor: &mut Cursor) -> Result<Value> {
    skip_whitespace(cursor);
    match cursor.peek() {
        Some('{') => parse_object(cursor),
        Some('[') => parse_array(cursor),
        Some('"') => Ok(Value::String(parse_string(cursor)?)),
        Some(c) if c == '-' || c.is_ascii_digit() => parse_number(cursor),
        Some('t') => parse_literal(cursor, "true", Value::Bool(true)),
        Some('f') => parse_literal(cursor, "false", Value::Bool(false)),
        Some('n') => parse_literal(cursor, "null", Value::Null),
        Some(found) => Err(ParseError::UnexpectedCharacter {
            found,
            position: cursor.position(),
        }),
        None => Err(ParseError::UnexpectedEof {
            position: cursor.position(),
        }),
    }
}

// ============================================================================
// Object Parsing
// ============================================================================

/// Parse an object: `{` already peeked.
///
/// The loop walks the states key, colon, value, comma-or-end. `}` is only
/// accepted before the first key or after a value, which is what forbids
/// trailing commas.
fn parse_object(cursor: &mut Cursor) -> Result<Value> {
    let open = cursor.position();
    cursor.consume()?;
    let mut obj: IndexMap<String, Value> = IndexMap::new();

    skip_whitespace(cursor);
    if cursor.peek() == Some('}') {
        cursor.consume()?;
        return Ok(Value::Object(obj));
    }

    loop {
        skip_whitespace(cursor);
        match cursor.peek() {
            Some('"') => {}
            Some(found) => {
                return Err(ParseError::UnexpectedCharacter {
                    found,
                    position: cursor.position(),
                })
            }
            None => {
                return Err(ParseError::UnterminatedContainer {
                    container: "object",
                    position: open,
                })
            }
        }
        let key = parse_string(cursor)?;

        skip_whitespace(cursor);
        match cursor.peek() {
            Some(':') => {
                cursor.consume()?;
            }
            Some(found) => {
                return Err(ParseError::UnexpectedCharacter {
                    found,
                    position: cursor.position(),
                })
            }
            None => {
                return Err(ParseError::UnterminatedContainer {
                    container: "object",
                    position: open,
                })
            }
        }

        skip_whitespace(cursor);
        if cursor.peek().is_none() {
            return Err(ParseError::UnterminatedContainer {
                container: "object",
                position: open,
            });
        }
        let value = parse_element(cursor)?;
        // A repeated key overwrites in place: the value of the last
        // occurrence wins, the position of the first occurrence is kept.
        obj.insert(key, value);

        skip_whitespace(cursor);
        match cursor.peek() {
            Some(',') => {
                cursor.consume()?;
            }
            Some('}') => {
                cursor.consume()?;
                return Ok(Value::Object(obj));
            }
            Some(found) => {
                return Err(ParseError::UnexpectedCharacter {
                    found,
                    position: cursor.position(),
                })
            }
            None => {
                return Err(ParseError::UnterminatedContainer {
                    container: "object",
                    position: open,
                })
            }
        }
    }
}

// ============================================================================
// Array Parsing
// ============================================================================

/// Parse an array: `[` already peeked.
///
/// Same state ordering as the object parser without keys: `]` is accepted
/// before the first element or after an element, never after a comma.
fn parse_array(cursor: &mut Cursor) -> Result<Value> {
    let open = cursor.position();
    cursor.consume()?;
    let mut arr: Vec<Value> = Vec::new();

    skip_whitespace(cursor);
    if cursor.peek() == Some(']') {
        cursor.consume()?;
        return Ok(Value::Array(arr));
    }

    loop {
        skip_whitespace(cursor);
        if cursor.peek().is_none() {
            return Err(ParseError::UnterminatedContainer {
                container: "array",
                position: open,
            });
        }
        arr.push(parse_element(cursor)?);

        skip_whitespace(cursor);
        match cursor.peek() {
            Some(',') => {
                cursor.consume()?;
            }
            Some(']') => {
                cursor.consume()?;
                return Ok(Value::Array(arr));
            }
            Some(found) => {
                return Err(ParseError::UnexpectedCharacter {
                    found,
                    position: cursor.position(),
                })
            }
            None => {
                return Err(ParseError::UnterminatedContainer {
                    container: "array",
                    position: open,
                })
            }
        }
    }
}

// ============================================================================
// String Parsing
// ============================================================================

/// Parse a quoted string: `"` already peeked.
///
/// Decodes the eight single-character escapes and `\uXXXX` code units,
/// combining a high surrogate immediately followed by a low surrogate into
/// one supplementary-plane character. An unpaired surrogate is accepted, not
/// rejected; since a Rust `String` cannot hold one, it decodes to U+FFFD.
fn parse_string(cursor: &mut Cursor) -> Result<String> {
    let open = cursor.position();
    cursor.consume()?;
    let mut out = String::new();
    // High surrogate waiting for a directly following low surrogate escape.
    let mut pending_high: Option<u16> = None;

    loop {
        let position = cursor.position();
        let c = match cursor.peek() {
            Some(c) => c,
            None => {
                return Err(ParseError::UnterminatedContainer {
                    container: "string",
                    position: open,
                })
            }
        };
        match c {
            '"' => {
                cursor.consume()?;
                flush_pending_surrogate(&mut out, &mut pending_high);
                return Ok(out);
            }
            '\\' => {
                cursor.consume()?;
                parse_escape(cursor, &mut out, &mut pending_high, open)?;
            }
            c if (c as u32) < 0x20 => {
                return Err(ParseError::InvalidCharacter {
                    found: c as u32,
                    position,
                });
            }
            c => {
                cursor.consume()?;
                flush_pending_surrogate(&mut out, &mut pending_high);
                out.push(c);
            }
        }
    }
}

/// Emit a stranded high surrogate before appending anything else.
fn flush_pending_surrogate(out: &mut String, pending_high: &mut Option<u16>) {
    if pending_high.take().is_some() {
        out.push(char::REPLACEMENT_CHARACTER);
    }
}

/// Decode one escape sequence, the `\` already consumed.
fn parse_escape(
    cursor: &mut Cursor,
    out: &mut String,
    pending_high: &mut Option<u16>,
    open: usize,
) -> Result<()> {
    let position = cursor.position();
    let selector = match cursor.peek() {
        Some(c) => c,
        None => {
            return Err(ParseError::UnterminatedContainer {
                container: "string",
                position: open,
            })
        }
    };
    let literal = match selector {
        '"' => '"',
        '\\' => '\\',
        '/' => '/',
        'b' => '\x08',
        'f' => '\x0C',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        'u' => {
            cursor.consume()?;
            let unit = parse_hex_code_unit(cursor)?;
            append_code_unit(out, pending_high, unit);
            return Ok(());
        }
        found => return Err(ParseError::InvalidEscape { found, position }),
    };
    cursor.consume()?;
    flush_pending_surrogate(out, pending_high);
    out.push(literal);
    Ok(())
}

/// Consume exactly four hex digits and return the 16-bit code unit.
fn parse_hex_code_unit(cursor: &mut Cursor) -> Result<u16> {
    let mut unit: u16 = 0;
    for _ in 0..4 {
        let position = cursor.position();
        let digit = cursor
            .peek()
            .and_then(|c| c.to_digit(16))
            .ok_or(ParseError::InvalidUnicodeEscape { position })?;
        cursor.consume()?;
        unit = unit * 16 + digit as u16;
    }
    Ok(unit)
}

/// Append one decoded `\uXXXX` code unit, pairing surrogates.
fn append_code_unit(out: &mut String, pending_high: &mut Option<u16>, unit: u16) {
    if (0xD800..0xDC00).contains(&unit) {
        flush_pending_surrogate(out, pending_high);
        *pending_high = Some(unit);
    } else if (0xDC00..0xE000).contains(&unit) {
        match pending_high.take() {
            Some(high) => {
                let code =
                    0x10000 + ((high as u32 - 0xD800) << 10) + (unit as u32 - 0xDC00);
                // A combined pair is always a valid supplementary code point.
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            None => out.push(char::REPLACEMENT_CHARACTER),
        }
    } else {
        flush_pending_surrogate(out, pending_high);
        // Non-surrogate 16-bit units are always valid chars.
        out.push(char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
}

// ============================================================================
// Number Parsing
// ============================================================================

/// Parse a numeric literal: `-` or a digit already peeked.
///
/// Walks the JSON number grammar one character at a time: optional minus, an
/// integer part that is `0` or a nonzero digit followed by digits, optional
/// fraction with at least one digit, optional exponent with at least one
/// digit. The validated span is converted exactly once, as a `BigInt` when
/// no fraction or exponent was present and as an `f64` otherwise.
fn parse_number(cursor: &mut Cursor) -> Result<Value> {
    let start = cursor.position();

    if cursor.peek() == Some('-') {
        cursor.consume()?;
    }

    match cursor.peek() {
        Some('0') => {
            cursor.consume()?;
            // `012` is invalid: a bare zero cannot be followed by a digit.
            if cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(ParseError::InvalidNumber {
                    position: cursor.position(),
                });
            }
        }
        Some(c) if c.is_ascii_digit() => {
            while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                cursor.consume()?;
            }
        }
        _ => {
            // A minus with no digit, or a stray sigil mismatch.
            return Err(ParseError::InvalidNumber {
                position: cursor.position(),
            });
        }
    }

    let mut is_float = false;

    if cursor.peek() == Some('.') {
        is_float = true;
        cursor.consume()?;
        if !cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(ParseError::InvalidNumber {
                position: cursor.position(),
            });
        }
        while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            cursor.consume()?;
        }
    }

    if matches!(cursor.peek(), Some('e') | Some('E')) {
        is_float = true;
        cursor.consume()?;
        if matches!(cursor.peek(), Some('+') | Some('-')) {
            cursor.consume()?;
        }
        if !cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            return Err(ParseError::InvalidNumber {
                position: cursor.position(),
            });
        }
        while cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            cursor.consume()?;
        }
    }

    // A second `.` or a second exponent marker belongs to the same malformed
    // literal, not to whatever follows the number.
    if matches!(cursor.peek(), Some('.') | Some('e') | Some('E')) {
        return Err(ParseError::InvalidNumber {
            position: cursor.position(),
        });
    }

    let text = cursor.span_from(start);
    if is_float {
        let f: f64 = text
            .parse()
            .map_err(|_| ParseError::InvalidNumber { position: start })?;
        // An exponent that overflows f64 (`1e999`) has no finite value to
        // represent; trees produced by parsing never hold NaN or infinity.
        if !f.is_finite() {
            return Err(ParseError::InvalidNumber { position: start });
        }
        Ok(Value::Float(f))
    } else {
        let n: BigInt = text
            .parse()
            .map_err(|_| ParseError::InvalidNumber { position: start })?;
        Ok(Value::Integer(n))
    }
}

// ============================================================================
// Literal Parsing
// ============================================================================

/// Parse a keyword literal (`true`, `false`, `null`) character by character.
///
/// After the keyword, the next character must be whitespace, a container
/// closer, or end of input: `trueX` fails rather than parsing as `true`
/// followed by garbage.
fn parse_literal(cursor: &mut Cursor, keyword: &'static str, value: Value) -> Result<Value> {
    for expected in keyword.chars() {
        let position = cursor.position();
        match cursor.peek() {
            Some(c) if c == expected => {
                cursor.consume()?;
            }
            Some(found) => return Err(ParseError::UnexpectedCharacter { found, position }),
            None => return Err(ParseError::UnexpectedEof { position }),
        }
    }
    if let Some(found) = cursor.peek() {
        if !is_literal_terminator(found) {
            return Err(ParseError::UnexpectedCharacter {
                found,
                position: cursor.position(),
            });
        }
    }
    Ok(value)
}
