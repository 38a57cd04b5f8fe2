//! Encode values back to compact JSON text.
//!
//! The companion to [`crate::parse`]: any tree the parser produces encodes
//! to text that parses back to an equal tree.

use crate::Value;

/// Encode a value as compact RFC 8259 JSON.
pub fn encode(value: &Value) -> String {
    let mut out = String::new();
    encode_value(value, &mut out);
    out
}

fn encode_value(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => encode_float(*f, out),
        Value::String(s) => encode_string(s, out),
        Value::Array(arr) => {
            out.push('[');
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_value(v, out);
            }
            out.push(']');
        }
        Value::Object(obj) => {
            out.push('{');
            for (i, (k, v)) in obj.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_string(k, out);
                out.push(':');
                encode_value(v, out);
            }
            out.push('}');
        }
    }
}

fn encode_float(f: f64, out: &mut String) {
    if f.is_nan() || f.is_infinite() {
        // JSON has no NaN/Infinity; parsed trees never contain them.
        out.push_str("null");
        return;
    }
    let s = format!("{}", f);
    out.push_str(&s);
    // Keep the float shape so re-parsing picks the Float case again.
    if !s.contains('.') && !s.contains('e') && !s.contains('E') {
        out.push_str(".0");
    }
}

fn encode_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\x08' => out.push_str("\\b"),
            '\x0C' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn round_trips(input: &str) {
        let value = parse(input).unwrap();
        let encoded = encode(&value);
        assert_eq!(parse(&encoded).unwrap(), value, "via {:?}", encoded);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(encode(&parse("null").unwrap()), "null");
        assert_eq!(encode(&parse("true").unwrap()), "true");
        assert_eq!(encode(&parse("-42").unwrap()), "-42");
        assert_eq!(encode(&parse("1.5").unwrap()), "1.5");
        assert_eq!(encode(&parse(r#""hi""#).unwrap()), r#""hi""#);
    }

    #[test]
    fn test_float_shape_preserved() {
        // `1e3` displays as `1000`, which would re-parse as an integer
        // without the trailing `.0`.
        let encoded = encode(&parse("1e3").unwrap());
        assert_eq!(encoded, "1000.0");
        round_trips("1e3");
        round_trips("-0.0");
        round_trips("2.5e-3");
        // The largest finite doubles survive the trip; overflowing literals
        // never parse in the first place.
        round_trips("1.7976931348623157e308");
        assert!(parse("1e999").is_err());
    }

    #[test]
    fn test_string_escaping() {
        let encoded = encode(&parse(r#""a\"b\\c""#).unwrap());
        assert_eq!(encoded, r#""a\"b\\c""#);
        round_trips(r#""line\nfeed\tand\bmore\f""#);
    }

    #[test]
    fn test_containers_round_trip() {
        round_trips("[]");
        round_trips("{}");
        round_trips(r#"[1, [2, [3, {"a": null}]], "x"]"#);
        round_trips(r#"{"b": 1, "a": [true, false, 1.25]}"#);
    }

    #[test]
    fn test_object_order_preserved() {
        let value = parse(r#"{"z": 1, "a": 2}"#).unwrap();
        assert_eq!(encode(&value), r#"{"z":1,"a":2}"#);
    }
}
