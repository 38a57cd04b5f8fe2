//! Test harness for the JSON parser against fixture files.
//!
//! Reads all y_*.json files from tests/fixtures/ and parses them, comparing
//! the result against serde_json as a trusted reference decoder. Reads
//! n_*.json files (expected to fail) and verifies the parser rejects them.
//! Accepted fixtures are also re-encoded and re-parsed to check the round
//! trip.

use std::fs;
use std::path::{Path, PathBuf};

use num_bigint::BigInt;
use num_traits::ToPrimitive;
use yajp::{encode, parse, Value};

/// Root fixture directory.
fn fixture_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get all fixture files whose name matches `pattern`.
fn get_fixture_files(pattern: &str) -> Vec<String> {
    let full = format!("{}/{}", fixture_root().display(), pattern);
    let mut files: Vec<String> = glob::glob(&full)
        .expect("invalid glob pattern")
        .flatten()
        .map(|p| p.to_string_lossy().to_string())
        .collect();
    files.sort();
    files
}

/// Compare a parsed value against the reference decoder's value.
fn values_equal(a: &Value, b: &serde_json::Value) -> bool {
    match (a, b) {
        (Value::Null, serde_json::Value::Null) => true,
        (Value::Bool(x), serde_json::Value::Bool(y)) => x == y,
        (Value::Integer(n), serde_json::Value::Number(m)) => {
            if let Some(i) = m.as_i64() {
                *n == BigInt::from(i)
            } else if let Some(u) = m.as_u64() {
                *n == BigInt::from(u)
            } else {
                // The reference stores integers beyond u64 as f64.
                m.as_f64() == n.to_f64()
            }
        }
        (Value::Float(x), serde_json::Value::Number(m)) => m.as_f64() == Some(*x),
        (Value::String(x), serde_json::Value::String(y)) => x == y,
        (Value::Array(x), serde_json::Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(a, b)| values_equal(a, b))
        }
        (Value::Object(x), serde_json::Value::Object(y)) => {
            x.len() == y.len()
                && x.iter()
                    .all(|(k, v)| y.get(k).is_some_and(|bv| values_equal(v, bv)))
        }
        _ => false,
    }
}

/// Run a single y_*.json fixture (expected to parse).
fn run_accept_test(path: &str) -> Result<(), String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    let filename = Path::new(path)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    let value = parse(&content).map_err(|e| format!("{}: Unexpected parse error: {}", filename, e))?;

    let expected: serde_json::Value = serde_json::from_str(&content)
        .map_err(|e| format!("{}: Reference decoder rejected fixture: {}", filename, e))?;
    if !values_equal(&value, &expected) {
        return Err(format!(
            "{}: Output mismatch\n    reference: {}\n    actual:    {:?}",
            filename, expected, value
        ));
    }

    // Round trip: the encoded form must parse back to an equal tree.
    let encoded = encode(&value);
    let reparsed =
        parse(&encoded).map_err(|e| format!("{}: Round trip failed to parse: {}", filename, e))?;
    if reparsed != value {
        return Err(format!(
            "{}: Round trip mismatch via {:?}",
            filename, encoded
        ));
    }

    Ok(())
}

/// Run a single n_*.json fixture (expected to be rejected).
fn run_reject_test(path: &str) -> Result<(), String> {
    let content =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {}", path, e))?;
    let filename = Path::new(path)
        .file_name()
        .unwrap()
        .to_string_lossy()
        .to_string();

    match parse(&content) {
        Ok(value) => Err(format!(
            "{}: Expected parse error, but got success: {:?}",
            filename, value
        )),
        Err(e) => {
            // Determinism: a second parse fails identically.
            let again = parse(&content).expect_err("second parse succeeded");
            if again != e {
                return Err(format!(
                    "{}: Nondeterministic error: {} vs {}",
                    filename, e, again
                ));
            }
            println!("  {} => {}", filename, e);
            Ok(())
        }
    }
}

fn run_all(files: &[String], run: fn(&str) -> Result<(), String>, label: &str) {
    assert!(!files.is_empty(), "No {} fixture files found!", label);

    println!("\nRunning {} {} tests:", files.len(), label);

    let mut passed = 0;
    let mut failed = 0;
    let mut errors: Vec<String> = Vec::new();

    for path in files {
        match run(path) {
            Ok(()) => passed += 1,
            Err(e) => {
                failed += 1;
                errors.push(e);
            }
        }
    }

    println!("\nResults: {} passed, {} failed", passed, failed);

    if !errors.is_empty() {
        println!("\nErrors:");
        for error in &errors {
            println!("  - {}", error);
        }
    }

    assert!(failed == 0, "{} {} tests failed", failed, label);
}

#[test]
fn test_accept_fixtures() {
    run_all(&get_fixture_files("y_*.json"), run_accept_test, "accept");
}

#[test]
fn test_reject_fixtures() {
    run_all(&get_fixture_files("n_*.json"), run_reject_test, "reject");
}

/// Whitespace idempotence: padding a valid document never changes the result.
#[test]
fn test_whitespace_idempotence() {
    for path in get_fixture_files("y_*.json") {
        let content = fs::read_to_string(&path).unwrap();
        let bare = parse(&content).unwrap();
        let padded = format!(" \t\r\n{}\n\r\t ", content);
        assert_eq!(parse(&padded).unwrap(), bare, "padding changed {}", path);
    }
}
