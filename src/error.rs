//! Error types for JSON parsing.

use thiserror::Error;

/// Result type for JSON parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Error type for JSON parsing.
///
/// Every variant carries the scan position (a character offset into the
/// input) at the point of failure. Positions never refer to consumed
/// characters behind the failure point.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A character that no grammar rule accepts at this point.
    #[error("Unexpected character {found:?} at offset {position}")]
    UnexpectedCharacter { found: char, position: usize },

    /// Input ended where a value or character was required.
    #[error("Unexpected end of input at offset {position}")]
    UnexpectedEof { position: usize },

    /// Input ended inside an unclosed object, array, or string.
    #[error("Unterminated {container} at offset {position}")]
    UnterminatedContainer {
        container: &'static str,
        position: usize,
    },

    /// Backslash followed by a character that is not an escape selector.
    #[error("Invalid escape character {found:?} at offset {position}")]
    InvalidEscape { found: char, position: usize },

    /// `\u` not followed by four hex digits.
    #[error("Invalid unicode escape at offset {position}")]
    InvalidUnicodeEscape { position: usize },

    /// Numeric literal violating the JSON number grammar.
    #[error("Invalid number at offset {position}")]
    InvalidNumber { position: usize },

    /// Unescaped control character inside a string.
    #[error("Unescaped control character U+{found:04X} in string at offset {position}")]
    InvalidCharacter { found: u32, position: usize },

    /// Content remaining after the single root value.
    #[error("Trailing data {found:?} after value at offset {position}")]
    TrailingData { found: char, position: usize },
}

impl ParseError {
    /// The character offset at which the parse failed.
    pub fn position(&self) -> usize {
        match self {
            ParseError::UnexpectedCharacter { position, .. }
            | ParseError::UnexpectedEof { position }
            | ParseError::UnterminatedContainer { position, .. }
            | ParseError::InvalidEscape { position, .. }
            | ParseError::InvalidUnicodeEscape { position }
            | ParseError::InvalidNumber { position }
            | ParseError::InvalidCharacter { position, .. }
            | ParseError::TrailingData { position, .. } => *position,
        }
    }
}
