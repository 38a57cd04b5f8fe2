//! Character cursor over the input text.
//!
//! The cursor owns the decoded input and a scan position. Every sub-parser
//! reads through it; nothing else touches the position. The position only
//! ever moves forward.

use crate::error::{ParseError, Result};

/// A forward-only cursor over the characters of the input.
pub struct Cursor {
    chars: Vec<char>,
    pos: usize,
}

impl Cursor {
    /// Create a cursor at the start of `input`.
    pub fn new(input: &str) -> Self {
        Cursor {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// The current scan position, as a character offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Look at the current character without advancing.
    ///
    /// Returns `None` at end of input. The grammar never needs more than one
    /// character of look-ahead, so no offset parameter exists.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Consume the current character and advance by one.
    ///
    /// Consuming past the end is always an error, never silently clamped.
    pub fn consume(&mut self) -> Result<char> {
        match self.chars.get(self.pos) {
            Some(&c) => {
                self.pos += 1;
                Ok(c)
            }
            None => Err(ParseError::UnexpectedEof { position: self.pos }),
        }
    }

    /// The characters between `start` and the current position, as a string.
    ///
    /// Used by the number parser to convert exactly the span its state
    /// machine validated, with no re-scanning.
    pub fn span_from(&self, start: usize) -> String {
        self.chars[start..self.pos].iter().collect()
    }
}
