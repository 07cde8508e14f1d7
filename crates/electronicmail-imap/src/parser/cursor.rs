//! Byte cursor over a single response line.

use crate::error::{ParseError, ParseErrorKind};

/// Forward-only position in the input.
pub struct Cursor<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor positioned at `pos`.
    #[must_use]
    pub const fn new(input: &'a [u8], pos: usize) -> Self {
        Self { input, pos }
    }

    /// Returns the current position in the input.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the remaining input.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        self.input.get(self.pos..).unwrap_or_default()
    }

    /// Peeks at the current byte without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    /// Peeks at the byte at offset from current position.
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        self.input.get(self.pos + offset).copied()
    }

    /// Advances by one byte and returns it.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Skips n bytes.
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Returns the input between `start` and the current position.
    #[must_use]
    pub fn since(&self, start: usize) -> &'a [u8] {
        self.input.get(start..self.pos).unwrap_or_default()
    }

    /// Consumes `expected` or fails with `kind` at the current position.
    pub fn expect(&mut self, expected: u8, kind: ParseErrorKind) -> Result<(), ParseError> {
        match self.peek() {
            Some(byte) if byte == expected => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error(kind)),
        }
    }

    /// Creates a parse error at the current position.
    #[must_use]
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        ParseError::new(kind, self.pos, self.peek())
    }

    /// Creates a parse error at an earlier position.
    #[must_use]
    pub fn error_at(&self, kind: ParseErrorKind, pos: usize) -> ParseError {
        ParseError::new(kind, pos, self.input.get(pos).copied())
    }
}
