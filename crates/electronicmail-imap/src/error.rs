//! Error types for the mailbox-listing parser.

use std::fmt;

use thiserror::Error;

use crate::listing::Status;

/// What went wrong while parsing a LIST response line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParseErrorKind {
    /// The attribute list is missing its opening or closing parenthesis.
    MalformedAttributeList,
    /// A byte (or the end of input) appeared where the grammar allows none
    /// of the expected alternatives.
    UnexpectedByte,
    /// The same attribute token appeared twice in one entry.
    DuplicateAttribute,
    /// The delimiter is neither `NIL` nor a single quoted character.
    MalformedDelimiter,
    /// A backslash inside the name is not followed by `"` or `\`.
    InvalidEscape,
    /// Content follows the closing quote of the name.
    TrailingData,
    /// The line ended inside the quoted mailbox name.
    UnterminatedName,
}

impl ParseErrorKind {
    /// Returns a short description of the failure.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MalformedAttributeList => "malformed attribute list",
            Self::UnexpectedByte => "unexpected byte",
            Self::DuplicateAttribute => "duplicate attribute",
            Self::MalformedDelimiter => "malformed hierarchy delimiter",
            Self::InvalidEscape => "invalid escape in mailbox name",
            Self::TrailingData => "trailing data after mailbox name",
            Self::UnterminatedName => "unterminated mailbox name",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parse failure with the byte offset at which it was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseError {
    kind: ParseErrorKind,
    offset: usize,
    found: Option<u8>,
}

impl ParseError {
    /// Creates a parse error.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, offset: usize, found: Option<u8>) -> Self {
        Self {
            kind,
            offset,
            found,
        }
    }

    /// Returns the failure kind.
    #[must_use]
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the byte offset where the scan stood when the mismatch was
    /// detected.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the byte found at [`offset`](Self::offset), or `None` if the
    /// input ended there.
    #[must_use]
    pub const fn found(&self) -> Option<u8> {
        self.found
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.offset)?;
        match self.found {
            Some(byte) => write!(f, " (found '{}')", byte.escape_ascii()),
            None => write!(f, " (end of input)"),
        }
    }
}

/// Errors raised while collecting a multi-line listing reply.
#[derive(Debug, Error)]
pub enum Error {
    /// A LIST/LSUB line could not be parsed.
    #[error("malformed mailbox entry on line {line}: {source}")]
    Parse {
        /// One-based line number within the reply.
        line: usize,
        /// The underlying parse failure.
        #[source]
        source: ParseError,
    },

    /// A line exceeded the configured length limit.
    #[error("line {line} is {length} bytes long (limit {limit})")]
    LineTooLong {
        /// One-based line number within the reply.
        line: usize,
        /// Length of the offending line.
        length: usize,
        /// Configured maximum.
        limit: usize,
    },

    /// The tagged completion of the reply was `NO` or `BAD`.
    #[error("server answered {status}: {text}")]
    Rejected {
        /// Completion status.
        status: Status,
        /// Human-readable text following the status.
        text: String,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
