//! Mailbox-listing response parser.
//!
//! This module provides a sans-I/O parser for the data of untagged `LIST`
//! and `LSUB` responses. The transport is expected to hand over one complete
//! line with the CRLF already removed.
//!
//! # Architecture
//!
//! - **Cursor**: forward-only byte position with error construction
//! - **List machine**: explicit state machine over the response body
//!
//! # Example
//!
//! ```
//! use electronicmail_imap::parser;
//!
//! let entry = parser::parse(br#"(\HasNoChildren) "/" "INBOX""#).unwrap();
//! assert!(entry.attributes().contains("\\HasNoChildren"));
//! assert_eq!(entry.hierarchy_delimiter(), Some('/'));
//! assert_eq!(entry.name().as_bytes(), b"INBOX");
//!
//! let entry = parser::parse_untagged(br#"* LIST (\Noselect) NIL "Top Level""#).unwrap();
//! assert_eq!(entry.hierarchy_delimiter(), None);
//! ```

#![allow(clippy::missing_errors_doc)]

mod cursor;
mod list;

use std::fmt;

use crate::error::{ParseError, ParseErrorKind};
use crate::types::MailboxEntry;

use cursor::Cursor;

/// Which untagged response carried the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListKind {
    /// `* LIST` data.
    List,
    /// `* LSUB` data.
    Lsub,
}

impl ListKind {
    const ALL: [Self; 2] = [Self::List, Self::Lsub];

    /// Returns the response keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "LIST",
            Self::Lsub => "LSUB",
        }
    }
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the body of a LIST response: `(<attributes>) <delimiter> <name>`.
pub fn parse(line: &[u8]) -> Result<MailboxEntry, ParseError> {
    list::run(line, 0)
}

/// Parses a full untagged line, `* LIST <body>` or `* LSUB <body>`.
///
/// Error offsets refer to positions in `line`, prefix included.
pub fn parse_untagged(line: &[u8]) -> Result<MailboxEntry, ParseError> {
    parse_untagged_kind(line).map(|(_, entry)| entry)
}

/// Like [`parse_untagged`], also reporting which keyword was present.
pub fn parse_untagged_kind(line: &[u8]) -> Result<(ListKind, MailboxEntry), ParseError> {
    let (kind, body) = strip_prefix(line)?;
    Ok((kind, list::run(line, body)?))
}

/// Matches `"*" SP ("LIST" / "LSUB") SP` and returns where the body starts.
fn strip_prefix(line: &[u8]) -> Result<(ListKind, usize), ParseError> {
    let mut cursor = Cursor::new(line, 0);
    cursor.expect(b'*', ParseErrorKind::UnexpectedByte)?;
    cursor.expect(b' ', ParseErrorKind::UnexpectedByte)?;

    let start = cursor.position();
    let word = cursor.remaining();
    let Some(kind) = ListKind::ALL.into_iter().find(|kind| {
        word.get(..4)
            .is_some_and(|w| w.eq_ignore_ascii_case(kind.as_str().as_bytes()))
    }) else {
        let matched = ListKind::ALL
            .iter()
            .map(|kind| {
                word.iter()
                    .zip(kind.as_str().bytes())
                    .take_while(|(a, b)| a.eq_ignore_ascii_case(b))
                    .count()
            })
            .max()
            .unwrap_or(0);
        return Err(cursor.error_at(ParseErrorKind::UnexpectedByte, start + matched));
    };
    cursor.skip(4);
    cursor.expect(b' ', ParseErrorKind::UnexpectedByte)?;

    Ok((kind, cursor.position()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_root() {
        let entry = parse(b"() \".\" \"\"").unwrap();
        assert!(entry.attributes().is_empty());
        assert_eq!(entry.hierarchy_delimiter(), Some('.'));
        assert!(entry.name().is_empty());
    }

    #[test]
    fn test_parse_inbox() {
        let entry = parse(b"(\\HasNoChildren) \"/\" \"INBOX\"").unwrap();
        assert_eq!(entry.attributes().len(), 1);
        assert!(entry.attributes().contains("\\HasNoChildren"));
        assert_eq!(entry.hierarchy_delimiter(), Some('/'));
        assert_eq!(entry.name().as_bytes(), b"INBOX");
    }

    #[test]
    fn test_parse_nil_delimiter() {
        let entry = parse(b"(\\Noselect) NIL \"Top Level\"").unwrap();
        assert!(entry.attributes().contains("\\Noselect"));
        assert_eq!(entry.hierarchy_delimiter(), None);
        assert_eq!(entry.name().as_bytes(), b"Top Level");
    }

    #[test]
    fn test_parse_escaped_backslash() {
        let entry = parse(b"(\\Marked \\HasChildren) \"/\" \"Inbox\\\\Archive\"").unwrap();
        assert_eq!(entry.attributes().len(), 2);
        assert_eq!(entry.name().as_bytes(), b"Inbox\\Archive");
    }

    #[test]
    fn test_parse_escaped_quote() {
        let entry = parse(b"() \"/\" \"Say \\\"hi\\\"\"").unwrap();
        assert_eq!(entry.name().as_bytes(), b"Say \"hi\"");
    }

    #[test]
    fn test_parse_duplicate() {
        let err = parse(b"(\\A \\A) \"/\" \"X\"").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::DuplicateAttribute);
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_parse_trailing() {
        let err = parse(b"(\\A) \"/\" \"X\" trailing").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TrailingData);
        assert_eq!(err.offset(), 12);
    }

    #[test]
    fn test_parse_unterminated() {
        let err = parse(b"(\\A) \"/\" \"unterminated").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnterminatedName);
    }

    #[test]
    fn test_parse_is_deterministic() {
        let line = b"(\\Sent \\HasNoChildren) \".\" \"Sent Items\"";
        assert_eq!(parse(line).unwrap(), parse(line).unwrap());
        let bad = b"(\\Sent \\Sent) \".\" \"Sent Items\"";
        assert_eq!(parse(bad).unwrap_err(), parse(bad).unwrap_err());
    }

    #[test]
    fn test_untagged_list() {
        let (kind, entry) =
            parse_untagged_kind(b"* LIST (\\HasNoChildren) \"/\" \"INBOX\"").unwrap();
        assert_eq!(kind, ListKind::List);
        assert_eq!(entry.name().as_bytes(), b"INBOX");
    }

    #[test]
    fn test_untagged_lsub_lowercase() {
        let (kind, entry) = parse_untagged_kind(b"* lsub () \".\" \"News.comp\"").unwrap();
        assert_eq!(kind, ListKind::Lsub);
        assert_eq!(entry.name().as_bytes(), b"News.comp");
    }

    #[test]
    fn test_untagged_prefix_errors() {
        let err = parse_untagged(b"A001 OK LIST completed").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::UnexpectedByte);
        assert_eq!(err.offset(), 0);

        let err = parse_untagged(b"* LIS () \"/\" \"a\"").unwrap_err();
        assert_eq!(err.offset(), 5);

        let err = parse_untagged(b"* STATUS \"a\" (MESSAGES 1)").unwrap_err();
        assert_eq!(err.offset(), 2);

        let err = parse_untagged(b"* LISTX () \"/\" \"a\"").unwrap_err();
        assert_eq!(err.offset(), 6);
    }

    #[test]
    fn test_untagged_offsets_include_prefix() {
        let err = parse_untagged(b"* LIST (\\A) \"/\" \"X\" trailing").unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::TrailingData);
        assert_eq!(err.offset(), 19);
    }

    #[test]
    fn test_list_kind_display() {
        assert_eq!(ListKind::List.to_string(), "LIST");
        assert_eq!(ListKind::Lsub.to_string(), "LSUB");
    }
}
