//! State machine for the body of a LIST response.
//!
//! ```text
//! mailbox-list = "(" [mbx-list-flags] ")" SP (DQUOTE QUOTED-CHAR DQUOTE / nil) SP mailbox
//! ```
//!
//! The scan moves strictly forward; every state consumes at least one byte
//! or ends the machine, so the loop in [`run`] is bounded by the input length.

use crate::error::{ParseError, ParseErrorKind};
use crate::types::{Attribute, Attributes, MailboxEntry, MailboxName, is_attribute_char};

use super::cursor::Cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ExpectOpenParen,
    ExpectAttributeOrClose,
    /// After a separating SP another attribute must follow.
    ExpectAttribute,
    /// Collecting the attribute token that begins at `start`.
    InAttribute {
        start: usize,
    },
    ExpectSpaceBeforeDelimiter,
    ExpectSpaceBeforeName,
    InName,
    ExpectEndOfInput,
    Done,
}

struct Machine<'a> {
    cursor: Cursor<'a>,
    attributes: Attributes,
    delimiter: Option<char>,
    name: Vec<u8>,
}

/// Parses `line[start..]` as a LIST response body.
///
/// Error offsets are relative to `line`, not to `start`.
pub(crate) fn run(line: &[u8], start: usize) -> Result<MailboxEntry, ParseError> {
    let mut machine = Machine {
        cursor: Cursor::new(line, start),
        attributes: Attributes::new(),
        delimiter: None,
        name: Vec::new(),
    };

    let mut state = State::ExpectOpenParen;
    while state != State::Done {
        state = machine.step(state)?;
    }

    Ok(MailboxEntry::from_parsed(
        machine.attributes,
        machine.delimiter,
        MailboxName::new(machine.name),
    ))
}

impl Machine<'_> {
    fn step(&mut self, state: State) -> Result<State, ParseError> {
        match state {
            State::ExpectOpenParen => self.open_paren(),
            State::ExpectAttributeOrClose => self.attribute_or_close(),
            State::ExpectAttribute => self.attribute(),
            State::InAttribute { start } => self.in_attribute(start),
            State::ExpectSpaceBeforeDelimiter => self.delimiter(),
            State::ExpectSpaceBeforeName => self.space_before_name(),
            State::InName => self.in_name(),
            State::ExpectEndOfInput => self.end_of_input(),
            State::Done => Ok(State::Done),
        }
    }

    fn open_paren(&mut self) -> Result<State, ParseError> {
        self.cursor
            .expect(b'(', ParseErrorKind::MalformedAttributeList)?;
        Ok(State::ExpectAttributeOrClose)
    }

    fn attribute_or_close(&mut self) -> Result<State, ParseError> {
        match self.cursor.peek() {
            Some(b')') => {
                self.cursor.advance();
                Ok(State::ExpectSpaceBeforeDelimiter)
            }
            Some(b'\\') => self.attribute(),
            None => Err(self.cursor.error(ParseErrorKind::MalformedAttributeList)),
            Some(_) => Err(self.cursor.error(ParseErrorKind::UnexpectedByte)),
        }
    }

    fn attribute(&mut self) -> Result<State, ParseError> {
        match self.cursor.peek() {
            Some(b'\\') => {
                let start = self.cursor.position();
                self.cursor.advance();
                Ok(State::InAttribute { start })
            }
            None => Err(self.cursor.error(ParseErrorKind::MalformedAttributeList)),
            Some(_) => Err(self.cursor.error(ParseErrorKind::UnexpectedByte)),
        }
    }

    fn in_attribute(&mut self, start: usize) -> Result<State, ParseError> {
        match self.cursor.peek() {
            Some(b) if is_attribute_char(b) => {
                self.cursor.advance();
                Ok(State::InAttribute { start })
            }
            Some(separator @ (b' ' | b')')) => {
                let token = self.cursor.since(start);
                // A lone backslash is not an attribute.
                if token.len() < 2 {
                    return Err(self.cursor.error(ParseErrorKind::UnexpectedByte));
                }
                if !self.attributes.insert(Attribute::from_validated(token)) {
                    return Err(self
                        .cursor
                        .error_at(ParseErrorKind::DuplicateAttribute, start));
                }
                self.cursor.advance();
                if separator == b' ' {
                    Ok(State::ExpectAttribute)
                } else {
                    Ok(State::ExpectSpaceBeforeDelimiter)
                }
            }
            None => Err(self.cursor.error(ParseErrorKind::MalformedAttributeList)),
            Some(_) => Err(self.cursor.error(ParseErrorKind::UnexpectedByte)),
        }
    }

    fn delimiter(&mut self) -> Result<State, ParseError> {
        self.cursor.expect(b' ', ParseErrorKind::UnexpectedByte)?;

        if self
            .cursor
            .remaining()
            .get(..3)
            .is_some_and(|word| word.eq_ignore_ascii_case(b"NIL"))
        {
            self.cursor.skip(3);
            self.delimiter = None;
            return Ok(State::ExpectSpaceBeforeName);
        }

        self.cursor
            .expect(b'"', ParseErrorKind::MalformedDelimiter)?;
        let delimiter = match self.cursor.peek() {
            Some(b'\\') => match self.cursor.peek_at(1) {
                Some(escaped @ (b'"' | b'\\')) => {
                    self.cursor.skip(2);
                    escaped
                }
                _ => {
                    self.cursor.advance();
                    return Err(self.cursor.error(ParseErrorKind::MalformedDelimiter));
                }
            },
            Some(c) if is_text_char(c) && c != b'"' => {
                self.cursor.advance();
                c
            }
            _ => return Err(self.cursor.error(ParseErrorKind::MalformedDelimiter)),
        };
        self.cursor
            .expect(b'"', ParseErrorKind::MalformedDelimiter)?;

        self.delimiter = Some(char::from(delimiter));
        Ok(State::ExpectSpaceBeforeName)
    }

    fn space_before_name(&mut self) -> Result<State, ParseError> {
        self.cursor.expect(b' ', ParseErrorKind::UnexpectedByte)?;
        self.cursor.expect(b'"', ParseErrorKind::UnexpectedByte)?;
        Ok(State::InName)
    }

    fn in_name(&mut self) -> Result<State, ParseError> {
        match self.cursor.peek() {
            Some(b'"') => {
                self.cursor.advance();
                Ok(State::ExpectEndOfInput)
            }
            Some(b'\\') => match self.cursor.peek_at(1) {
                Some(escaped @ (b'"' | b'\\')) => {
                    self.name.push(escaped);
                    self.cursor.skip(2);
                    Ok(State::InName)
                }
                Some(_) => Err(self.cursor.error(ParseErrorKind::InvalidEscape)),
                None => {
                    self.cursor.advance();
                    Err(self.cursor.error(ParseErrorKind::UnterminatedName))
                }
            },
            Some(byte) => {
                self.name.push(byte);
                self.cursor.advance();
                Ok(State::InName)
            }
            None => Err(self.cursor.error(ParseErrorKind::UnterminatedName)),
        }
    }

    fn end_of_input(&self) -> Result<State, ParseError> {
        match self.cursor.peek() {
            None => Ok(State::Done),
            Some(_) => Err(self.cursor.error(ParseErrorKind::TrailingData)),
        }
    }
}

/// RFC 3501 `TEXT-CHAR`: any 7-bit character except NUL, CR and LF.
const fn is_text_char(b: u8) -> bool {
    matches!(b, 0x01..=0x7F) && b != b'\r' && b != b'\n'
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(line: &[u8]) -> Result<MailboxEntry, ParseError> {
        run(line, 0)
    }

    fn kind_at(line: &[u8]) -> (ParseErrorKind, usize) {
        let err = parse(line).unwrap_err();
        (err.kind(), err.offset())
    }

    #[test]
    fn starts_mid_line() {
        let entry = run(b"* LIST () \"/\" \"a\"", 7).unwrap();
        assert_eq!(entry.name().as_bytes(), b"a");

        let err = run(b"* LIST (\\A \\A) \"/\" \"a\"", 7).unwrap_err();
        assert_eq!(err.kind(), ParseErrorKind::DuplicateAttribute);
        assert_eq!(err.offset(), 11);
    }

    #[test]
    fn attribute_list_errors() {
        assert_eq!(kind_at(b""), (ParseErrorKind::MalformedAttributeList, 0));
        assert_eq!(
            kind_at(b" () \"/\" \"a\""),
            (ParseErrorKind::MalformedAttributeList, 0)
        );
        assert_eq!(kind_at(b"("), (ParseErrorKind::MalformedAttributeList, 1));
        assert_eq!(
            kind_at(b"(\\Marked"),
            (ParseErrorKind::MalformedAttributeList, 8)
        );
        assert_eq!(
            kind_at(b"(\\Marked "),
            (ParseErrorKind::MalformedAttributeList, 9)
        );
    }

    #[test]
    fn attribute_token_errors() {
        // Not a backslash.
        assert_eq!(
            kind_at(b"(Marked) \"/\" \"a\""),
            (ParseErrorKind::UnexpectedByte, 1)
        );
        // Lone backslash.
        assert_eq!(
            kind_at(b"(\\) \"/\" \"a\""),
            (ParseErrorKind::UnexpectedByte, 2)
        );
        // Space before the closing parenthesis.
        assert_eq!(
            kind_at(b"(\\A ) \"/\" \"a\""),
            (ParseErrorKind::UnexpectedByte, 4)
        );
        // Doubled separator.
        assert_eq!(
            kind_at(b"(\\A  \\B) \"/\" \"a\""),
            (ParseErrorKind::UnexpectedByte, 4)
        );
        // Quote inside a token.
        assert_eq!(
            kind_at(b"(\\A\"B) \"/\" \"a\""),
            (ParseErrorKind::UnexpectedByte, 3)
        );
    }

    #[test]
    fn duplicate_is_textual() {
        let entry = parse(b"(\\Noselect \\NoSelect) \"/\" \"a\"").unwrap();
        assert_eq!(entry.attributes().len(), 2);
    }

    #[test]
    fn delimiter_nil_any_case() {
        for line in [
            &b"() NIL \"a\""[..],
            &b"() nil \"a\""[..],
            &b"() Nil \"a\""[..],
        ] {
            assert_eq!(parse(line).unwrap().hierarchy_delimiter(), None);
        }
    }

    #[test]
    fn delimiter_escaped() {
        let entry = parse(b"() \"\\\\\" \"a\\\\b\"").unwrap();
        assert_eq!(entry.hierarchy_delimiter(), Some('\\'));
        assert_eq!(entry.name().as_bytes(), b"a\\b");

        let entry = parse(b"() \"\\\"\" \"a\"").unwrap();
        assert_eq!(entry.hierarchy_delimiter(), Some('"'));
    }

    #[test]
    fn delimiter_errors() {
        // Missing space.
        assert_eq!(
            kind_at(b"()\"/\" \"a\""),
            (ParseErrorKind::UnexpectedByte, 2)
        );
        // Unquoted.
        assert_eq!(
            kind_at(b"() / \"a\""),
            (ParseErrorKind::MalformedDelimiter, 3)
        );
        // Empty.
        assert_eq!(
            kind_at(b"() \"\" \"a\""),
            (ParseErrorKind::MalformedDelimiter, 4)
        );
        // Two characters.
        assert_eq!(
            kind_at(b"() \"//\" \"a\""),
            (ParseErrorKind::MalformedDelimiter, 5)
        );
        // Bad escape.
        assert_eq!(
            kind_at(b"() \"\\x\" \"a\""),
            (ParseErrorKind::MalformedDelimiter, 5)
        );
        // Eight-bit.
        assert_eq!(
            kind_at(b"() \"\xC3\" \"a\""),
            (ParseErrorKind::MalformedDelimiter, 4)
        );
        // Truncated.
        assert_eq!(kind_at(b"() \"/"), (ParseErrorKind::MalformedDelimiter, 5));
        assert_eq!(kind_at(b"() NI"), (ParseErrorKind::MalformedDelimiter, 3));
        assert_eq!(kind_at(b"()"), (ParseErrorKind::UnexpectedByte, 2));
    }

    #[test]
    fn name_errors() {
        assert_eq!(
            kind_at(b"() \"/\"  \"a\""),
            (ParseErrorKind::UnexpectedByte, 7)
        );
        assert_eq!(
            kind_at(b"() \"/\" INBOX"),
            (ParseErrorKind::UnexpectedByte, 7)
        );
        assert_eq!(
            kind_at(b"() NILX \"a\""),
            (ParseErrorKind::UnexpectedByte, 6)
        );
        assert_eq!(kind_at(b"() \"/\""), (ParseErrorKind::UnexpectedByte, 6));
        assert_eq!(
            kind_at(b"() \"/\" \"a\\nb\""),
            (ParseErrorKind::InvalidEscape, 9)
        );
        assert_eq!(
            kind_at(b"() \"/\" \"a\\"),
            (ParseErrorKind::UnterminatedName, 10)
        );
        assert_eq!(
            kind_at(b"() \"/\" \"abc"),
            (ParseErrorKind::UnterminatedName, 11)
        );
    }

    #[test]
    fn trailing_data() {
        assert_eq!(
            kind_at(b"() \"/\" \"a\" "),
            (ParseErrorKind::TrailingData, 10)
        );
        assert_eq!(
            kind_at(b"() \"/\" \"a\"\r\n"),
            (ParseErrorKind::TrailingData, 10)
        );
    }

    #[test]
    fn name_bytes_verbatim() {
        let entry = parse("() \"/\" \"Entw\u{fc}rfe (alt)\"".as_bytes()).unwrap();
        assert_eq!(entry.name().to_str().unwrap(), "Entw\u{fc}rfe (alt)");
    }
}
