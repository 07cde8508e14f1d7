//! Mailbox types.

use std::fmt;

use super::utf7;
use super::{AttributeKind, Attributes};

/// Mailbox name as delivered by the server, with quoting already resolved.
///
/// The name is kept as octets: servers send modified UTF-7 by default and
/// UTF-8 once `UTF8=ACCEPT` is enabled, and neither is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailboxName(Vec<u8>);

impl MailboxName {
    /// Creates a mailbox name from raw octets.
    #[must_use]
    pub fn new(name: impl Into<Vec<u8>>) -> Self {
        Self(name.into())
    }

    /// Returns the raw octets.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the name as UTF-8, if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.0)
    }

    /// Returns the name as UTF-8, replacing invalid sequences.
    #[must_use]
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0).into_owned()
    }

    /// Decodes the name from modified UTF-7 (RFC 3501 section 5.1.3).
    ///
    /// Returns `None` if the name is not valid modified UTF-7.
    #[must_use]
    pub fn decode_utf7(&self) -> Option<String> {
        utf7::decode(&self.0)
    }

    /// Returns true for the empty name, which denotes the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this is INBOX, which is case-insensitive.
    #[must_use]
    pub fn is_inbox(&self) -> bool {
        self.0.eq_ignore_ascii_case(b"INBOX")
    }

    /// Consumes the name and returns its octets.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl fmt::Display for MailboxName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

impl From<&str> for MailboxName {
    fn from(name: &str) -> Self {
        Self(name.as_bytes().to_vec())
    }
}

impl From<String> for MailboxName {
    fn from(name: String) -> Self {
        Self(name.into_bytes())
    }
}

impl From<Vec<u8>> for MailboxName {
    fn from(name: Vec<u8>) -> Self {
        Self(name)
    }
}

/// One parsed LIST (or LSUB) entry.
///
/// The hierarchy delimiter, when present, is always a 7-bit character other
/// than NUL, CR and LF, so every entry encodes to a line that parses back.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "EntryParts"))]
pub struct MailboxEntry {
    attributes: Attributes,
    hierarchy_delimiter: Option<char>,
    name: MailboxName,
}

impl MailboxEntry {
    /// Creates an entry.
    ///
    /// Returns `None` if the delimiter fails [`is_delimiter_char`].
    #[must_use]
    pub fn new(
        attributes: Attributes,
        hierarchy_delimiter: Option<char>,
        name: impl Into<MailboxName>,
    ) -> Option<Self> {
        if hierarchy_delimiter.is_some_and(|c| !is_delimiter_char(c)) {
            return None;
        }
        Some(Self::from_parsed(attributes, hierarchy_delimiter, name.into()))
    }

    /// Builds an entry from parts the parser has already validated.
    pub(crate) fn from_parsed(
        attributes: Attributes,
        hierarchy_delimiter: Option<char>,
        name: MailboxName,
    ) -> Self {
        Self {
            attributes,
            hierarchy_delimiter,
            name,
        }
    }

    /// Mailbox attributes.
    #[must_use]
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Hierarchy delimiter, or `None` if the server reported `NIL`.
    #[must_use]
    pub fn hierarchy_delimiter(&self) -> Option<char> {
        self.hierarchy_delimiter
    }

    /// Mailbox name.
    #[must_use]
    pub fn name(&self) -> &MailboxName {
        &self.name
    }

    /// Returns false if the mailbox carries `\Noselect` or `\NonExistent`.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.attributes.contains_kind(AttributeKind::NoSelect)
            && !self.attributes.contains_kind(AttributeKind::NonExistent)
    }

    /// Returns whether the server says the mailbox has children, if it says
    /// anything at all.
    #[must_use]
    pub fn has_children(&self) -> Option<bool> {
        if self.attributes.contains_kind(AttributeKind::HasChildren) {
            Some(true)
        } else if self.attributes.contains_kind(AttributeKind::HasNoChildren)
            || self.attributes.contains_kind(AttributeKind::NoInferiors)
        {
            Some(false)
        } else {
            None
        }
    }

    /// Splits the name into hierarchy levels.
    ///
    /// Without a delimiter the whole name is a single level.
    #[must_use]
    pub fn components(&self) -> Vec<&[u8]> {
        let name = self.name.as_bytes();
        match self.hierarchy_delimiter.and_then(|c| u8::try_from(c).ok()) {
            Some(delimiter) => name.split(|&b| b == delimiter).collect(),
            None => vec![name],
        }
    }

    /// Consumes the entry and returns its parts.
    #[must_use]
    pub fn into_parts(self) -> (Attributes, Option<char>, MailboxName) {
        (self.attributes, self.hierarchy_delimiter, self.name)
    }
}

/// Returns true if `c` may serve as a hierarchy delimiter.
///
/// This is the RFC 3501 `QUOTED-CHAR` range: any 7-bit character except NUL,
/// CR and LF.
#[must_use]
pub const fn is_delimiter_char(c: char) -> bool {
    matches!(c, '\u{01}'..='\u{7F}') && c != '\r' && c != '\n'
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct EntryParts {
    attributes: Attributes,
    hierarchy_delimiter: Option<char>,
    name: MailboxName,
}

#[cfg(feature = "serde")]
impl TryFrom<EntryParts> for MailboxEntry {
    type Error = String;

    fn try_from(parts: EntryParts) -> Result<Self, Self::Error> {
        let delimiter = parts.hierarchy_delimiter;
        Self::new(parts.attributes, delimiter, parts.name)
            .ok_or_else(|| format!("invalid hierarchy delimiter: {delimiter:?}"))
    }
}
