//! Mailbox name attributes.

use std::fmt;

/// A mailbox attribute token as sent by the server, e.g. `\HasNoChildren`.
///
/// Equality is textual: `\Noselect` and `\NoSelect` are different tokens even
/// though [`kind`](Self::kind) classifies both as [`AttributeKind::NoSelect`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Attribute(String);

impl Attribute {
    /// Creates an attribute from its textual form.
    ///
    /// Returns `None` unless `token` is a backslash followed by at least one
    /// atom character.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let valid = match token.as_bytes() {
            [b'\\', rest @ ..] => !rest.is_empty() && rest.iter().all(|&b| is_attribute_char(b)),
            _ => false,
        };
        valid.then_some(Self(token))
    }

    /// Wraps bytes the parser has already checked with [`is_attribute_char`].
    pub(crate) fn from_validated(token: &[u8]) -> Self {
        Self(token.iter().map(|&b| char::from(b)).collect())
    }

    /// Returns the token including its leading backslash.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies the token.
    #[must_use]
    pub fn kind(&self) -> AttributeKind {
        AttributeKind::parse(&self.0)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Attribute> for String {
    fn from(attribute: Attribute) -> Self {
        attribute.0
    }
}

impl TryFrom<String> for Attribute {
    type Error = String;

    fn try_from(token: String) -> Result<Self, Self::Error> {
        Self::new(token.clone()).ok_or_else(|| format!("invalid mailbox attribute: {token}"))
    }
}

/// Well-known mailbox attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeKind {
    /// No child levels can exist under this name.
    NoInferiors,
    /// Mailbox cannot be selected.
    NoSelect,
    /// Mailbox is marked for attention.
    Marked,
    /// Mailbox is not marked.
    Unmarked,
    // RFC 5258 LIST-EXTENDED
    /// Mailbox name refers to a non-existent mailbox.
    NonExistent,
    /// Mailbox is subscribed.
    Subscribed,
    /// Mailbox is on a remote server.
    Remote,
    /// Mailbox has children.
    HasChildren,
    /// Mailbox has no children.
    HasNoChildren,
    // RFC 6154 SPECIAL-USE
    /// All messages (virtual mailbox).
    All,
    /// Mailbox is the archive folder.
    Archive,
    /// Mailbox is the drafts folder.
    Drafts,
    /// Flagged/starred messages (virtual mailbox).
    Flagged,
    /// Mailbox is the junk/spam folder.
    Junk,
    /// Mailbox is the sent folder.
    Sent,
    /// Mailbox is the trash folder.
    Trash,
    /// Important messages (RFC 8457).
    Important,
    /// Any other attribute.
    Other,
}

impl AttributeKind {
    /// Classifies an attribute token, ignoring case.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "\\NOINFERIORS" => Self::NoInferiors,
            "\\NOSELECT" => Self::NoSelect,
            "\\MARKED" => Self::Marked,
            "\\UNMARKED" => Self::Unmarked,
            "\\NONEXISTENT" => Self::NonExistent,
            "\\SUBSCRIBED" => Self::Subscribed,
            "\\REMOTE" => Self::Remote,
            "\\HASCHILDREN" => Self::HasChildren,
            "\\HASNOCHILDREN" => Self::HasNoChildren,
            "\\ALL" => Self::All,
            "\\ARCHIVE" => Self::Archive,
            "\\DRAFTS" => Self::Drafts,
            "\\FLAGGED" => Self::Flagged,
            "\\JUNK" | "\\SPAM" => Self::Junk,
            "\\SENT" => Self::Sent,
            "\\TRASH" => Self::Trash,
            "\\IMPORTANT" => Self::Important,
            _ => Self::Other,
        }
    }

    /// Returns true for RFC 6154 special-use attributes.
    #[must_use]
    pub const fn is_special_use(self) -> bool {
        matches!(
            self,
            Self::All
                | Self::Archive
                | Self::Drafts
                | Self::Flagged
                | Self::Junk
                | Self::Sent
                | Self::Trash
                | Self::Important
        )
    }
}

/// The attributes of one mailbox entry, in server order, without duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct Attributes {
    attributes: Vec<Attribute>,
}

impl Attributes {
    /// Creates an empty attribute set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an attribute. Returns false, leaving the set unchanged, if the
    /// same token is already present.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        if self.attributes.contains(&attribute) {
            return false;
        }
        self.attributes.push(attribute);
        true
    }

    /// Returns true if the token is present.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.attributes.iter().any(|a| a.as_str() == token)
    }

    /// Returns true if any attribute classifies as `kind`.
    #[must_use]
    pub fn contains_kind(&self, kind: AttributeKind) -> bool {
        self.attributes.iter().any(|a| a.kind() == kind)
    }

    /// Returns the RFC 6154 special use of the mailbox, if any.
    #[must_use]
    pub fn special_use(&self) -> Option<AttributeKind> {
        self.attributes
            .iter()
            .map(Attribute::kind)
            .find(|k| k.is_special_use())
    }

    /// Iterates over the attributes in server order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.attributes.iter()
    }

    /// Returns the number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true if there are no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for Attributes {
    type Item = Attribute;
    type IntoIter = std::vec::IntoIter<Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.into_iter()
    }
}

impl FromIterator<Attribute> for Attributes {
    /// Collects attributes, silently dropping repeated tokens.
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        let mut attributes = Self::new();
        for attribute in iter {
            attributes.insert(attribute);
        }
        attributes
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Attributes {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let list = Vec::<Attribute>::deserialize(deserializer)?;
        let mut attributes = Self::new();
        for attribute in list {
            if !attributes.insert(attribute.clone()) {
                return Err(serde::de::Error::custom(format!(
                    "duplicate mailbox attribute: {attribute}"
                )));
            }
        }
        Ok(attributes)
    }
}

/// Returns true if the byte may appear after the backslash of an attribute.
///
/// This is the RFC 3501 `ATOM-CHAR` set: any 7-bit printable character except
/// `(`, `)`, `{`, SP, `%`, `*`, `"`, `\` and `]`.
#[must_use]
pub const fn is_attribute_char(b: u8) -> bool {
    matches!(b, 0x21..=0x7E)
        && !matches!(b, b'(' | b')' | b'{' | b'%' | b'*' | b'"' | b'\\' | b']')
}
