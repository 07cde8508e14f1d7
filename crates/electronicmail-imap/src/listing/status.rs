//! Completion status of a listing reply.

use std::fmt;

/// Status carried by the tagged line that ends a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Command completed successfully.
    Ok,
    /// Command failed (operational error).
    No,
    /// Command failed (protocol/syntax error).
    Bad,
}

impl Status {
    /// Returns true if this is a successful status.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::Ok)
    }

    /// Returns the status keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::No => "NO",
            Self::Bad => "BAD",
        }
    }

    /// Matches a status keyword, ignoring case.
    pub(crate) fn parse(word: &[u8]) -> Option<Self> {
        [Self::Ok, Self::No, Self::Bad]
            .into_iter()
            .find(|status| word.eq_ignore_ascii_case(status.as_str().as_bytes()))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits a tagged line into its status and trailing text.
///
/// Returns `None` for untagged and continuation lines. A tagged line whose
/// second word is not a status keyword counts as `BAD` with the whole line
/// as text.
pub(crate) fn tagged_status(line: &[u8]) -> Option<(Status, &[u8])> {
    if line.is_empty() || line.starts_with(b"*") || line.starts_with(b"+") {
        return None;
    }
    let mut words = line.splitn(3, |&b| b == b' ').skip(1);
    match words.next().and_then(Status::parse) {
        Some(status) => Some((status, words.next().unwrap_or_default())),
        None => Some((Status::Bad, line)),
    }
}
