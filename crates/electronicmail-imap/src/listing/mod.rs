//! Collecting the entries of a whole LIST reply.
//!
//! A LIST command yields zero or more untagged `* LIST` lines followed by the
//! tagged completion. [`ListingCollector`] takes those lines as the transport
//! delivers them, parses the mailbox data and decides, per
//! [`MalformedPolicy`], whether a bad line aborts the listing. A `NO` or
//! `BAD` completion turns into [`Error::Rejected`] when the listing is
//! finished.
//!
//! # Example
//!
//! ```
//! use electronicmail_imap::listing::{parse_listing, ListingConfig, MalformedPolicy};
//!
//! let reply = b"* LIST (\\HasNoChildren) \"/\" \"INBOX\"\r\n\
//!               * LIST (\\A \\A) \"/\" \"broken\"\r\n\
//!               * LIST (\\Noselect) NIL \"Top Level\"\r\n\
//!               A001 OK LIST completed\r\n";
//!
//! let config = ListingConfig::builder()
//!     .on_malformed(MalformedPolicy::Skip)
//!     .build();
//! let entries = parse_listing(reply, &config).unwrap();
//! assert_eq!(entries.len(), 2);
//! ```

#![allow(clippy::missing_errors_doc)]

mod config;
mod status;

pub use config::{DEFAULT_MAX_LINE_LENGTH, ListingConfig, ListingConfigBuilder, MalformedPolicy};
pub use status::Status;

use status::tagged_status;

use crate::parser::{ListKind, parse_untagged_kind};
use crate::types::MailboxEntry;
use crate::{Error, Result};

/// Accumulates mailbox entries across the lines of one reply.
#[derive(Debug)]
pub struct ListingCollector {
    config: ListingConfig,
    entries: Vec<MailboxEntry>,
    lines: usize,
    skipped: usize,
    completion: Option<(Status, String)>,
}

impl ListingCollector {
    /// Creates an empty collector.
    #[must_use]
    pub const fn new(config: ListingConfig) -> Self {
        Self {
            config,
            entries: Vec::new(),
            lines: 0,
            skipped: 0,
            completion: None,
        }
    }

    /// Feeds one line, with or without its terminator.
    ///
    /// Lines other than untagged LIST/LSUB data are ignored; a tagged line
    /// marks the reply as complete and records its status.
    pub fn push_line(&mut self, line: &[u8]) -> Result<()> {
        self.lines += 1;
        let number = self.lines;
        let line = strip_terminator(line, self.config.relaxed_crlf);

        if line.len() > self.config.max_line_length {
            return self.malformed(Error::LineTooLong {
                line: number,
                length: line.len(),
                limit: self.config.max_line_length,
            });
        }

        if !is_list_data(line) {
            if let Some((status, text)) = tagged_status(line) {
                tracing::trace!(line = number, %status, "reply complete");
                self.completion = Some((status, String::from_utf8_lossy(text).into_owned()));
            } else {
                tracing::trace!(line = number, "ignoring non-LIST line");
            }
            return Ok(());
        }

        match parse_untagged_kind(line) {
            Ok((kind, entry)) => {
                tracing::debug!(
                    line = number,
                    %kind,
                    name = %entry.name(),
                    delimiter = ?entry.hierarchy_delimiter(),
                    "mailbox entry"
                );
                self.entries.push(entry);
                Ok(())
            }
            Err(source) => self.malformed(Error::Parse {
                line: number,
                source,
            }),
        }
    }

    /// Feeds a buffer holding any number of complete lines.
    pub fn push_reply(&mut self, reply: &[u8]) -> Result<()> {
        let mut rest = reply;
        while !rest.is_empty() {
            let end = rest
                .iter()
                .position(|&b| b == b'\n')
                .map_or(rest.len(), |lf| lf + 1);
            self.push_line(&rest[..end])?;
            rest = &rest[end..];
        }
        Ok(())
    }

    /// Returns the entries collected so far.
    #[must_use]
    pub fn entries(&self) -> &[MailboxEntry] {
        &self.entries
    }

    /// Returns the number of malformed lines skipped.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns true once the tagged completion line has been seen.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completion.is_some()
    }

    /// Returns the status of the tagged completion, once seen.
    #[must_use]
    pub fn status(&self) -> Option<Status> {
        self.completion.as_ref().map(|(status, _)| *status)
    }

    /// Consumes the collector and returns the entries in reply order.
    ///
    /// Fails with [`Error::Rejected`] if the server completed the command
    /// with `NO` or `BAD`. A reply fed without its tagged line is returned
    /// as is.
    pub fn finish(self) -> Result<Vec<MailboxEntry>> {
        if let Some((status, text)) = self.completion.filter(|(status, _)| !status.is_ok()) {
            tracing::warn!(%status, %text, "listing rejected by server");
            return Err(Error::Rejected { status, text });
        }
        if self.skipped > 0 {
            tracing::warn!(
                skipped = self.skipped,
                kept = self.entries.len(),
                "listing had malformed entries"
            );
        }
        Ok(self.entries)
    }

    fn malformed(&mut self, error: Error) -> Result<()> {
        match self.config.on_malformed {
            MalformedPolicy::Abort => Err(error),
            MalformedPolicy::Skip => {
                tracing::warn!(%error, "skipping malformed mailbox entry");
                self.skipped += 1;
                Ok(())
            }
        }
    }
}

impl Default for ListingCollector {
    fn default() -> Self {
        Self::new(ListingConfig::default())
    }
}

/// Parses every LIST/LSUB line of a complete reply buffer.
pub fn parse_listing(reply: &[u8], config: &ListingConfig) -> Result<Vec<MailboxEntry>> {
    let mut collector = ListingCollector::new(config.clone());
    collector.push_reply(reply)?;
    collector.finish()
}

/// Removes one trailing CRLF (or LF when relaxed).
fn strip_terminator(line: &[u8], relaxed: bool) -> &[u8] {
    if let Some(stripped) = line.strip_suffix(b"\r\n") {
        stripped
    } else if relaxed {
        line.strip_suffix(b"\n").unwrap_or(line)
    } else {
        line
    }
}

/// Returns true for `* LIST ...` and `* LSUB ...`, any case.
///
/// The keyword must be a whole word, so `* LISTRIGHTS` is not list data.
fn is_list_data(line: &[u8]) -> bool {
    line.strip_prefix(b"* ").is_some_and(|rest| {
        let keyword = rest.split(|&b| b == b' ').next().unwrap_or_default();
        [ListKind::List, ListKind::Lsub]
            .iter()
            .any(|kind| keyword.eq_ignore_ascii_case(kind.as_str().as_bytes()))
    })
}
