//! # electronicmail-imap
//!
//! A strict parser for the mailbox data an IMAP server returns for `LIST`
//! and `LSUB` (RFC 3501 `mailbox-list`).
//!
//! ## Features
//!
//! - **Single-pass state machine**: one forward scan per line, no
//!   backtracking, no panics on hostile input
//! - **Precise diagnostics**: every failure carries a [`ParseErrorKind`] and
//!   the byte offset where it was detected
//! - **Full quoting support**: escaped `"` and `\` in names, `NIL`
//!   delimiters, empty attribute lists and the empty root name
//! - **Reply aggregation**: [`ListingCollector`] gathers a whole multi-line
//!   reply with an abort-or-skip policy for malformed entries
//! - **Sans-I/O**: the transport hands over bytes, the parser hands back
//!   [`MailboxEntry`] values
//!
//! ## Quick Start
//!
//! ```
//! use electronicmail_imap::{parse, ParseErrorKind};
//!
//! let entry = parse(br#"(\Marked \HasChildren) "/" "Inbox\\Archive""#).unwrap();
//! assert_eq!(entry.attributes().len(), 2);
//! assert_eq!(entry.name().as_bytes(), br"Inbox\Archive");
//!
//! let err = parse(br#"(\A \A) "/" "X""#).unwrap_err();
//! assert_eq!(err.kind(), ParseErrorKind::DuplicateAttribute);
//! assert_eq!(err.offset(), 4);
//! ```
//!
//! ## Modules
//!
//! - [`parser`]: line parser and untagged prefix handling
//! - [`types`]: entries, names and attributes
//! - [`encode`](mod@encode): canonical re-serialization
//! - [`listing`]: multi-line reply collection

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod encode;
mod error;
pub mod listing;
pub mod parser;
pub mod types;

pub use encode::{encode, encode_untagged};
pub use error::{Error, ParseError, ParseErrorKind, Result};
pub use listing::{ListingCollector, ListingConfig, MalformedPolicy, Status, parse_listing};
pub use parser::{ListKind, parse, parse_untagged, parse_untagged_kind};
pub use types::{
    Attribute, AttributeKind, Attributes, MailboxEntry, MailboxName, is_delimiter_char,
};
