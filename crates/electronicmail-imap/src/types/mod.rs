//! Mailbox listing types.
//!
//! A successful parse yields a [`MailboxEntry`]: the attribute tokens, the
//! hierarchy delimiter and the decoded name, following RFC 3501 `mailbox-list`.

#![allow(clippy::missing_const_for_fn)]

mod attribute;
mod mailbox;
mod utf7;

pub use attribute::{Attribute, AttributeKind, Attributes, is_attribute_char};
pub use mailbox::{MailboxEntry, MailboxName, is_delimiter_char};
