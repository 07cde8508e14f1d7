//! Entry serialization helpers.
//!
//! Writes entries back in the canonical wire form the parser accepts, so that
//! `parse(&encode(&entry))` reproduces `entry`.

use crate::parser::ListKind;
use crate::types::MailboxEntry;

/// Writes a quoted string, escaping `"` and `\`.
pub fn write_quoted(buf: &mut Vec<u8>, s: &[u8]) {
    buf.push(b'"');
    for &b in s {
        if b == b'"' || b == b'\\' {
            buf.push(b'\\');
        }
        buf.push(b);
    }
    buf.push(b'"');
}

/// Writes the hierarchy delimiter, or `NIL`.
pub fn write_delimiter(buf: &mut Vec<u8>, delimiter: Option<char>) {
    match delimiter {
        Some(c) => {
            let mut utf8 = [0u8; 4];
            write_quoted(buf, c.encode_utf8(&mut utf8).as_bytes());
        }
        None => buf.extend_from_slice(b"NIL"),
    }
}

/// Writes a LIST response body.
pub fn write_entry(buf: &mut Vec<u8>, entry: &MailboxEntry) {
    buf.push(b'(');
    for (i, attribute) in entry.attributes().iter().enumerate() {
        if i > 0 {
            buf.push(b' ');
        }
        buf.extend_from_slice(attribute.as_str().as_bytes());
    }
    buf.push(b')');
    buf.push(b' ');
    write_delimiter(buf, entry.hierarchy_delimiter());
    buf.push(b' ');
    write_quoted(buf, entry.name().as_bytes());
}

/// Encodes a LIST response body.
#[must_use]
pub fn encode(entry: &MailboxEntry) -> Vec<u8> {
    let mut buf = Vec::with_capacity(entry.name().as_bytes().len() + 32);
    write_entry(&mut buf, entry);
    buf
}

/// Encodes a full untagged line without the CRLF, e.g. `* LIST () "/" "a"`.
#[must_use]
pub fn encode_untagged(kind: ListKind, entry: &MailboxEntry) -> Vec<u8> {
    let mut buf = Vec::with_capacity(entry.name().as_bytes().len() + 40);
    buf.extend_from_slice(b"* ");
    buf.extend_from_slice(kind.as_str().as_bytes());
    buf.push(b' ');
    write_entry(&mut buf, entry);
    buf
}
