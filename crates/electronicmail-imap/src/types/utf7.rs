//! Modified UTF-7 mailbox name decoding (RFC 3501 section 5.1.3).

use base64::Engine as _;
use base64::alphabet::IMAP_MUTF7;
use base64::engine::GeneralPurpose;
use base64::engine::general_purpose::NO_PAD;

const ENGINE: GeneralPurpose = GeneralPurpose::new(&IMAP_MUTF7, NO_PAD);

/// Decodes a modified UTF-7 name, or returns `None` if it is malformed.
pub(crate) fn decode(input: &[u8]) -> Option<String> {
    let mut output = String::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        match input[i] {
            // "&" shifts to modified BASE64, "-" shifts back to US-ASCII.
            b'&' => {
                let start = i + 1;
                let len = input[start..].iter().position(|&b| b == b'-')?;
                let end = start + len;
                if len == 0 {
                    // "&-" encodes a literal "&".
                    output.push('&');
                } else {
                    decode_shifted(&input[start..end], &mut output)?;
                }
                i = end + 1;
            }
            // Printable US-ASCII other than "&" represents itself.
            c @ (0x20..=0x25 | 0x27..=0x7E) => {
                output.push(char::from(c));
                i += 1;
            }
            _ => return None,
        }
    }

    Some(output)
}

fn decode_shifted(encoded: &[u8], output: &mut String) -> Option<()> {
    let bytes = ENGINE.decode(encoded).ok()?;
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    for c in char::decode_utf16(units) {
        output.push(c.ok()?);
    }
    Some(())
}
