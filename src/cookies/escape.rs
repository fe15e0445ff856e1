//! Percent-escaping of cookie values.
//!
//! One scheme for both directions: path-segment escaping. Unreserved
//! characters and `$ & + : = @` pass through; every other byte, including
//! `;`, `,`, `/`, `?`, `%`, space and all non-ASCII bytes, becomes `%XX`.
//! [`unescape`] is strict, so a stray `%` is an error rather than a literal.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b':')
    .remove(b'=')
    .remove(b'@');

/// Why a raw value could not be unescaped.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum UnescapeError {
    #[error("invalid escape {sequence:?} at byte {offset}")]
    MalformedSequence { offset: usize, sequence: String },
    #[error("unescaped bytes are not valid UTF-8")]
    InvalidUtf8,
}

/// Percent-escape a cookie value for the wire.
pub fn escape(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// Reverse [`escape`].
///
/// Every `%` must be followed by two hex digits and the decoded bytes must
/// be UTF-8.
pub fn unescape(raw: &str) -> Result<String, UnescapeError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() >= i + 3
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                let end = (i + 3).min(bytes.len());
                return Err(UnescapeError::MalformedSequence {
                    offset: i,
                    sequence: String::from_utf8_lossy(&bytes[i..end]).into_owned(),
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(raw)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| UnescapeError::InvalidUtf8)
}
