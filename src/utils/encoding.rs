//! Byte decoding for properties sources.
//!
//! Properties files are historically ISO-8859-1, but most files written today
//! are UTF-8. Strategy:
//! 1. Strip a UTF-8 BOM if present
//! 2. Use the bytes as UTF-8 when they validate strictly
//! 3. Otherwise decode as ISO-8859-1, which never fails

use encoding_rs::mem::decode_latin1;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

/// Decode a properties source into text.
///
/// Returns the decoded text and a normalized label of the encoding that was
/// used ("utf-8", "utf-8-sig" or "iso-8859-1").
pub fn decode_properties(bytes: &[u8]) -> (Cow<'_, str>, &'static str) {
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        if let Ok(text) = std::str::from_utf8(rest) {
            return (Cow::Borrowed(text), "utf-8-sig");
        }
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (Cow::Borrowed(text), "utf-8"),
        Err(_) => (decode_latin1(bytes), "iso-8859-1"),
    }
}
