//! Text decoding for keys and string values.
//!
//! Strings in the cache are raw bytes with no declared encoding. Most are
//! UTF-8; older entries carry Windows-1252 text. Decoding never fails: bytes
//! that are not valid UTF-8 are reinterpreted as Windows-1252 with lossy
//! replacement.

use encoding_rs::WINDOWS_1252;
use tracing::trace;

/// Code points for the five bytes Windows-1252 leaves undefined (0x81, 0x8D,
/// 0x8F, 0x90, 0x9D). encoding_rs passes them through as C1 controls.
const UNDEFINED_1252: [char; 5] = ['\u{81}', '\u{8d}', '\u{8f}', '\u{90}', '\u{9d}'];

/// Decode raw string bytes, falling back to Windows-1252.
///
/// Bytes with no Windows-1252 mapping become U+FFFD.
pub fn decode_text(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            let bytes = e.into_bytes();
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(&bytes);
            let replaced = text.chars().filter(|c| UNDEFINED_1252.contains(c)).count();
            trace!(
                len = bytes.len(),
                replaced,
                "Decoded non-UTF-8 text as Windows-1252"
            );
            if replaced == 0 {
                text.into_owned()
            } else {
                text.replace(&UNDEFINED_1252[..], "\u{fffd}")
            }
        }
    }
}
