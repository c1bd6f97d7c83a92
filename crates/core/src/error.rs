//! Error types for appinfo decoding
//!
//! Every variant is terminal for the decode pass that produced it: the cache
//! format has no resynchronization points, so nothing after a structural
//! failure can be trusted. Callers that want "best effort over many files"
//! catch at per-file granularity.
//!
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.

use std::io;
use thiserror::Error;

/// Result type alias for decode operations
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Errors produced while decoding an appinfo cache stream
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The leading format tag is not one of the known layouts
    #[error("Unsupported format tag: {magic:#010x}")]
    UnsupportedFormat {
        /// Big-endian tag value read from the start of the stream
        magic: u32,
    },

    /// The stream ended in the middle of a field
    #[error("Truncated input at offset {offset}: needed {needed} more bytes")]
    TruncatedInput {
        /// Absolute stream offset where the read started
        offset: u64,
        /// Number of bytes the read required
        needed: u64,
    },

    /// An unknown type tag was found inside a KV tree
    #[error("Malformed KV tree: unexpected type tag {tag:#04x} at offset {offset}")]
    MalformedTree {
        /// The offending type tag
        tag: u8,
        /// Absolute stream offset of the tag byte
        offset: u64,
    },

    /// A payload's SHA-1 digest did not match the stored digest
    #[error("Integrity mismatch for app {appid}: expected {}, computed {}", hex(.expected), hex(.computed))]
    IntegrityMismatch {
        /// Application the payload belongs to
        appid: u32,
        /// Digest stored in the entry header
        expected: [u8; 20],
        /// Digest computed over the payload bytes
        computed: [u8; 20],
    },

    /// A key index pointed past the end of the string table
    #[error("String index {index} out of range (table has {len} entries)")]
    StringIndexOutOfRange {
        /// Index read from the stream
        index: u32,
        /// Number of strings in the table
        len: usize,
    },

    /// The string table declares more entries than the configured limit
    #[error("String table has {count} entries, limit is {max}")]
    StringTableTooLarge {
        /// Count read from the table header
        count: u32,
        /// Configured maximum
        max: u32,
    },

    /// KV maps were nested deeper than the configured limit
    #[error("KV tree nesting depth {depth} exceeds limit at offset {offset}")]
    DepthExceeded {
        /// Depth that was about to be entered
        depth: usize,
        /// Absolute stream offset of the nested map's tag
        offset: u64,
    },

    /// A section-framed entry used a section id outside the known set
    #[error("Unknown section id {id} at offset {offset}")]
    UnknownSection {
        /// The section id byte
        id: u8,
        /// Absolute stream offset of the id byte
        offset: u64,
    },

    /// The declared payload size of an entry cannot be honoured
    #[error("Invalid payload size {size} for app {appid}")]
    InvalidEntrySize {
        /// Application the entry belongs to
        appid: u32,
        /// Size field as stored in the entry header
        size: u32,
    },

    /// A length-delimited payload had bytes left after its root terminator
    #[error("Payload for app {appid} has {remaining} unparsed trailing bytes")]
    TrailingPayload {
        /// Application the payload belongs to
        appid: u32,
        /// Number of bytes not consumed by the KV tree
        remaining: u64,
    },

    /// The underlying source failed for a reason other than end of stream
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl DecodeError {
    /// Whether this error indicates damaged or untrusted data, as opposed to
    /// a layout the decoder does not support or a failing source.
    pub fn is_corruption(&self) -> bool {
        !matches!(self, DecodeError::UnsupportedFormat { .. } | DecodeError::Io(_))
    }
}

pub(crate) fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
