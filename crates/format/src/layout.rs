//! Per-version entry layouts.
//!
//! Every layout shares the same outer shape:
//!
//! ```text
//! ┌───────────┬──────────────┬────────────────────┬─────────┬─────────┬─────────────┐
//! │ Magic (4) │ Universe (4) │ [Table offset (8)] │ Entry 1 │ Entry 2 │ 00 00 00 00 │
//! │ BE        │ LE           │ 29 only            │         │         │ sentinel    │
//! └───────────┴──────────────┴────────────────────┴─────────┴─────────┴─────────────┘
//! ```
//!
//! and differs in the fixed fields of each entry and how its payload is
//! framed:
//!
//! | layout | fixed fields after appid | framing | digest |
//! |---|---|---|---|
//! | VDF2 | state, timestamp, change | sections | - |
//! | 24, 25 | size, state, timestamp, change | sections | - |
//! | 26 | size, state, timestamp, token, sha, change | sections | stored |
//! | 27 | as 26 | single tree | stored |
//! | 28 | as 26, payload sha | `size` bytes | verified |
//! | 29 | as 28 | `size - 60` bytes, string table keys | verified |

use appinfo_core::{DecodeError, DecodeLimits, FormatTag, Result, DIGEST_LEN};

/// Bytes of a layout 29 `size` field that precede the payload:
/// state (4) + timestamp (4) + token (8) + sha (20) + change (4) + payload sha (20)
pub const V29_SIZE_OVERHEAD: u32 = 60;

/// How an entry's KV payload is laid out after its fixed fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// One or more sections, each a 1-byte id followed by a KV map; id 0 ends
    /// the entry
    Sections,
    /// A single KV map read straight from the stream
    Inline,
    /// `size`-derived number of bytes, digest-verified, decoded as one map
    Delimited,
}

/// Static description of one layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Format this layout belongs to
    pub format: FormatTag,
    /// Entry header carries a size field
    pub has_size: bool,
    /// Entry header carries token and content digest
    pub has_token: bool,
    /// Entry header carries a payload digest, which is verified
    pub has_payload_digest: bool,
    /// Payload framing
    pub framing: Framing,
    /// Stream header carries a string table offset; keys are table indices
    pub string_table: bool,
    /// Bytes of the size field that are not payload
    pub size_overhead: u32,
}

impl Layout {
    /// Layout for a format tag
    pub const fn for_format(format: FormatTag) -> Layout {
        let base = Layout {
            format,
            has_size: true,
            has_token: false,
            has_payload_digest: false,
            framing: Framing::Sections,
            string_table: false,
            size_overhead: 0,
        };
        match format {
            FormatTag::Vdf2 => Layout {
                has_size: false,
                ..base
            },
            FormatTag::V24 | FormatTag::V25 => base,
            FormatTag::V26 => Layout {
                has_token: true,
                ..base
            },
            FormatTag::V27 => Layout {
                has_token: true,
                framing: Framing::Inline,
                ..base
            },
            FormatTag::V28 => Layout {
                has_token: true,
                has_payload_digest: true,
                framing: Framing::Delimited,
                ..base
            },
            FormatTag::V29 => Layout {
                has_token: true,
                has_payload_digest: true,
                framing: Framing::Delimited,
                string_table: true,
                size_overhead: V29_SIZE_OVERHEAD,
                ..base
            },
        }
    }

    /// Size of the fixed entry header in bytes, appid included
    pub const fn entry_header_len(&self) -> usize {
        let mut len = 4 + 4 + 4 + 4; // appid, state, timestamp, change
        if self.has_size {
            len += 4;
        }
        if self.has_token {
            len += 8 + DIGEST_LEN;
        }
        if self.has_payload_digest {
            len += DIGEST_LEN;
        }
        len
    }

    /// Size of the stream header in bytes, magic included
    pub const fn stream_header_len(&self) -> usize {
        if self.string_table {
            4 + 4 + 8
        } else {
            4 + 4
        }
    }

    /// Number of payload bytes described by an entry's size field.
    pub fn payload_len(&self, appid: u32, size: u32, limits: &DecodeLimits) -> Result<usize> {
        let len = size
            .checked_sub(self.size_overhead)
            .ok_or(DecodeError::InvalidEntrySize { appid, size })?;
        if len > limits.max_payload_bytes {
            return Err(DecodeError::InvalidEntrySize { appid, size });
        }
        Ok(len as usize)
    }
}
