//! Out-of-line interned string table (layout 29).
//!
//! # Table Layout
//!
//! ```text
//! ┌─────────────┬──────────────┬──────────────┬─────┐
//! │ Count (4)   │ CString 0    │ CString 1    │ ... │
//! └─────────────┴──────────────┴──────────────┴─────┘
//! ```
//!
//! The table sits at an absolute offset stored in the stream header, usually
//! after the entry list. It is loaded with a lookahead seek before any entry
//! is parsed and the reader is returned to where it was.

use crate::reader::ByteReader;
use appinfo_core::{DecodeError, DecodeLimits, Result};
use std::io::{Read, Seek};
use tracing::debug;

/// Interned strings indexed `0..len`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringTable {
    strings: Vec<String>,
}

impl StringTable {
    /// Build a table from already-decoded strings.
    pub fn new(strings: Vec<String>) -> Self {
        StringTable { strings }
    }

    /// Load the table stored at `offset`, restoring the reader position
    /// afterwards.
    pub fn load<R: Read + Seek>(
        reader: &mut ByteReader<R>,
        offset: u64,
        limits: &DecodeLimits,
    ) -> Result<Self> {
        let saved = reader.tell();
        let end = saved + reader.remaining()?;
        if offset > end {
            return Err(DecodeError::TruncatedInput {
                offset,
                needed: 4,
            });
        }

        reader.seek(offset)?;
        let count = reader.read_u32()?;
        if count > limits.max_string_table_len {
            return Err(DecodeError::StringTableTooLarge {
                count,
                max: limits.max_string_table_len,
            });
        }
        // Each string needs at least its terminator byte
        if u64::from(count) > reader.remaining()? {
            return Err(DecodeError::TruncatedInput {
                offset: reader.tell(),
                needed: u64::from(count),
            });
        }

        let mut strings = Vec::with_capacity(count as usize);
        for _ in 0..count {
            strings.push(reader.read_cstring()?);
        }
        reader.seek(saved)?;

        debug!(offset, count, "Loaded string table");
        Ok(StringTable { strings })
    }

    /// Resolve a key index.
    pub fn resolve(&self, index: u32) -> Result<&str> {
        self.strings
            .get(index as usize)
            .map(String::as_str)
            .ok_or(DecodeError::StringIndexOutOfRange {
                index,
                len: self.strings.len(),
            })
    }

    /// Number of strings in the table
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}
