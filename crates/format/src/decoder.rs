//! Stream decoder.
//!
//! The decoder reads the format tag, picks the matching [`Layout`], reads the
//! stream header and then entries up to the end of the entry list. It makes
//! one linear pass. The only seeks are the layout 29 string table lookahead
//! and an end-of-stream check when a zero appid is read.
//!
//! ## Usage
//!
//! ```ignore
//! let file = BufReader::new(File::open(path)?);
//! let info = Decoder::new(file).decode()?;
//! for (appid, entry) in info.iter() {
//!     // ...
//! }
//! ```

use crate::entry::read_entry;
use crate::kv_tree::KvTreeParser;
use crate::layout::Layout;
use crate::reader::ByteReader;
use crate::string_table::StringTable;
use appinfo_core::{
    AppInfo, DecodeError, DecodeLimits, DecodeResult, FormatTag, LimitsError, Result,
};
use std::io::{Cursor, Read, Seek};
use tracing::debug;

/// Decoder for one appinfo stream
pub struct Decoder<R> {
    reader: ByteReader<R>,
    limits: DecodeLimits,
}

impl<R: Read + Seek> Decoder<R> {
    /// Create a decoder over a source positioned at the format tag.
    pub fn new(source: R) -> Self {
        Decoder {
            reader: ByteReader::new(source),
            limits: DecodeLimits::default(),
        }
    }

    /// Replace the default limits.
    pub fn with_limits(mut self, limits: DecodeLimits) -> std::result::Result<Self, LimitsError> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    /// Bytes consumed so far
    pub fn position(&self) -> u64 {
        self.reader.tell()
    }

    /// Decode every entry in the stream.
    ///
    /// Any structural failure aborts the whole pass; no partial result is
    /// returned.
    pub fn decode(&mut self) -> Result<AppInfo> {
        let magic = self.reader.read_u32_be()?;
        let format = FormatTag::from_magic(magic).ok_or(DecodeError::UnsupportedFormat { magic })?;
        let layout = Layout::for_format(format);
        let universe = self.reader.read_u32()?;

        debug!(%format, universe, "Decoding appinfo stream");

        let (strings, entries_end) = if layout.string_table {
            let offset = self.reader.read_u64()?;
            let table = StringTable::load(&mut self.reader, offset, &self.limits)?;
            // The table follows the entry list, so the list cannot run past it
            let end = (offset >= self.reader.tell()).then_some(offset);
            (Some(table), end)
        } else {
            (None, None)
        };

        let mut parser = KvTreeParser::new(&self.limits);
        if let Some(table) = &strings {
            parser = parser.with_string_table(table);
        }

        let mut entries = DecodeResult::new();
        while let Some(appid) = self.next_appid(entries_end)? {
            let entry = read_entry(&mut self.reader, &layout, appid, &parser, &self.limits)?;
            entries.insert(appid, entry);
        }

        debug!(%format, entries = entries.len(), "Decoded appinfo stream");
        Ok(AppInfo {
            format,
            universe,
            entries,
        })
    }

    /// Read the next appid, or `None` at the end of the entry list.
    ///
    /// The list ends at end of stream, where the string table begins, or at
    /// a zero appid (the sentinel) that is the last thing in the list. A zero
    /// appid with more entry data after it is an ordinary entry.
    fn next_appid(&mut self, entries_end: Option<u64>) -> Result<Option<u32>> {
        let offset = self.reader.tell();
        if entries_end == Some(offset) {
            return Ok(None);
        }
        let bytes = self.reader.read_available(4)?;
        let appid = match <[u8; 4]>::try_from(bytes.as_slice()) {
            Ok(word) => u32::from_le_bytes(word),
            Err(_) if bytes.is_empty() => return Ok(None),
            Err(_) => return Err(DecodeError::TruncatedInput { offset, needed: 4 }),
        };
        if appid == 0 && self.at_list_end(entries_end)? {
            return Ok(None);
        }
        Ok(Some(appid))
    }

    fn at_list_end(&mut self, entries_end: Option<u64>) -> Result<bool> {
        match entries_end {
            Some(end) => Ok(self.reader.tell() == end),
            None => Ok(self.reader.remaining()? == 0),
        }
    }
}

/// Decode a stream with default limits.
pub fn decode<R: Read + Seek>(source: R) -> Result<AppInfo> {
    Decoder::new(source).decode()
}

/// Decode an in-memory cache file with default limits.
pub fn decode_bytes(bytes: &[u8]) -> Result<AppInfo> {
    decode(Cursor::new(bytes))
}
