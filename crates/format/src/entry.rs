//! Entry parsing.
//!
//! An entry is its fixed header block followed by a KV payload framed as the
//! layout dictates. The appid is read by the caller, which needs it to spot
//! the end-of-list sentinel.

use crate::digest::verify_payload;
use crate::kv_tree::KvTreeParser;
use crate::layout::{Framing, Layout};
use crate::reader::ByteReader;
use appinfo_core::{
    AppInfoEntry, DecodeError, DecodeLimits, EntryMetadata, KvMap, KvNode, Result, Section,
    DIGEST_LEN,
};
use std::io::{Cursor, Read, Seek};
use tracing::trace;

/// Read the fixed header fields that follow `appid`.
pub fn read_metadata<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    layout: &Layout,
) -> Result<EntryMetadata> {
    // The whole block must be present; a partial block is a truncation
    let base = reader.tell();
    let block = reader.read_fixed(layout.entry_header_len() - 4)?;
    let mut fields = ByteReader::with_base(Cursor::new(block), base);

    let size = if layout.has_size {
        Some(fields.read_u32()?)
    } else {
        None
    };
    let state = fields.read_u32()?;
    let timestamp = fields.read_u32()?;
    let (token, content_digest) = if layout.has_token {
        let token = fields.read_u64()?;
        let digest = fields.read_array::<DIGEST_LEN>()?;
        (Some(token), Some(digest))
    } else {
        (None, None)
    };
    let change_number = fields.read_u32()?;
    let payload_digest = if layout.has_payload_digest {
        Some(fields.read_array::<DIGEST_LEN>()?)
    } else {
        None
    };

    Ok(EntryMetadata {
        size,
        state,
        timestamp,
        token,
        content_digest,
        change_number,
        payload_digest,
    })
}

/// Read one entry whose appid has already been consumed.
pub fn read_entry<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    layout: &Layout,
    appid: u32,
    parser: &KvTreeParser<'_>,
    limits: &DecodeLimits,
) -> Result<AppInfoEntry> {
    let metadata = read_metadata(reader, layout)?;

    let root = match layout.framing {
        Framing::Sections => read_sections(reader, parser)?,
        Framing::Inline => parser.parse_map(reader)?,
        Framing::Delimited => {
            // Delimited layouts always carry both fields
            let size = metadata.size.unwrap_or_default();
            let expected = metadata.payload_digest.unwrap_or_default();
            read_delimited(reader, layout, appid, size, &expected, parser, limits)?
        }
    };

    trace!(
        appid,
        change_number = metadata.change_number,
        keys = root.len(),
        "Decoded entry"
    );
    Ok(AppInfoEntry::new(metadata, KvNode::Map(root)))
}

/// Read section-framed payload: `(id, map)*` up to a zero id.
///
/// Each section's map is stored under the section's name.
fn read_sections<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    parser: &KvTreeParser<'_>,
) -> Result<KvMap> {
    let mut root = KvMap::new();
    loop {
        let offset = reader.tell();
        let id = reader.read_u8()?;
        if id == 0 {
            return Ok(root);
        }
        let section = Section::from_id(id).ok_or(DecodeError::UnknownSection { id, offset })?;
        let map = parser.parse_map(reader)?;
        root.insert(section.name().to_string(), KvNode::Map(map));
    }
}

/// Read a length-delimited payload, verify it, and decode it as one map.
fn read_delimited<R: Read + Seek>(
    reader: &mut ByteReader<R>,
    layout: &Layout,
    appid: u32,
    size: u32,
    expected: &[u8; DIGEST_LEN],
    parser: &KvTreeParser<'_>,
    limits: &DecodeLimits,
) -> Result<KvMap> {
    let len = layout.payload_len(appid, size, limits)?;
    let base = reader.tell();
    let payload = reader.read_fixed(len)?;
    verify_payload(appid, &payload, expected)?;

    let mut sub = ByteReader::with_base(Cursor::new(payload.as_slice()), base);
    let map = parser.parse_map(&mut sub)?;
    let remaining = sub.remaining()?;
    if remaining > 0 {
        return Err(DecodeError::TrailingPayload { appid, remaining });
    }
    Ok(map)
}
