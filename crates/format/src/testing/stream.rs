//! Whole-stream fixture builder.
//!
//! Produces byte streams in any of the known layouts. Digests and size
//! fields are computed from the payload unless a test overrides them, which
//! is how corrupt streams are made.

use super::writer::{KeyTable, KvWriter};
use crate::digest::sha1_digest;
use crate::layout::{Framing, Layout};
use appinfo_core::{FormatTag, KvMap, DIGEST_LEN};

/// Header fields for one fixture entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryFixture {
    /// Size field override; derived from the payload when `None`
    pub size: Option<u32>,
    /// Status bitfield
    pub state: u32,
    /// Unix timestamp
    pub timestamp: u32,
    /// Access token
    pub token: u64,
    /// Stored content digest
    pub content_digest: [u8; DIGEST_LEN],
    /// Change number
    pub change_number: u32,
    /// Payload digest override; SHA-1 of the payload when `None`
    pub payload_digest: Option<[u8; DIGEST_LEN]>,
}

impl Default for EntryFixture {
    fn default() -> Self {
        EntryFixture {
            size: None,
            state: 2,
            timestamp: 1_600_000_000,
            token: 0,
            content_digest: [0; DIGEST_LEN],
            change_number: 1,
            payload_digest: None,
        }
    }
}

/// Builds a complete cache stream
pub struct StreamBuilder {
    layout: Layout,
    universe: u32,
    body: Vec<u8>,
    keys: KeyTable,
}

impl StreamBuilder {
    /// Start a stream in `format` with universe 1
    pub fn new(format: FormatTag) -> Self {
        StreamBuilder {
            layout: Layout::for_format(format),
            universe: 1,
            body: Vec::new(),
            keys: KeyTable::new(),
        }
    }

    /// Set the universe field
    pub fn universe(mut self, universe: u32) -> Self {
        self.universe = universe;
        self
    }

    /// Encode a tree the way this stream's layout stores payloads
    pub fn encode_tree(&mut self, root: &KvMap) -> Vec<u8> {
        let mut writer = if self.layout.string_table {
            KvWriter::interned(&mut self.keys)
        } else {
            KvWriter::inline()
        };
        writer.write_map(root);
        writer.into_bytes()
    }

    /// Key table accumulated so far (layout 29)
    pub fn keys_mut(&mut self) -> &mut KeyTable {
        &mut self.keys
    }

    /// Add an entry whose payload is `root`.
    ///
    /// Section-framed layouts store each top-level key of `root` that names
    /// a section as that section; other layouts store `root` as-is.
    pub fn entry(&mut self, appid: u32, fixture: &EntryFixture, root: &KvMap) -> &mut Self {
        let payload = match self.layout.framing {
            Framing::Sections => {
                let mut bytes = Vec::new();
                for (name, node) in root {
                    let id = section_id(name)
                        .unwrap_or_else(|| panic!("{name} is not a section name"));
                    let map = node
                        .as_map()
                        .unwrap_or_else(|| panic!("section {name} must be a map"));
                    bytes.push(id);
                    bytes.extend_from_slice(&self.encode_tree(map));
                }
                bytes.push(0);
                bytes
            }
            Framing::Inline | Framing::Delimited => self.encode_tree(root),
        };
        self.raw_entry(appid, fixture, &payload)
    }

    /// Add an entry with pre-encoded payload bytes.
    pub fn raw_entry(&mut self, appid: u32, fixture: &EntryFixture, payload: &[u8]) -> &mut Self {
        let layout = self.layout;
        let size = fixture
            .size
            .unwrap_or(payload.len() as u32 + layout.size_overhead);

        self.body.extend_from_slice(&appid.to_le_bytes());
        if layout.has_size {
            self.body.extend_from_slice(&size.to_le_bytes());
        }
        self.body.extend_from_slice(&fixture.state.to_le_bytes());
        self.body.extend_from_slice(&fixture.timestamp.to_le_bytes());
        if layout.has_token {
            self.body.extend_from_slice(&fixture.token.to_le_bytes());
            self.body.extend_from_slice(&fixture.content_digest);
        }
        self.body.extend_from_slice(&fixture.change_number.to_le_bytes());
        if layout.has_payload_digest {
            let digest = fixture
                .payload_digest
                .unwrap_or_else(|| sha1_digest(payload));
            self.body.extend_from_slice(&digest);
        }
        self.body.extend_from_slice(payload);
        self
    }

    /// Append raw bytes to the entry list
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.body.extend_from_slice(bytes);
        self
    }

    /// Stream with the zero sentinel after the last entry
    pub fn finish(&self) -> Vec<u8> {
        self.assemble(true)
    }

    /// Stream that ends right after the last entry
    pub fn finish_without_sentinel(&self) -> Vec<u8> {
        self.assemble(false)
    }

    fn assemble(&self, sentinel: bool) -> Vec<u8> {
        let mut out = self.layout.format.magic().to_be_bytes().to_vec();
        out.extend_from_slice(&self.universe.to_le_bytes());

        let table_offset = self.layout.stream_header_len()
            + self.body.len()
            + if sentinel { 4 } else { 0 };
        if self.layout.string_table {
            out.extend_from_slice(&(table_offset as u64).to_le_bytes());
        }
        out.extend_from_slice(&self.body);
        if sentinel {
            out.extend_from_slice(&0u32.to_le_bytes());
        }
        if self.layout.string_table {
            out.extend_from_slice(&self.keys.to_bytes());
        }
        out
    }
}

fn section_id(name: &str) -> Option<u8> {
    (1..=u8::MAX)
        .filter_map(appinfo_core::Section::from_id)
        .find(|s| s.name() == name)
        .map(|s| s.id())
}
