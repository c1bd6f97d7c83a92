//! Binary KV tree parser.
//!
//! # Node Layout
//!
//! ```text
//! ┌──────────┬─────────────────────┬──────────────────────────┐
//! │ Type (1) │ Key                 │ Value                    │
//! └──────────┴─────────────────────┴──────────────────────────┘
//!
//! Key:   CString, or u32 string table index (layout 29)
//!
//! Type 0x00  nested map, value is further nodes up to 0x08
//! Type 0x01  CString
//! Type 0x02  u32 LE
//! Type 0x03  f32 LE
//! Type 0x07  u64 LE (string-table layouts only)
//! Type 0x08  end of the current map, no key or value
//! ```
//!
//! A payload is a sequence of nodes ending in `0x08`, so the root of every
//! entry decodes as a map.

use crate::reader::ByteReader;
use crate::string_table::StringTable;
use appinfo_core::{DecodeError, DecodeLimits, KvMap, KvNode, Result};
use std::io::{Read, Seek};

/// Node type tags
pub mod node_tags {
    /// Nested map
    pub const MAP: u8 = 0x00;
    /// String value
    pub const STRING: u8 = 0x01;
    /// 32-bit unsigned value
    pub const UINT32: u8 = 0x02;
    /// 32-bit float value
    pub const FLOAT32: u8 = 0x03;
    /// 64-bit unsigned value
    pub const UINT64: u8 = 0x07;
    /// End of map
    pub const END: u8 = 0x08;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeType {
    Map,
    Str,
    UInt32,
    Float32,
    UInt64,
}

/// Recursive-descent parser for KV trees.
///
/// Keys are read inline unless a string table is attached, in which case
/// each key is a 4-byte index into it.
#[derive(Debug, Clone)]
pub struct KvTreeParser<'a> {
    strings: Option<&'a StringTable>,
    max_depth: usize,
}

impl<'a> KvTreeParser<'a> {
    /// Create a parser with inline keys.
    pub fn new(limits: &DecodeLimits) -> Self {
        KvTreeParser {
            strings: None,
            max_depth: limits.max_depth,
        }
    }

    /// Resolve keys through `table` instead of reading them inline.
    pub fn with_string_table(mut self, table: &'a StringTable) -> Self {
        self.strings = Some(table);
        self
    }

    /// Parse one map body, up to and including its terminator.
    pub fn parse_map<R: Read + Seek>(&self, reader: &mut ByteReader<R>) -> Result<KvMap> {
        self.parse_map_at(reader, 1)
    }

    fn parse_map_at<R: Read + Seek>(
        &self,
        reader: &mut ByteReader<R>,
        depth: usize,
    ) -> Result<KvMap> {
        let mut map = KvMap::new();
        loop {
            let offset = reader.tell();
            let tag = reader.read_u8()?;
            if tag == node_tags::END {
                return Ok(map);
            }
            let node_type = self.node_type(tag, offset)?;
            let key = self.read_key(reader)?;

            let value = match node_type {
                NodeType::Map => {
                    if depth >= self.max_depth {
                        return Err(DecodeError::DepthExceeded {
                            depth: depth + 1,
                            offset,
                        });
                    }
                    KvNode::Map(self.parse_map_at(reader, depth + 1)?)
                }
                NodeType::Str => KvNode::Str(reader.read_cstring()?),
                NodeType::UInt32 => KvNode::UInt32(reader.read_u32()?),
                NodeType::Float32 => KvNode::Float32(reader.read_f32()?),
                NodeType::UInt64 => KvNode::UInt64(reader.read_u64()?),
            };
            map.insert(key, value);
        }
    }

    fn node_type(&self, tag: u8, offset: u64) -> Result<NodeType> {
        match tag {
            node_tags::MAP => Ok(NodeType::Map),
            node_tags::STRING => Ok(NodeType::Str),
            node_tags::UINT32 => Ok(NodeType::UInt32),
            node_tags::FLOAT32 => Ok(NodeType::Float32),
            // Only ever written alongside a string table
            node_tags::UINT64 if self.strings.is_some() => Ok(NodeType::UInt64),
            _ => Err(DecodeError::MalformedTree { tag, offset }),
        }
    }

    fn read_key<R: Read + Seek>(&self, reader: &mut ByteReader<R>) -> Result<String> {
        match self.strings {
            Some(table) => {
                let index = reader.read_u32()?;
                Ok(table.resolve(index)?.to_string())
            }
            None => reader.read_cstring(),
        }
    }
}
