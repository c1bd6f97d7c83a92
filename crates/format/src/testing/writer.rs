//! KV tree fixture writer.
//!
//! Encodes a [`KvMap`] into the binary node format that
//! [`KvTreeParser`](crate::kv_tree::KvTreeParser) reads. Keys are written
//! inline, or interned into a [`KeyTable`] for layout 29 streams.

use crate::kv_tree::node_tags;
use appinfo_core::{KvMap, KvNode};
use std::collections::HashMap;

/// Interned keys for string-table layouts
#[derive(Debug, Clone, Default)]
pub struct KeyTable {
    strings: Vec<String>,
    index: HashMap<String, u32>,
}

impl KeyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of `key`, adding it if new
    pub fn intern(&mut self, key: &str) -> u32 {
        if let Some(&i) = self.index.get(key) {
            return i;
        }
        let i = self.strings.len() as u32;
        self.strings.push(key.to_string());
        self.index.insert(key.to_string(), i);
        i
    }

    /// Interned strings in index order
    pub fn strings(&self) -> &[String] {
        &self.strings
    }

    /// Serialized table: count followed by C-strings
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = (self.strings.len() as u32).to_le_bytes().to_vec();
        for s in &self.strings {
            bytes.extend_from_slice(s.as_bytes());
            bytes.push(0);
        }
        bytes
    }
}

/// Byte-level KV tree writer
pub struct KvWriter<'a> {
    buf: Vec<u8>,
    keys: Option<&'a mut KeyTable>,
}

impl<'a> KvWriter<'a> {
    /// Writer with inline C-string keys
    pub fn inline() -> Self {
        KvWriter {
            buf: Vec::new(),
            keys: None,
        }
    }

    /// Writer whose keys are indices into `table`
    pub fn interned(table: &'a mut KeyTable) -> Self {
        KvWriter {
            buf: Vec::new(),
            keys: Some(table),
        }
    }

    /// Write every entry of `map` followed by the end-of-map tag.
    pub fn write_map(&mut self, map: &KvMap) -> &mut Self {
        for (key, value) in map {
            self.write_node(key, value);
        }
        self.buf.push(node_tags::END);
        self
    }

    /// Write one keyed node.
    pub fn write_node(&mut self, key: &str, value: &KvNode) -> &mut Self {
        match value {
            KvNode::Map(m) => {
                self.tag_and_key(node_tags::MAP, key);
                self.write_map(m);
            }
            KvNode::Str(s) => {
                self.tag_and_key(node_tags::STRING, key);
                self.buf.extend_from_slice(s.as_bytes());
                self.buf.push(0);
            }
            KvNode::UInt32(n) => {
                self.tag_and_key(node_tags::UINT32, key);
                self.buf.extend_from_slice(&n.to_le_bytes());
            }
            KvNode::Float32(f) => {
                self.tag_and_key(node_tags::FLOAT32, key);
                self.buf.extend_from_slice(&f.to_le_bytes());
            }
            KvNode::UInt64(n) => {
                self.tag_and_key(node_tags::UINT64, key);
                self.buf.extend_from_slice(&n.to_le_bytes());
            }
        }
        self
    }

    /// Append raw bytes, for hand-built malformed input.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    fn tag_and_key(&mut self, tag: u8, key: &str) {
        self.buf.push(tag);
        match self.keys.as_deref_mut() {
            Some(table) => {
                let index = table.intern(key);
                self.buf.extend_from_slice(&index.to_le_bytes());
            }
            None => {
                self.buf.extend_from_slice(key.as_bytes());
                self.buf.push(0);
            }
        }
    }
}

/// Encode `map` with inline keys.
pub fn encode_map(map: &KvMap) -> Vec<u8> {
    let mut writer = KvWriter::inline();
    writer.write_map(map);
    writer.into_bytes()
}
