//! Decoded entries and the per-stream result
//!
//! An entry pairs the fixed header fields of one application record with the
//! KV tree decoded from its payload. Entries are built once per decode pass
//! and never mutated afterwards.

use crate::error::hex;
use crate::format::FormatTag;
use crate::kv::KvNode;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;

/// Length in bytes of the digests stored in entry headers (SHA-1)
pub const DIGEST_LEN: usize = 20;

/// Fixed header fields of one application entry.
///
/// Fields that a layout does not record are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryMetadata {
    /// Payload size as stored (absent in VDF2)
    pub size: Option<u32>,

    /// Opaque status bitfield
    pub state: u32,

    /// Last update, Unix epoch seconds
    pub timestamp: u32,

    /// Opaque access token (26 and later)
    pub token: Option<u64>,

    /// Stored content digest (26 and later, never verified)
    pub content_digest: Option<[u8; DIGEST_LEN]>,

    /// Monotonic revision counter
    pub change_number: u32,

    /// SHA-1 of the payload bytes (28 and later, verified during decode)
    pub payload_digest: Option<[u8; DIGEST_LEN]>,
}

impl EntryMetadata {
    /// Timestamp as a UTC date-time
    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(i64::from(self.timestamp), 0)
    }

    /// Content digest as lowercase hex
    pub fn content_digest_hex(&self) -> Option<String> {
        self.content_digest.as_ref().map(|d| hex(d))
    }

    /// Payload digest as lowercase hex
    pub fn payload_digest_hex(&self) -> Option<String> {
        self.payload_digest.as_ref().map(|d| hex(d))
    }
}

/// One decoded application: header fields plus its KV tree.
///
/// `root` is always a [`KvNode::Map`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfoEntry {
    /// Fixed header fields
    pub metadata: EntryMetadata,
    /// Root of the decoded tree
    pub root: KvNode,
}

impl AppInfoEntry {
    /// Create an entry
    pub fn new(metadata: EntryMetadata, root: KvNode) -> Self {
        AppInfoEntry { metadata, root }
    }

    /// Walk a key path from the entry root
    pub fn get_path(&self, path: &[&str]) -> Option<&KvNode> {
        self.root.get_path(path)
    }
}

/// Decoded entries keyed by application id, in stream order.
///
/// A repeated id overwrites the earlier entry (last wins) and keeps the
/// earlier position.
pub type DecodeResult = IndexMap<u32, AppInfoEntry>;

/// A fully decoded cache stream
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    /// Layout the stream was written in
    pub format: FormatTag,
    /// Opaque universe field from the stream header
    pub universe: u32,
    /// Decoded entries
    pub entries: DecodeResult,
}

impl AppInfo {
    /// Look up an application by id
    pub fn get(&self, appid: u32) -> Option<&AppInfoEntry> {
        self.entries.get(&appid)
    }

    /// Number of decoded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stream held no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in stream order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &AppInfoEntry)> {
        self.entries.iter().map(|(id, entry)| (*id, entry))
    }

    /// Consume into the bare id-to-entry mapping
    pub fn into_entries(self) -> DecodeResult {
        self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::KvMap;

    fn metadata() -> EntryMetadata {
        EntryMetadata {
            size: Some(0),
            state: 4,
            timestamp: 1_000_000_000,
            token: Some(0),
            content_digest: Some([0; DIGEST_LEN]),
            change_number: 1,
            payload_digest: None,
        }
    }

    #[test]
    fn test_last_updated() {
        let ts = metadata().last_updated().unwrap();
        assert_eq!(ts.to_rfc3339(), "2001-09-09T01:46:40+00:00");
    }

    #[test]
    fn test_digest_hex() {
        let mut meta = metadata();
        assert_eq!(meta.content_digest_hex().unwrap(), "00".repeat(20));
        assert_eq!(meta.payload_digest_hex(), None);
        meta.payload_digest = Some([0xde; DIGEST_LEN]);
        assert_eq!(meta.payload_digest_hex().unwrap(), "de".repeat(20));
    }

    #[test]
    fn test_app_info_lookup_and_order() {
        let mut entries = DecodeResult::new();
        entries.insert(730, AppInfoEntry::new(metadata(), KvNode::Map(KvMap::new())));
        entries.insert(440, AppInfoEntry::new(metadata(), KvNode::Map(KvMap::new())));
        let info = AppInfo {
            format: FormatTag::V27,
            universe: 1,
            entries,
        };

        assert_eq!(info.len(), 2);
        assert!(info.get(440).is_some());
        assert!(info.get(570).is_none());
        let ids: Vec<u32> = info.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![730, 440]);
    }

    #[test]
    fn test_metadata_serializes() {
        let json = serde_json::to_value(metadata()).unwrap();
        assert_eq!(json["state"], 4);
        assert_eq!(json["change_number"], 1);
        assert!(json["payload_digest"].is_null());
    }
}
