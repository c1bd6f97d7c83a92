//! Decoded KV tree model
//!
//! A KV tree is the typed key/value document embedded in every cache entry.
//! Interior nodes are maps keyed by text; leaves are one of four scalar
//! types.
//!
//! ## Equality
//!
//! - Integers and strings compare exactly
//! - `Float32` compares by bit pattern, so `NaN == NaN` when the bits match
//!   and `0.0 != -0.0`. A decoded tree must equal the tree that was encoded,
//!   bit for bit.
//! - Maps compare key-by-key, ignoring insertion order

use indexmap::IndexMap;
use serde::Serialize;

/// Insertion-ordered map of a KV tree level.
///
/// Inserting an existing key replaces its value in place (last write wins).
pub type KvMap = IndexMap<String, KvNode>;

/// One node of a decoded KV tree
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum KvNode {
    /// Nested map
    Map(KvMap),
    /// Text value
    Str(String),
    /// 32-bit unsigned integer
    UInt32(u32),
    /// 32-bit float
    Float32(f32),
    /// 64-bit unsigned integer
    UInt64(u64),
}

impl PartialEq for KvNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (KvNode::Map(a), KvNode::Map(b)) => {
                a.len() == b.len() && a.iter().all(|(k, v)| b.get(k) == Some(v))
            }
            (KvNode::Str(a), KvNode::Str(b)) => a == b,
            (KvNode::UInt32(a), KvNode::UInt32(b)) => a == b,
            (KvNode::Float32(a), KvNode::Float32(b)) => a.to_bits() == b.to_bits(),
            (KvNode::UInt64(a), KvNode::UInt64(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for KvNode {}

impl Default for KvNode {
    fn default() -> Self {
        KvNode::Map(KvMap::new())
    }
}

impl KvNode {
    /// Get the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            KvNode::Map(_) => "Map",
            KvNode::Str(_) => "Str",
            KvNode::UInt32(_) => "UInt32",
            KvNode::Float32(_) => "Float32",
            KvNode::UInt64(_) => "UInt64",
        }
    }

    /// Check if this node is a map
    pub fn is_map(&self) -> bool {
        matches!(self, KvNode::Map(_))
    }

    /// Get as map if this is a map
    pub fn as_map(&self) -> Option<&KvMap> {
        match self {
            KvNode::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get as string slice if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            KvNode::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as u32 if this is a 32-bit integer
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            KvNode::UInt32(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as f32 if this is a float
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            KvNode::Float32(f) => Some(*f),
            _ => None,
        }
    }

    /// Get as u64 if this is a 64-bit integer.
    ///
    /// 32-bit integers widen; other types return `None`.
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            KvNode::UInt64(n) => Some(*n),
            KvNode::UInt32(n) => Some(u64::from(*n)),
            _ => None,
        }
    }

    /// Look up a direct child of a map node.
    ///
    /// Returns `None` for leaves and missing keys.
    pub fn get(&self, key: &str) -> Option<&KvNode> {
        self.as_map()?.get(key)
    }

    /// Walk a path of keys from this node.
    ///
    /// An empty path returns this node.
    ///
    /// ```
    /// # use appinfo_core::{KvMap, KvNode};
    /// let mut inner = KvMap::new();
    /// inner.insert("gamedir".to_string(), KvNode::Str("tf".to_string()));
    /// let mut root = KvMap::new();
    /// root.insert("appinfo".to_string(), KvNode::Map(inner));
    /// let root = KvNode::Map(root);
    ///
    /// assert_eq!(root.get_path(&["appinfo", "gamedir"]).and_then(KvNode::as_str), Some("tf"));
    /// ```
    pub fn get_path(&self, path: &[&str]) -> Option<&KvNode> {
        path.iter().try_fold(self, |node, key| node.get(key))
    }
}

impl From<KvMap> for KvNode {
    fn from(m: KvMap) -> Self {
        KvNode::Map(m)
    }
}

impl From<String> for KvNode {
    fn from(s: String) -> Self {
        KvNode::Str(s)
    }
}

impl From<&str> for KvNode {
    fn from(s: &str) -> Self {
        KvNode::Str(s.to_string())
    }
}

impl From<u32> for KvNode {
    fn from(n: u32) -> Self {
        KvNode::UInt32(n)
    }
}

impl From<f32> for KvNode {
    fn from(f: f32) -> Self {
        KvNode::Float32(f)
    }
}

impl From<u64> for KvNode {
    fn from(n: u64) -> Self {
        KvNode::UInt64(n)
    }
}
