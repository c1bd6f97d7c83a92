//! Binary format layer for appinfo
//!
//! This crate handles everything that touches the wire format:
//!
//! - Reader: positioned little/big-endian reads with offset-carrying errors
//! - KV tree: recursive parser for the typed key/value payloads
//! - String table: out-of-line interned keys (layout 29)
//! - Digest: SHA-1 payload verification (layouts 28 and 29)
//! - Layout: per-version entry shapes
//! - Decoder: tag dispatch and the entry loop
//! - Testing: fixture encoders for synthetic streams

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod decoder;
pub mod digest;
pub mod entry;
pub mod kv_tree;
pub mod layout;
pub mod reader;
pub mod string_table;
pub mod testing;
pub mod text;

pub use decoder::{decode, decode_bytes, Decoder};
pub use digest::{sha1_digest, verify_payload};
pub use kv_tree::KvTreeParser;
pub use layout::{Framing, Layout, V29_SIZE_OVERHEAD};
pub use reader::ByteReader;
pub use string_table::StringTable;
pub use text::decode_text;
