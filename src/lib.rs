//! appinfo - decoder for binary application-metadata caches
//!
//! A cache file is a sequence of per-application records, each a fixed
//! header followed by a typed key/value tree. Seven historical layouts are
//! supported, from `VDF\x02` to 29, including SHA-1 payload verification
//! (28 and later) and the out-of-line key table (29).
//!
//! # Quick Start
//!
//! ```ignore
//! use appinfo::{decode, KvNode};
//! use std::{fs::File, io::BufReader};
//!
//! let info = decode(BufReader::new(File::open("appinfo.vdf")?))?;
//! for (appid, entry) in info.iter() {
//!     let name = entry
//!         .get_path(&["appinfo", "common", "name"])
//!         .and_then(KvNode::as_str);
//!     println!("{appid}: {name:?}");
//! }
//! ```
//!
//! # Architecture
//!
//! - `appinfo-core`: the decoded data model, errors and limits
//! - `appinfo-format`: byte reader, KV tree parser, layouts and the decoder
//!
//! Decoding is a single synchronous pass that either returns every entry or
//! fails with a [`DecodeError`].

pub use appinfo_core::{
    AppInfo, AppInfoEntry, DecodeError, DecodeLimits, DecodeResult, EntryMetadata, FormatTag,
    KvMap, KvNode, LimitsError, Result, Section, DIGEST_LEN,
};
pub use appinfo_format::{decode, decode_bytes, Decoder};

/// Fixture encoders for building synthetic cache streams in tests
pub use appinfo_format::testing;
