//! Core types for appinfo
//!
//! This crate defines the data model shared by the decoder and its callers:
//! - KvNode / KvMap: the decoded typed key/value tree
//! - EntryMetadata / AppInfoEntry / AppInfo: per-application results
//! - FormatTag / Section: layout and section identifiers
//! - DecodeError: error type for a decode pass
//! - DecodeLimits: bounds applied to untrusted input

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entry;
pub mod error;
pub mod format;
pub mod kv;
pub mod limits;

pub use entry::{AppInfo, AppInfoEntry, DecodeResult, EntryMetadata, DIGEST_LEN};
pub use error::{DecodeError, Result};
pub use format::{FormatTag, Section};
pub use kv::{KvMap, KvNode};
pub use limits::{DecodeLimits, LimitsError};
