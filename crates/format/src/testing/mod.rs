//! Testing utilities for the appinfo format
//!
//! This module provides fixture encoders for building synthetic streams:
//!
//! - **KvWriter**: Encodes KV trees with inline or interned keys
//! - **StreamBuilder**: Assembles complete streams in any layout, with
//!   overridable size and digest fields for corruption tests
//!
//! # Example
//!
//! ```ignore
//! use appinfo_format::testing::{EntryFixture, StreamBuilder};
//!
//! let bytes = StreamBuilder::new(FormatTag::V28)
//!     .entry(440, &EntryFixture::default(), &root)
//!     .finish();
//! ```

mod stream;
mod writer;

pub use stream::{EntryFixture, StreamBuilder};
pub use writer::{encode_map, KeyTable, KvWriter};
