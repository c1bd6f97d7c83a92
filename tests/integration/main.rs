//! Integration Tests
//!
//! End-to-end tests through the public `appinfo` facade:
//! - Decoding: every layout through `decode` / `decode_bytes` / `Decoder`
//! - Export: JSON shape of decoded results
//! - Logging: events emitted during a decode pass

#[path = "../common/mod.rs"]
mod common;

mod decoding;
mod export;
mod logging;
