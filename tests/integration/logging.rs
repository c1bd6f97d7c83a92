//! Tracing events emitted during decoding

use crate::common::*;
use appinfo::{decode_bytes, DecodeError, FormatTag};
use tracing_subscriber::filter::LevelFilter;

#[test]
fn debug_events_bracket_the_pass() {
    let bytes = catalog(FormatTag::V29, &[(440, "Team Fortress 2"), (570, "Dota 2")]);
    let (result, logs) = capture_logs(LevelFilter::DEBUG, || decode_bytes(&bytes));

    assert_eq!(result.unwrap().len(), 2);
    assert!(logs.contains("Decoding appinfo stream"), "{logs}");
    assert!(logs.contains("Loaded string table"), "{logs}");
    assert!(logs.contains("Decoded appinfo stream"), "{logs}");
    assert!(logs.contains("entries=2"), "{logs}");
    // Per-entry events are trace level
    assert!(!logs.contains("Decoded entry"), "{logs}");
}

#[test]
fn trace_events_per_entry() {
    let bytes = catalog(FormatTag::V27, &[(440, "Team Fortress 2"), (570, "Dota 2")]);
    let (_, logs) = capture_logs(LevelFilter::TRACE, || decode_bytes(&bytes));

    assert_eq!(logs.matches("Decoded entry").count(), 2, "{logs}");
    assert!(logs.contains("appid=570"), "{logs}");
    assert!(logs.contains("change_number=5700"), "{logs}");
}

#[test]
fn digest_mismatch_is_warned() {
    let mut bytes = catalog(FormatTag::V28, &[(440, "Team Fortress 2")]);
    // First payload byte: stream header 8 + entry header 68
    bytes[76] ^= 0xFF;

    let (result, logs) = capture_logs(LevelFilter::WARN, || decode_bytes(&bytes));
    assert!(matches!(
        result,
        Err(DecodeError::IntegrityMismatch { appid: 440, .. })
    ));
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("Payload digest mismatch"), "{logs}");
    assert!(logs.contains("appid=440"), "{logs}");
}

#[test]
fn quiet_below_warn() {
    let bytes = catalog(FormatTag::V28, &[(440, "Team Fortress 2")]);
    let (result, logs) = capture_logs(LevelFilter::WARN, || decode_bytes(&bytes));
    assert!(result.is_ok());
    assert!(logs.is_empty(), "{logs}");
}
