//! Decoding through the facade

use crate::common::*;
use appinfo::testing::{EntryFixture, StreamBuilder};
use appinfo::{decode, decode_bytes, DecodeError, DecodeLimits, Decoder, FormatTag, KvMap, KvNode};
use std::io::Cursor;

const APPS: &[(u32, &str)] = &[(440, "Team Fortress 2"), (570, "Dota 2"), (730, "Counter-Strike 2")];

#[test]
fn single_tree_layouts_decode_catalog() {
    for format in [FormatTag::V27, FormatTag::V28, FormatTag::V29] {
        let info = decode(Cursor::new(catalog(format, APPS))).unwrap();
        assert_eq!(info.format, format);
        assert_eq!(info.len(), APPS.len());

        for &(appid, name) in APPS {
            let entry = info.get(appid).unwrap();
            assert_eq!(entry.metadata.change_number, appid * 10);
            assert_eq!(
                entry
                    .get_path(&["appinfo", "common", "name"])
                    .and_then(KvNode::as_str),
                Some(name),
                "{format}"
            );
            assert_eq!(
                entry.get_path(&["appinfo", "appid"]).and_then(KvNode::as_u32),
                Some(appid)
            );
        }
    }
}

#[test]
fn section_layouts_decode_through_facade() {
    let mut common = KvMap::new();
    common.insert("name".into(), "Half-Life".into());
    let mut config = KvMap::new();
    config.insert("installdir".into(), "Half-Life".into());
    let mut root = KvMap::new();
    root.insert("common".into(), common.into());
    root.insert("config".into(), config.into());

    for format in [FormatTag::Vdf2, FormatTag::V24, FormatTag::V25, FormatTag::V26] {
        let bytes = StreamBuilder::new(format)
            .universe(2)
            .entry(70, &EntryFixture::default(), &root)
            .finish();
        let info = decode_bytes(&bytes).unwrap();
        assert_eq!(info.universe, 2);
        assert_eq!(
            info.get(70)
                .and_then(|e| e.get_path(&["config", "installdir"]))
                .and_then(KvNode::as_str),
            Some("Half-Life")
        );
    }
}

#[test]
fn entries_iterate_in_stream_order() {
    let info = decode_bytes(&catalog(FormatTag::V29, APPS)).unwrap();
    let ids: Vec<u32> = info.iter().map(|(appid, _)| appid).collect();
    assert_eq!(ids, vec![440, 570, 730]);

    let entries = info.into_entries();
    assert_eq!(entries.get_index(1).map(|(id, _)| *id), Some(570));
}

#[test]
fn metadata_helpers() {
    let info = decode_bytes(&catalog(FormatTag::V28, APPS)).unwrap();
    let meta = &info.get(440).unwrap().metadata;

    assert_eq!(
        meta.last_updated().map(|t| t.timestamp()),
        Some(1_600_000_000)
    );
    assert_eq!(meta.content_digest_hex(), Some("00".repeat(20)));
    assert_eq!(meta.payload_digest_hex().map(|h| h.len()), Some(40));
}

#[test]
fn configured_depth_limit() {
    let mut node = KvMap::new();
    node.insert("leaf".into(), 1u32.into());
    for _ in 0..5 {
        let mut parent = KvMap::new();
        parent.insert("child".into(), node.into());
        node = parent;
    }
    let bytes = StreamBuilder::new(FormatTag::V27)
        .entry(1, &EntryFixture::default(), &node)
        .finish();

    // Five nested maps under the root: six levels in total
    let deep_enough = DecodeLimits::default().with_max_depth(6);
    let mut decoder = Decoder::new(Cursor::new(bytes.clone()))
        .with_limits(deep_enough)
        .unwrap();
    assert!(decoder.decode().is_ok());

    let too_shallow = DecodeLimits::default().with_max_depth(5);
    let mut decoder = Decoder::new(Cursor::new(bytes))
        .with_limits(too_shallow)
        .unwrap();
    assert!(matches!(
        decoder.decode(),
        Err(DecodeError::DepthExceeded { depth: 6, .. })
    ));
}

#[test]
fn configured_payload_limit() {
    let bytes = catalog(FormatTag::V28, APPS);
    let limits = DecodeLimits::default().with_max_payload_bytes(16);
    let mut decoder = Decoder::new(Cursor::new(bytes)).with_limits(limits).unwrap();
    assert!(matches!(
        decoder.decode(),
        Err(DecodeError::InvalidEntrySize { appid: 440, .. })
    ));
}

#[test]
fn unsupported_format_is_not_corruption() {
    let err = decode_bytes(b"PK\x03\x04\0\0\0\0").unwrap_err();
    assert!(matches!(err, DecodeError::UnsupportedFormat { magic: 0x504B_0304 }));
    assert!(!err.is_corruption());
    assert!(err.to_string().contains("0x504b0304"));
}
