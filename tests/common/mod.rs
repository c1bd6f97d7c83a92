//! Shared test utilities for the root integration suite.
//!
//! Import via `mod common;` from a test's main.rs.

#![allow(dead_code)]

use appinfo::testing::{EntryFixture, StreamBuilder};
use appinfo::{FormatTag, KvMap};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

// ============================================================================
// Fixtures
// ============================================================================

/// `{ "appinfo": { "appid": <appid>, "common": { "name": <name>, ... } } }`
pub fn app_tree(appid: u32, name: &str) -> KvMap {
    let mut common = KvMap::new();
    common.insert("name".into(), name.into());
    common.insert("type".into(), "Game".into());
    common.insert("review_percentage".into(), 0.97f32.into());
    let mut appinfo = KvMap::new();
    appinfo.insert("appid".into(), appid.into());
    appinfo.insert("common".into(), common.into());
    let mut root = KvMap::new();
    root.insert("appinfo".into(), appinfo.into());
    root
}

/// Stream in `format` holding the given `(appid, name)` entries
pub fn catalog(format: FormatTag, apps: &[(u32, &str)]) -> Vec<u8> {
    let mut builder = StreamBuilder::new(format);
    for &(appid, name) in apps {
        let fixture = EntryFixture {
            change_number: appid * 10,
            ..Default::default()
        };
        builder.entry(appid, &fixture, &app_tree(appid, name));
    }
    builder.finish()
}

// ============================================================================
// Log capture
// ============================================================================

/// In-memory log sink shared with a `fmt` subscriber
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Everything written so far
    pub fn contents(&self) -> String {
        let buf = self.0.lock().unwrap();
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Run `f` with a thread-local subscriber at `level`, returning its output.
pub fn capture_logs<T>(level: LevelFilter, f: impl FnOnce() -> T) -> (T, String) {
    let capture = LogCapture::default();
    let writer = capture.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = {
        let _guard = subscriber.set_default();
        f()
    };
    (result, capture.contents())
}
