//! JSON export of decoded results

use crate::common::*;
use appinfo::{decode_bytes, FormatTag};
use serde_json::json;

#[test]
fn entry_tree_exports_as_plain_json() {
    let info = decode_bytes(&catalog(FormatTag::V27, &[(440, "Team Fortress 2")])).unwrap();
    let root = serde_json::to_value(&info.get(440).unwrap().root).unwrap();

    assert_eq!(
        root,
        json!({
            "appinfo": {
                "appid": 440,
                "common": {
                    "name": "Team Fortress 2",
                    "type": "Game",
                    "review_percentage": 0.97f32,
                }
            }
        })
    );
}

#[test]
fn whole_result_exports_with_metadata() {
    let info = decode_bytes(&catalog(FormatTag::V29, &[(570, "Dota 2")])).unwrap();
    let value = serde_json::to_value(&info).unwrap();

    assert_eq!(value["format"], "V29");
    assert_eq!(value["universe"], 1);

    let entry = &value["entries"]["570"];
    assert_eq!(entry["metadata"]["change_number"], 5700);
    assert_eq!(entry["metadata"]["token"], 0);
    assert_eq!(entry["metadata"]["payload_digest"].as_array().map(Vec::len), Some(20));
    assert_eq!(entry["root"]["appinfo"]["common"]["name"], "Dota 2");
}

#[test]
fn absent_fields_export_as_null() {
    let info = decode_bytes(&catalog(FormatTag::V27, &[(10, "Counter-Strike")])).unwrap();
    let value = serde_json::to_value(&info.get(10).unwrap().metadata).unwrap();
    assert!(value["payload_digest"].is_null());
    assert!(value["size"].is_u64());
}
