//! Config hash stability.
//!
//! GREEN when:
//! - loading the same layers twice yields the same hash and canonical JSON,
//! - key order inside a YAML document does not change the hash,
//! - different values produce different hashes,
//! - later layers override earlier ones.

use lob_config::{load_layered_yaml, load_layered_yaml_from_strings};

const BASE_YAML: &str = r#"
calendar:
  start: "2019-01-02"
  end: "2020-12-31"
schedule:
  pre_open: "09:15"
  afternoon_open: "13:00"
cache:
  max_entries: 10000
"#;

/// Same content as BASE_YAML but with keys in different order.
const BASE_YAML_REORDERED: &str = r#"
cache:
  max_entries: 10000
schedule:
  afternoon_open: "13:00"
  pre_open: "09:15"
calendar:
  end: "2020-12-31"
  start: "2019-01-02"
"#;

const OVERLAY_YAML: &str = r#"
calendar:
  end: "2019-12-31"
cache:
  max_entries: 0
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
}

#[test]
fn reordered_keys_produce_same_hash() {
    let original = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let reordered = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();

    assert_eq!(
        original.config_hash, reordered.config_hash,
        "reordering keys in YAML must not change the hash"
    );
    assert_eq!(original.canonical_json, reordered.canonical_json);
}

#[test]
fn different_values_produce_different_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML.replace("13:00", "12:57").as_str()])
        .unwrap();

    assert_ne!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_overrides_base_and_keeps_siblings() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    let end = loaded
        .config_json
        .pointer("/calendar/end")
        .and_then(|v| v.as_str())
        .unwrap();
    assert_eq!(end, "2019-12-31", "overlay should override calendar.end");

    let start = loaded
        .config_json
        .pointer("/calendar/start")
        .and_then(|v| v.as_str())
        .unwrap();
    assert_eq!(start, "2019-01-02", "base calendar.start must survive");

    assert_eq!(
        loaded.config_json.pointer("/cache/max_entries"),
        Some(&serde_json::json!(0))
    );
}

#[test]
fn hash_is_64_hex_chars() {
    let loaded = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();

    assert_eq!(loaded.config_hash.len(), 64);
    assert!(loaded.config_hash.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn files_and_strings_hash_identically() {
    let dir = tempfile::tempdir().unwrap();
    let base = dir.path().join("base.yaml");
    let overlay = dir.path().join("overlay.yaml");
    std::fs::write(&base, BASE_YAML).unwrap();
    std::fs::write(&overlay, OVERLAY_YAML).unwrap();

    let from_files = load_layered_yaml(&[
        base.to_str().unwrap(),
        overlay.to_str().unwrap(),
    ])
    .unwrap();
    let from_strings = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();

    assert_eq!(from_files.config_hash, from_strings.config_hash);
}

#[test]
fn missing_file_names_the_path() {
    let err = load_layered_yaml(&["no/such/layer.yaml"]).unwrap_err();
    assert!(err.to_string().contains("no/such/layer.yaml"));
}
