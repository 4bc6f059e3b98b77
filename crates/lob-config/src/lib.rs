//! lob-config
//!
//! Layered YAML configuration.
//!
//! - Layers are merged in order: earlier docs are the base, later docs
//!   override (objects merge key by key, everything else is replaced).
//! - The merged document is rendered as canonical JSON and hashed with
//!   SHA-256 so a running service can report exactly which config it uses.
//! - An unused-key guard flags leaf keys no consumer reads, which catches
//!   typos like `calendar.strat`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeSet;
use std::fs;

/// Which binary is consuming the config. Each reads a different subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    Daemon,
    Cli,
}

impl ConfigMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigMode::Daemon => "DAEMON",
            ConfigMode::Cli => "CLI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedKeyPolicy {
    Warn,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusedKeyReport {
    pub mode: String,
    /// Consumed JSON-pointer prefixes used for this analysis (sorted, unique)
    pub consumed_prefixes: Vec<String>,
    /// Unused leaf pointers (sorted)
    pub unused_leaf_pointers: Vec<String>,
}

impl UnusedKeyReport {
    pub fn is_clean(&self) -> bool {
        self.unused_leaf_pointers.is_empty()
    }
}

/// Registry of consumed JSON-pointer prefixes per mode.
///
/// A prefix consumes its whole subtree: "/calendar" consumes
/// "/calendar/start" and "/calendar/holidays_csv". Keep this in step with
/// what `lob_calendar::TranslatorSettings::from_config_json` and the
/// binaries actually read.
pub fn consumed_pointers_for_mode(mode: ConfigMode) -> &'static [&'static str] {
    match mode {
        ConfigMode::Daemon => &["/calendar", "/schedule", "/cache", "/daemon/addr"],
        ConfigMode::Cli => &["/calendar", "/schedule", "/cache"],
    }
}

/// Produce an unused-key report for a given mode.
/// If `policy == Fail`, returns an error when unused keys exist.
/// If `policy == Warn`, always returns Ok(report).
pub fn report_unused_keys(
    mode: ConfigMode,
    config_json: &Value,
    policy: UnusedKeyPolicy,
) -> Result<UnusedKeyReport> {
    let consumed: BTreeSet<String> = consumed_pointers_for_mode(mode)
        .iter()
        .map(|p| normalize_pointer(p))
        .collect();
    let consumed_prefixes: Vec<String> = consumed.into_iter().collect();

    let mut leaves: Vec<String> = Vec::new();
    collect_leaf_pointers(config_json, "", &mut leaves);

    let mut unused: Vec<String> = leaves
        .into_iter()
        .filter(|leaf| !consumed_prefixes.iter().any(|cp| is_prefix_pointer(cp, leaf)))
        .collect();
    unused.sort();
    unused.dedup();

    let report = UnusedKeyReport {
        mode: mode.as_str().to_string(),
        consumed_prefixes,
        unused_leaf_pointers: unused,
    };

    if policy == UnusedKeyPolicy::Fail && !report.is_clean() {
        bail!(
            "CONFIG_UNUSED_KEYS (mode={}): {} unused config leaf key(s) detected. \
            Remove them or update the consumed registry. First few: {}",
            report.mode,
            report.unused_leaf_pointers.len(),
            preview_list(&report.unused_leaf_pointers, 12)
        );
    }

    Ok(report)
}

/// Normalize JSON pointer:
/// - must begin with "/"
/// - no trailing "/" unless it's just "/"
fn normalize_pointer(p: &str) -> String {
    let mut s = p.trim().to_string();
    if s.is_empty() {
        return "/".to_string();
    }
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    while s.ends_with('/') && s.len() > 1 {
        s.pop();
    }
    s
}

/// "/a/b" consumes "/a/b" and "/a/b/c" but not "/a/bc".
fn is_prefix_pointer(prefix: &str, leaf: &str) -> bool {
    if prefix == "/" || leaf == prefix {
        return true;
    }
    leaf.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('/'))
}

fn collect_leaf_pointers(v: &Value, prefix: &str, out: &mut Vec<String>) {
    match v {
        Value::Object(map) if !map.is_empty() => {
            for (k, vv) in map.iter() {
                let next = format!("{}/{}", prefix, escape_pointer_token(k));
                collect_leaf_pointers(vv, &next, out);
            }
        }
        Value::Array(arr) if !arr.is_empty() => {
            for (i, vv) in arr.iter().enumerate() {
                let next = format!("{}/{}", prefix, i);
                collect_leaf_pointers(vv, &next, out);
            }
        }
        // The root document itself is never reported.
        _ if prefix.is_empty() => {}
        _ => out.push(prefix.to_string()),
    }
}

fn escape_pointer_token(s: &str) -> String {
    s.replace('~', "~0").replace('/', "~1")
}

fn preview_list(items: &[String], n: usize) -> String {
    let take = items.iter().take(n).cloned().collect::<Vec<_>>();
    format!("{:?}", take)
}

#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    /// An empty document: every consumer falls back to its defaults.
    pub fn empty() -> Result<Self> {
        load_layered_yaml_from_strings(&[])
    }
}

pub fn load_layered_yaml(paths: &[&str]) -> Result<LoadedConfig> {
    let mut docs: Vec<String> = Vec::new();
    for p in paths {
        let raw =
            fs::read_to_string(p).with_context(|| format!("failed to read yaml path: {p}"))?;
        docs.push(raw);
    }

    let doc_refs: Vec<&str> = docs.iter().map(|s| s.as_str()).collect();
    load_layered_yaml_from_strings(&doc_refs)
}

pub fn load_layered_yaml_from_strings(yaml_docs: &[&str]) -> Result<LoadedConfig> {
    let mut merged = serde_json::json!({});
    for (i, raw) in yaml_docs.iter().enumerate() {
        let v_yaml: serde_yaml::Value =
            serde_yaml::from_str(raw).with_context(|| format!("invalid yaml in layer {i}"))?;
        let v_json = serde_json::to_value(v_yaml).context("yaml->json conversion failed")?;
        // An empty YAML document parses as null; treat it as "no overrides".
        if v_json.is_null() {
            continue;
        }
        merged = deep_merge(merged, v_json);
    }

    if !merged.is_object() {
        bail!("config root must be a mapping");
    }

    let canonical_json = canonicalize_json(&merged)?;
    let config_hash = sha256_hex(canonical_json.as_bytes());
    Ok(LoadedConfig {
        config_hash,
        canonical_json,
        config_json: merged,
    })
}

fn deep_merge(a: Value, b: Value) -> Value {
    match (a, b) {
        (Value::Object(mut a_map), Value::Object(b_map)) => {
            for (k, b_val) in b_map {
                let a_val = a_map.remove(&k).unwrap_or(Value::Null);
                a_map.insert(k, deep_merge(a_val, b_val));
            }
            Value::Object(a_map)
        }
        (_, b_other) => b_other,
    }
}

fn canonicalize_json(v: &Value) -> Result<String> {
    // serde_json's default Map is ordered by key, so compact serialization
    // is already canonical.
    serde_json::to_string(v).context("canonical json serialize failed")
}

fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefix_requires_segment_boundary() {
        assert!(is_prefix_pointer("/cache", "/cache/max_entries"));
        assert!(is_prefix_pointer("/cache", "/cache"));
        assert!(!is_prefix_pointer("/cache", "/cache_size"));
        assert!(is_prefix_pointer("/", "/anything"));
    }

    #[test]
    fn deep_merge_overrides_leaves_and_keeps_siblings() {
        let base = json!({ "calendar": { "start": "2019-01-02", "end": "2020-12-31" } });
        let over = json!({ "calendar": { "end": "2019-12-31" } });
        let merged = deep_merge(base, over);
        assert_eq!(merged["calendar"]["start"], "2019-01-02");
        assert_eq!(merged["calendar"]["end"], "2019-12-31");
    }

    #[test]
    fn empty_layers_load_as_empty_object() {
        let loaded = load_layered_yaml_from_strings(&["", "# only a comment\n"]).unwrap();
        assert_eq!(loaded.config_json, json!({}));
        assert_eq!(loaded.canonical_json, "{}");
    }

    #[test]
    fn scalar_root_is_rejected() {
        assert!(load_layered_yaml_from_strings(&["42"]).is_err());
    }

    #[test]
    fn pointer_tokens_are_escaped() {
        let mut out = Vec::new();
        collect_leaf_pointers(&json!({ "a/b": { "c~d": 1 } }), "", &mut out);
        assert_eq!(out, vec!["/a~1b/c~0d".to_string()]);
    }
}
