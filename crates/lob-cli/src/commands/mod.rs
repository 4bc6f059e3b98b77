//! Command handler modules for lob-cli.
//!
//! Shared utilities used by multiple command paths live here.
//! Command-specific logic lives in the submodules.

pub mod config;
pub mod convert;

use anyhow::{Context, Result};
use lob_calendar::{StepTranslator, TranslatorSettings};
use lob_config::{report_unused_keys, ConfigMode, LoadedConfig, UnusedKeyPolicy};
use tracing::debug;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Load `--config` layers in merge order. No layers means built-in defaults.
pub fn load_layers(config_paths: &[String]) -> Result<LoadedConfig> {
    if config_paths.is_empty() {
        return LoadedConfig::empty();
    }
    let path_refs: Vec<&str> = config_paths.iter().map(|s| s.as_str()).collect();
    let loaded = lob_config::load_layered_yaml(&path_refs)?;
    debug!(layers = path_refs.len(), config_hash = %loaded.config_hash, "config loaded");
    Ok(loaded)
}

/// Print unused-key warnings to stderr. Under `Fail` this errors instead.
pub fn check_unused_keys(loaded: &LoadedConfig, policy: UnusedKeyPolicy) -> Result<usize> {
    let report = report_unused_keys(ConfigMode::Cli, &loaded.config_json, policy)?;
    if !report.is_clean() {
        eprintln!(
            "WARN: CONFIG_UNUSED_KEYS mode={} unused_leaf_keys={}",
            report.mode,
            report.unused_leaf_pointers.len()
        );
        for p in report.unused_leaf_pointers.iter().take(50) {
            eprintln!("  unused={}", p);
        }
        let extra = report.unused_leaf_pointers.len().saturating_sub(50);
        if extra > 0 {
            eprintln!("  ... and {} more", extra);
        }
    }
    Ok(report.unused_leaf_pointers.len())
}

/// Layers -> settings -> translator, warning on unused keys.
pub fn load_translator(config_paths: &[String]) -> Result<StepTranslator> {
    let loaded = load_layers(config_paths)?;
    check_unused_keys(&loaded, UnusedKeyPolicy::Warn)?;
    let settings = TranslatorSettings::from_config_json(&loaded.config_json)
        .context("invalid translator settings")?;
    settings.build_translator()
}
