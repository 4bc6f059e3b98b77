//! Config command handlers: `lob config-hash`, `lob config-check`.

use anyhow::{Context, Result};
use lob_calendar::TranslatorSettings;
use lob_config::UnusedKeyPolicy;

use super::{check_unused_keys, load_layers};

/// Compute layered config hash + print canonical JSON.
pub fn config_hash(paths: &[String]) -> Result<()> {
    let loaded = load_layers(paths)?;
    println!("config_hash={}", loaded.config_hash);
    println!("{}", loaded.canonical_json);
    Ok(())
}

/// Load layers, flag unused keys and build the calendar they describe.
pub fn config_check(paths: &[String], strict: bool) -> Result<()> {
    let loaded = load_layers(paths)?;
    let policy = if strict {
        UnusedKeyPolicy::Fail
    } else {
        UnusedKeyPolicy::Warn
    };
    let unused = check_unused_keys(&loaded, policy)?;

    let settings = TranslatorSettings::from_config_json(&loaded.config_json)
        .context("invalid translator settings")?;
    let translator = settings.build_translator()?;

    println!("config_ok=true");
    println!("config_hash={}", loaded.config_hash);
    println!("unused_leaf_keys={}", unused);
    println!("trading_days_count={}", translator.calendar().len());
    Ok(())
}
