//! Shared runtime state for lob-daemon.
//!
//! Handlers receive `State<Arc<AppState>>` from Axum. The translator is
//! read-only apart from its self-synchronising cache, so no async locks are
//! needed here.

use std::sync::Arc;

use lob_calendar::StepTranslator;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BuildInfo
// ---------------------------------------------------------------------------

/// Static build metadata included in health responses.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub service: &'static str,
    pub version: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self {
            service: "lob-daemon",
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// Cloneable (Arc) handle shared across all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    /// Static build metadata.
    pub build: BuildInfo,
    /// Calendar, schedule and forward-lookup cache.
    pub translator: Arc<StepTranslator>,
    /// Hash of the canonical config the translator was built from.
    pub config_hash: String,
}

impl AppState {
    pub fn new(translator: StepTranslator, config_hash: impl Into<String>) -> Self {
        Self {
            build: BuildInfo::current(),
            translator: Arc::new(translator),
            config_hash: config_hash.into(),
        }
    }

    /// Build from an already-loaded layered config.
    pub fn from_config(loaded: &lob_config::LoadedConfig) -> anyhow::Result<Self> {
        let settings = lob_calendar::TranslatorSettings::from_config_json(&loaded.config_json)?;
        let translator = settings.build_translator()?;
        Ok(Self::new(translator, loaded.config_hash.clone()))
    }
}
