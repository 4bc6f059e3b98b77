//! Request and response types for all lob-daemon HTTP endpoints.
//!
//! These types are `Serialize + Deserialize` so they can be JSON-encoded
//! by Axum and decoded by tests.  No business logic lives here.

use serde::{Deserialize, Serialize};

pub use lob_calendar::CacheStats;

// ---------------------------------------------------------------------------
// /api/health
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process can answer.
    pub status: String,
    pub service: String,
    pub version: String,
    /// SHA-256 of the canonical config the translator was built from.
    pub config_hash: String,
}

// ---------------------------------------------------------------------------
// /api/times
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeResponse {
    /// `YYYY-MM-DD HH:MM`
    pub accurate_time: String,
}

// ---------------------------------------------------------------------------
// /api/timestep
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeStepResponse {
    pub time_step: u64,
}

// ---------------------------------------------------------------------------
// Errors (400)
// ---------------------------------------------------------------------------

/// Body of every rejected request.
///
/// For `time_step`: a negative integer or one past the 64-bit range is
/// "OUT_OF_RANGE"; a fraction, string or bool is "BAD_FORMAT".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable code: "MISSING_FIELD" | "BAD_FORMAT" | "OUT_OF_RANGE"
    /// | "NOT_TRADING_DAY" | "OUTSIDE_TRADING_HOURS"
    pub error: String,
    pub message: String,
}
