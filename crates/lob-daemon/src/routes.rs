//! Axum router and all HTTP handlers for lob-daemon.
//!
//! `build_router` is the single entry point; `main.rs` calls it and attaches
//! middleware layers.  All handlers are `pub(crate)` so the scenario tests in
//! `tests/` can compose the router directly.
//!
//! Request bodies are taken as raw `serde_json::Value` so that a missing
//! field, a field of the wrong type and a negative step each get their own
//! error code instead of one generic extractor rejection.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use lob_calendar::StepError;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    api_types::{ErrorResponse, HealthResponse, TimeResponse, TimeStepResponse},
    state::AppState,
};

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Build the complete application router wired to the given shared state.
///
/// Middleware layers (CORS, tracing) are **not** applied here; `main.rs`
/// attaches them after this call so tests can use the bare router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/times", post(times))
        .route("/api/timestep", post(timestep))
        .route("/api/cache/stats", get(cache_stats))
        .route("/api/cache/clear", post(cache_clear))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Error helpers
// ---------------------------------------------------------------------------

fn bad_request(code: &str, message: impl Into<String>) -> Response {
    let body = ErrorResponse {
        error: code.to_string(),
        message: message.into(),
    };
    warn!(code = %body.error, message = %body.message, "request rejected");
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn step_error(err: StepError) -> Response {
    bad_request(err.code(), err.to_string())
}

/// Integer literals past the 64-bit range reach us as floats. Anything with
/// no fractional part at that magnitude was written as an integer.
fn is_oversized_integer(raw: &Value) -> bool {
    // 2^63: below this serde_json keeps integers as i64/u64.
    const INTEGER_LIMIT: f64 = 9_223_372_036_854_775_808.0;
    raw.as_f64()
        .is_some_and(|f| f.is_finite() && f.fract() == 0.0 && f.abs() >= INTEGER_LIMIT)
}

/// A JSON `null` counts as absent.
fn field<'a>(body: &'a Value, name: &str) -> Option<&'a Value> {
    body.get(name).filter(|v| !v.is_null())
}

// ---------------------------------------------------------------------------
// GET /api/health
// ---------------------------------------------------------------------------

pub(crate) async fn health(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            service: st.build.service.to_string(),
            version: st.build.version.to_string(),
            config_hash: st.config_hash.clone(),
        }),
    )
}

// ---------------------------------------------------------------------------
// POST /api/times
// ---------------------------------------------------------------------------

/// `{ "time_step": n }` -> `{ "accurate_time": "YYYY-MM-DD HH:MM" }`
pub(crate) async fn times(State(st): State<Arc<AppState>>, Json(body): Json<Value>) -> Response {
    let Some(raw) = field(&body, "time_step") else {
        return bad_request("MISSING_FIELD", "time_step is required");
    };

    let step = match raw.as_u64() {
        Some(step) => step,
        None if raw.as_i64().is_some() => {
            return bad_request("OUT_OF_RANGE", "time_step must not be negative");
        }
        None if is_oversized_integer(raw) => {
            return bad_request(
                "OUT_OF_RANGE",
                format!("time_step {raw} is beyond the supported range"),
            );
        }
        None => return bad_request("BAD_FORMAT", "time_step must be an integer"),
    };

    match st.translator.to_timestamp(step) {
        Ok(accurate_time) => {
            debug!(step, %accurate_time, "times");
            (StatusCode::OK, Json(TimeResponse { accurate_time })).into_response()
        }
        Err(err) => step_error(err),
    }
}

// ---------------------------------------------------------------------------
// POST /api/timestep
// ---------------------------------------------------------------------------

/// `{ "time": "YYYY-MM-DD HH:MM" }` -> `{ "time_step": n }`
pub(crate) async fn timestep(
    State(st): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Response {
    let Some(raw) = field(&body, "time") else {
        return bad_request("MISSING_FIELD", "time is required");
    };
    let Some(text) = raw.as_str() else {
        return bad_request("BAD_FORMAT", "time must be a string");
    };

    match st.translator.to_step(text) {
        Ok(time_step) => {
            debug!(time = text, time_step, "timestep");
            (StatusCode::OK, Json(TimeStepResponse { time_step })).into_response()
        }
        Err(err) => step_error(err),
    }
}

// ---------------------------------------------------------------------------
// GET /api/cache/stats
// ---------------------------------------------------------------------------

pub(crate) async fn cache_stats(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(st.translator.stats()))
}

// ---------------------------------------------------------------------------
// POST /api/cache/clear
// ---------------------------------------------------------------------------

pub(crate) async fn cache_clear(State(st): State<Arc<AppState>>) -> impl IntoResponse {
    st.translator.clear_cache();
    let stats = st.translator.stats();
    info!(trading_days = stats.trading_days_count, "cache/clear");
    (StatusCode::OK, Json(stats))
}
