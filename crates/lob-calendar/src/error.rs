//! Conversion errors returned by the step translator.
//!
//! Every variant is scoped to a single lookup. Conversions are pure, so a
//! failed call is never worth retrying with the same input.

use std::fmt;

use chrono::NaiveDate;

/// Errors produced by [`crate::StepTranslator`] conversions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepError {
    /// The timestamp text is not of the form `YYYY-MM-DD HH:MM`.
    BadFormat { input: String },
    /// The step lies beyond the precomputed horizon.
    ///
    /// `max_step` is `None` when the calendar holds no trading days at all.
    OutOfRange { step: u64, max_step: Option<u64> },
    /// A valid calendar date excluded by the weekend or holiday rule, or one
    /// outside the configured horizon.
    NotTradingDay { date: NaiveDate },
    /// A trading day, but the time falls in no recognised slot window.
    OutsideTradingHours { input: String },
}

impl StepError {
    /// Stable machine-readable code, used in HTTP error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            StepError::BadFormat { .. } => "BAD_FORMAT",
            StepError::OutOfRange { .. } => "OUT_OF_RANGE",
            StepError::NotTradingDay { .. } => "NOT_TRADING_DAY",
            StepError::OutsideTradingHours { .. } => "OUTSIDE_TRADING_HOURS",
        }
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepError::BadFormat { input } => write!(
                f,
                "cannot parse time '{input}'; expected format 'YYYY-MM-DD HH:MM'"
            ),
            StepError::OutOfRange {
                step,
                max_step: Some(max),
            } => write!(
                f,
                "time step {step} is beyond the precomputed range; max supported step is {max}"
            ),
            StepError::OutOfRange {
                step,
                max_step: None,
            } => write!(
                f,
                "time step {step} is beyond the precomputed range; the calendar has no trading days"
            ),
            StepError::NotTradingDay { date } => write!(f, "'{date}' is not a trading day"),
            StepError::OutsideTradingHours { input } => {
                write!(f, "time '{input}' is outside trading hours")
            }
        }
    }
}

impl std::error::Error for StepError {}
