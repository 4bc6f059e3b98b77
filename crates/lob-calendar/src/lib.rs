//! lob-calendar
//!
//! Trading time-step translation.
//!
//! A time step is `trading_day_index * 50 + slot_ordinal`: a position on a
//! precomputed calendar of trading days (weekends and holidays removed)
//! combined with one of 50 fixed intraday slots.
//!
//! - [`TradingCalendar`]: ordered trading days over a bounded horizon.
//! - [`SessionSchedule`]: slot anchors and the rounding inverse.
//! - [`StepTranslator`]: step -> `YYYY-MM-DD HH:MM` and back, with a
//!   bounded forward-lookup cache.
//! - [`TranslatorSettings`]: typed view over layered config.
//!
//! Pure deterministic logic. No network IO, no wall-clock. The only file
//! access is loading an injected holiday CSV.

mod cache;
mod calendar;
mod error;
mod holidays;
mod schedule;
mod settings;
mod translator;

pub use cache::{StepCache, DEFAULT_CACHE_CAPACITY};
pub use calendar::TradingCalendar;
pub use error::StepError;
pub use holidays::HolidaySet;
pub use schedule::{
    ScheduleError, SessionSchedule, Slot, SLOTS_PER_DAY, SLOTS_PER_SESSION, SLOT_MINUTES,
};
pub use settings::{HolidaySource, TranslatorSettings};
pub use translator::{CacheStats, StepPoint, StepTranslator, TIMESTAMP_FORMAT};
