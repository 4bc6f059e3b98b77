//! Step <-> timestamp translation.
//!
//! `step = trading_day_index * 50 + slot_ordinal`. The forward direction is
//! total within the horizon; the inverse accepts any minute inside a slot
//! window and rounds it onto the nearest slot, so
//! `to_step(to_timestamp(s)) == s` for every in-range `s`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::cache::StepCache;
use crate::calendar::TradingCalendar;
use crate::error::StepError;
use crate::schedule::{SessionSchedule, Slot, SLOTS_PER_DAY};

/// Rendering and parsing format for timestamps (minute precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Snapshot returned by [`StepTranslator::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub cache_size: usize,
    pub trading_days_count: usize,
    /// `None` when the calendar has no trading days.
    pub max_supported_time_step: Option<u64>,
}

/// A step decomposed into its trading day and slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepPoint {
    pub day_index: usize,
    pub date: NaiveDate,
    pub slot: Slot,
    pub at: NaiveDateTime,
}

/// Calendar + schedule + forward-lookup cache.
///
/// Safe to share across threads behind an `Arc`: the calendar and schedule
/// are read-only and the cache synchronises itself.
#[derive(Debug)]
pub struct StepTranslator {
    calendar: TradingCalendar,
    schedule: SessionSchedule,
    cache: StepCache,
}

impl StepTranslator {
    pub fn new(
        calendar: TradingCalendar,
        schedule: SessionSchedule,
        cache_capacity: usize,
    ) -> Self {
        let (start, end) = calendar.horizon();
        info!(
            %start,
            %end,
            trading_days = calendar.len(),
            cache_capacity,
            "trading calendar ready"
        );
        Self {
            calendar,
            schedule,
            cache: StepCache::with_capacity(cache_capacity),
        }
    }

    pub fn calendar(&self) -> &TradingCalendar {
        &self.calendar
    }

    pub fn schedule(&self) -> &SessionSchedule {
        &self.schedule
    }

    /// Largest step inside the horizon.
    pub fn max_step(&self) -> Option<u64> {
        (self.calendar.len() as u64)
            .checked_mul(SLOTS_PER_DAY)?
            .checked_sub(1)
    }

    /// Decompose `step` without touching the cache.
    pub fn resolve(&self, step: u64) -> Result<StepPoint, StepError> {
        let out_of_range = || StepError::OutOfRange {
            step,
            max_step: self.max_step(),
        };

        let day_index = usize::try_from(step / SLOTS_PER_DAY).map_err(|_| out_of_range())?;
        let date = self.calendar.day(day_index).ok_or_else(out_of_range)?;
        let slot = Slot::from_ordinal(step % SLOTS_PER_DAY).ok_or_else(out_of_range)?;

        Ok(StepPoint {
            day_index,
            date,
            slot,
            at: date.and_time(self.schedule.slot_time(slot)),
        })
    }

    /// Forward conversion, rendered as `YYYY-MM-DD HH:MM`.
    pub fn to_timestamp(&self, step: u64) -> Result<String, StepError> {
        if let Some(hit) = self.cache.get(step) {
            return Ok(hit);
        }

        let rendered = self.resolve(step)?.at.format(TIMESTAMP_FORMAT).to_string();

        if !self.cache.put(step, &rendered) {
            debug!(step, "step cache full; result not stored");
        }
        Ok(rendered)
    }

    /// Inverse conversion from `YYYY-MM-DD HH:MM` text.
    pub fn to_step(&self, text: &str) -> Result<u64, StepError> {
        let at = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| {
            StepError::BadFormat {
                input: text.to_owned(),
            }
        })?;
        self.locate(at, text)
    }

    /// Inverse conversion from an already-parsed timestamp. Seconds are
    /// ignored.
    pub fn step_of(&self, at: NaiveDateTime) -> Result<u64, StepError> {
        let text = at.format(TIMESTAMP_FORMAT).to_string();
        self.locate(at, &text)
    }

    fn locate(&self, at: NaiveDateTime, text: &str) -> Result<u64, StepError> {
        let date = at.date();
        let day_index = self
            .calendar
            .index_of(date)
            .ok_or(StepError::NotTradingDay { date })?;

        let slot = self
            .schedule
            .classify(at.time())
            .ok_or_else(|| StepError::OutsideTradingHours {
                input: text.to_owned(),
            })?;

        Ok(day_index as u64 * SLOTS_PER_DAY + slot.ordinal())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            cache_size: self.cache.len(),
            trading_days_count: self.calendar.len(),
            max_supported_time_step: self.max_step(),
        }
    }

    pub fn clear_cache(&self) {
        let dropped = self.cache.len();
        self.cache.clear();
        info!(dropped, "step cache cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::HolidaySet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn translator(cache_capacity: usize) -> StepTranslator {
        let cal = TradingCalendar::build(
            ymd(2019, 1, 2),
            ymd(2020, 12, 31),
            &HolidaySet::cn_2019_2020(),
        );
        StepTranslator::new(cal, SessionSchedule::default(), cache_capacity)
    }

    #[test]
    fn first_two_steps_of_horizon() {
        let t = translator(16);
        assert_eq!(t.to_timestamp(0).unwrap(), "2019-01-02 09:15");
        assert_eq!(t.to_timestamp(1).unwrap(), "2019-01-02 09:30");
    }

    #[test]
    fn resolve_exposes_day_and_slot() {
        let t = translator(0);
        let p = t.resolve(3 * 50 + 25).unwrap();
        assert_eq!(p.day_index, 3);
        assert_eq!(p.date, ymd(2019, 1, 7));
        assert_eq!(p.slot, Slot::AfternoonAuction(0));
    }

    #[test]
    fn max_step_is_last_post_close() {
        let t = translator(0);
        assert_eq!(t.max_step(), Some(24_349));
        assert_eq!(t.to_timestamp(24_349).unwrap(), "2020-12-31 15:00");
    }

    #[test]
    fn huge_step_is_out_of_range() {
        let t = translator(0);
        assert_eq!(
            t.to_timestamp(u64::MAX),
            Err(StepError::OutOfRange {
                step: u64::MAX,
                max_step: Some(24_349)
            })
        );
    }

    #[test]
    fn empty_calendar_reports_no_max_step() {
        let cal = TradingCalendar::build(ymd(2019, 1, 5), ymd(2019, 1, 6), &HolidaySet::new());
        let t = StepTranslator::new(cal, SessionSchedule::default(), 8);

        assert_eq!(t.max_step(), None);
        assert_eq!(
            t.to_timestamp(0),
            Err(StepError::OutOfRange {
                step: 0,
                max_step: None
            })
        );
        assert_eq!(t.stats().max_supported_time_step, None);
    }

    #[test]
    fn step_of_ignores_seconds() {
        let t = translator(0);
        let at = ymd(2019, 1, 2).and_hms_opt(9, 30, 59).unwrap();
        assert_eq!(t.step_of(at), Ok(1));
    }

    #[test]
    fn forward_lookup_populates_cache() {
        let t = translator(16);
        t.to_timestamp(5).unwrap();
        t.to_timestamp(5).unwrap();
        t.to_timestamp(6).unwrap();
        assert_eq!(t.stats().cache_size, 2);

        t.clear_cache();
        assert_eq!(t.stats().cache_size, 0);
    }

    #[test]
    fn failed_lookup_is_not_cached() {
        let t = translator(16);
        assert!(t.to_timestamp(1_000_000).is_err());
        assert_eq!(t.stats().cache_size, 0);
    }
}
