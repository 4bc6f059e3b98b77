//! Trading-day calendar.
//!
//! Deterministic, pure logic. No IO, no wall-clock.
//!
//! A [`TradingCalendar`] is the ordered list of open days over a bounded
//! horizon. Position in that list is the trading-day index used by time
//! steps, so the list is built once and never mutated afterwards.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::holidays::HolidaySet;

/// Ordered, immutable trading days over an inclusive date horizon.
#[derive(Debug, Clone)]
pub struct TradingCalendar {
    horizon_start: NaiveDate,
    horizon_end: NaiveDate,
    days: Vec<NaiveDate>,
    /// date -> position in `days`
    index: HashMap<NaiveDate, usize>,
}

impl TradingCalendar {
    /// Walk every date in `[start, end]` and keep weekdays that are not
    /// holidays.
    ///
    /// `start > end` yields an empty calendar rather than an error; an empty
    /// calendar is a valid (if useless) value.
    pub fn build(start: NaiveDate, end: NaiveDate, holidays: &HolidaySet) -> Self {
        let days: Vec<NaiveDate> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| is_open_day(*d, holidays))
            .collect();

        let index = days.iter().enumerate().map(|(i, d)| (*d, i)).collect();

        Self {
            horizon_start: start,
            horizon_end: end,
            days,
            index,
        }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// The trading day at position `index`, if within the horizon.
    pub fn day(&self, index: usize) -> Option<NaiveDate> {
        self.days.get(index).copied()
    }

    /// Position of `date` in the calendar, or `None` when it is closed or
    /// outside the horizon.
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.index.get(&date).copied()
    }

    pub fn is_trading_day(&self, date: NaiveDate) -> bool {
        self.index.contains_key(&date)
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.days.first().copied()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.days.last().copied()
    }

    pub fn horizon(&self) -> (NaiveDate, NaiveDate) {
        (self.horizon_start, self.horizon_end)
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    /// Trading days within `[from, to]`, clamped to the horizon.
    pub fn days_between(&self, from: NaiveDate, to: NaiveDate) -> &[NaiveDate] {
        let lo = self.days.partition_point(|d| *d < from);
        let hi = self.days.partition_point(|d| *d <= to);
        if lo >= hi {
            return &[];
        }
        &self.days[lo..hi]
    }
}

/// Weekend rule plus holiday lookup.
fn is_open_day(date: NaiveDate, holidays: &HolidaySet) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(date)
}
