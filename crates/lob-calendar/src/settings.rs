//! Translator settings extracted from canonical config JSON (as produced by
//! `lob-config`).
//!
//! Every key is optional; a missing key falls back to the default horizon,
//! schedule and cache size.
//!
//! ```yaml
//! calendar:
//!   start: "2019-01-02"
//!   end: "2020-12-31"
//!   holidays_csv: "config/holidays.csv"   # omit for the built-in table
//! schedule:
//!   pre_open: "09:15"
//!   morning_open: "09:30"
//!   afternoon_open: "13:00"
//!   post_close: "15:00"
//! cache:
//!   max_entries: 10000
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{NaiveDate, NaiveTime};
use serde_json::Value;

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::calendar::TradingCalendar;
use crate::holidays::HolidaySet;
use crate::schedule::SessionSchedule;
use crate::translator::StepTranslator;

/// Where the holiday table comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HolidaySource {
    /// [`HolidaySet::cn_2019_2020`].
    Builtin,
    Csv(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorSettings {
    pub horizon_start: NaiveDate,
    pub horizon_end: NaiveDate,
    pub holidays: HolidaySource,
    pub schedule: SessionSchedule,
    pub cache_capacity: usize,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            horizon_start: NaiveDate::from_ymd_opt(2019, 1, 2).unwrap_or(NaiveDate::MIN),
            horizon_end: NaiveDate::from_ymd_opt(2020, 12, 31).unwrap_or(NaiveDate::MIN),
            holidays: HolidaySource::Builtin,
            schedule: SessionSchedule::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl TranslatorSettings {
    pub fn from_config_json(cfg: &Value) -> Result<Self> {
        let defaults = Self::default();

        let horizon_start =
            opt_date(cfg, "/calendar/start")?.unwrap_or(defaults.horizon_start);
        let horizon_end = opt_date(cfg, "/calendar/end")?.unwrap_or(defaults.horizon_end);
        if horizon_start > horizon_end {
            bail!(
                "calendar.start ({horizon_start}) must not be after calendar.end ({horizon_end})"
            );
        }

        let holidays = match opt_str(cfg, "/calendar/holidays_csv")? {
            Some(path) if !path.trim().is_empty() => HolidaySource::Csv(PathBuf::from(path)),
            _ => HolidaySource::Builtin,
        };

        let pre_open =
            opt_time(cfg, "/schedule/pre_open")?.unwrap_or(defaults.schedule.pre_open());
        let morning_open =
            opt_time(cfg, "/schedule/morning_open")?.unwrap_or(defaults.schedule.morning_open());
        let afternoon_open = opt_time(cfg, "/schedule/afternoon_open")?
            .unwrap_or(defaults.schedule.afternoon_open());
        let post_close =
            opt_time(cfg, "/schedule/post_close")?.unwrap_or(defaults.schedule.post_close());
        let schedule = SessionSchedule::new(pre_open, morning_open, afternoon_open, post_close)
            .context("invalid schedule")?;

        let cache_capacity = match cfg.pointer("/cache/max_entries") {
            None | Some(Value::Null) => defaults.cache_capacity,
            Some(v) => v
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| anyhow!("cache.max_entries must be a non-negative integer"))?,
        };

        Ok(Self {
            horizon_start,
            horizon_end,
            holidays,
            schedule,
            cache_capacity,
        })
    }

    pub fn load_holidays(&self) -> Result<HolidaySet> {
        match &self.holidays {
            HolidaySource::Builtin => Ok(HolidaySet::cn_2019_2020()),
            HolidaySource::Csv(path) => HolidaySet::from_csv_path(path),
        }
    }

    /// Load holidays, build the calendar and wrap it in a translator.
    pub fn build_translator(&self) -> Result<StepTranslator> {
        let holidays = self.load_holidays()?;
        let calendar = TradingCalendar::build(self.horizon_start, self.horizon_end, &holidays);
        Ok(StepTranslator::new(
            calendar,
            self.schedule.clone(),
            self.cache_capacity,
        ))
    }
}

fn opt_str<'a>(cfg: &'a Value, pointer: &str) -> Result<Option<&'a str>> {
    match cfg.pointer(pointer) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(anyhow!("config {} must be a string", dotted(pointer))),
    }
}

fn opt_date(cfg: &Value, pointer: &str) -> Result<Option<NaiveDate>> {
    opt_str(cfg, pointer)?
        .map(|s| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").with_context(|| {
                format!("config {} must be YYYY-MM-DD (got '{s}')", dotted(pointer))
            })
        })
        .transpose()
}

fn opt_time(cfg: &Value, pointer: &str) -> Result<Option<NaiveTime>> {
    opt_str(cfg, pointer)?
        .map(|s| {
            NaiveTime::parse_from_str(s.trim(), "%H:%M").with_context(|| {
                format!("config {} must be HH:MM (got '{s}')", dotted(pointer))
            })
        })
        .transpose()
}

/// "/calendar/start" -> "calendar.start"
fn dotted(pointer: &str) -> String {
    pointer.trim_start_matches('/').replace('/', ".")
}
