//! Intraday slot schedule.
//!
//! Every trading day is cut into exactly [`SLOTS_PER_DAY`] slots:
//!
//! | Ordinal  | Slot                   | Default time            |
//! |----------|------------------------|-------------------------|
//! | 0        | `PreOpen`              | 09:15                   |
//! | 1..=24   | `MorningAuction(0..24)`| 09:30, 09:35 … 11:25    |
//! | 25..=48  | `AfternoonAuction(0..24)` | 13:00, 13:05 … 14:55 |
//! | 49       | `PostClose`            | 15:00                   |
//!
//! The session anchors are configuration. [`SessionSchedule::new`] only
//! accepts anchors for which [`SessionSchedule::slot_time`] and
//! [`SessionSchedule::classify`] are exact inverses on slot times.

use std::fmt;

use chrono::{NaiveTime, Timelike};

/// Slots per trading day.
pub const SLOTS_PER_DAY: u64 = 50;

/// Five-minute increments per auction session.
pub const SLOTS_PER_SESSION: u8 = 24;

/// Width of one auction slot.
pub const SLOT_MINUTES: u32 = 5;

/// Pre-open accepts ± this many minutes around its anchor.
const PRE_OPEN_TOLERANCE_MINUTES: u32 = 5;

/// Minutes before the post-close anchor that already round onto it.
const POST_CLOSE_LEAD_MINUTES: u32 = SLOT_MINUTES / 2;

/// Minutes after the post-close anchor still accepted as post-close.
const POST_CLOSE_TRAIL_MINUTES: u32 = 5;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// One of the fixed intraday buckets.
///
/// The derived ordering matches the ordinal ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    PreOpen,
    /// Position `0..24` within the morning session.
    MorningAuction(u8),
    /// Position `0..24` within the afternoon session.
    AfternoonAuction(u8),
    PostClose,
}

impl Slot {
    /// Ordinal of this slot within the day (`0..50`).
    pub fn ordinal(self) -> u64 {
        let n = u64::from(SLOTS_PER_SESSION);
        match self {
            Slot::PreOpen => 0,
            Slot::MorningAuction(i) => 1 + u64::from(i),
            Slot::AfternoonAuction(i) => 1 + n + u64::from(i),
            Slot::PostClose => SLOTS_PER_DAY - 1,
        }
    }

    /// Inverse of [`Slot::ordinal`]; `None` for `ordinal >= 50`.
    pub fn from_ordinal(ordinal: u64) -> Option<Self> {
        let n = u64::from(SLOTS_PER_SESSION);
        match ordinal {
            0 => Some(Slot::PreOpen),
            o if o <= n => Some(Slot::MorningAuction((o - 1) as u8)),
            o if o <= 2 * n => Some(Slot::AfternoonAuction((o - 1 - n) as u8)),
            o if o == SLOTS_PER_DAY - 1 => Some(Slot::PostClose),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleError {
    /// The pre-open tolerance window reaches into the morning session.
    PreOpenOverlapsMorning,
    /// The morning session runs into the afternoon session.
    MorningOverlapsAfternoon,
    /// The last afternoon slot is less than one slot before post-close.
    AfternoonOverlapsPostClose,
    /// The post-close window crosses midnight.
    PostCloseTooLate,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::PreOpenOverlapsMorning => write!(
                f,
                "pre_open must be more than {PRE_OPEN_TOLERANCE_MINUTES} minutes before morning_open"
            ),
            ScheduleError::MorningOverlapsAfternoon => write!(
                f,
                "afternoon_open must be after the end of the morning session"
            ),
            ScheduleError::AfternoonOverlapsPostClose => write!(
                f,
                "post_close must be at least one slot after the last afternoon slot"
            ),
            ScheduleError::PostCloseTooLate => {
                write!(f, "post_close window must end before midnight")
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

/// Session anchors plus the precomputed time of every slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSchedule {
    pre_open: u32,
    morning_open: u32,
    afternoon_open: u32,
    post_close: u32,
    slot_times: Vec<NaiveTime>,
}

impl Default for SessionSchedule {
    /// 09:15 pre-open, 09:30 morning, 13:00 afternoon, 15:00 post-close.
    fn default() -> Self {
        Self::from_minutes(9 * 60 + 15, 9 * 60 + 30, 13 * 60, 15 * 60)
            .unwrap_or_else(|_| unreachable!("default schedule is valid"))
    }
}

impl SessionSchedule {
    pub fn new(
        pre_open: NaiveTime,
        morning_open: NaiveTime,
        afternoon_open: NaiveTime,
        post_close: NaiveTime,
    ) -> Result<Self, ScheduleError> {
        Self::from_minutes(
            minute_of_day(pre_open),
            minute_of_day(morning_open),
            minute_of_day(afternoon_open),
            minute_of_day(post_close),
        )
    }

    fn from_minutes(
        pre_open: u32,
        morning_open: u32,
        afternoon_open: u32,
        post_close: u32,
    ) -> Result<Self, ScheduleError> {
        if pre_open + PRE_OPEN_TOLERANCE_MINUTES >= morning_open {
            return Err(ScheduleError::PreOpenOverlapsMorning);
        }
        if session_end(morning_open) >= afternoon_open {
            return Err(ScheduleError::MorningOverlapsAfternoon);
        }
        if session_end(afternoon_open) > post_close {
            return Err(ScheduleError::AfternoonOverlapsPostClose);
        }
        if post_close + POST_CLOSE_TRAIL_MINUTES >= MINUTES_PER_DAY {
            return Err(ScheduleError::PostCloseTooLate);
        }

        let mut slot_times = Vec::with_capacity(SLOTS_PER_DAY as usize);
        for ordinal in 0..SLOTS_PER_DAY {
            let minute = match Slot::from_ordinal(ordinal) {
                Some(Slot::PreOpen) => pre_open,
                Some(Slot::MorningAuction(i)) => morning_open + u32::from(i) * SLOT_MINUTES,
                Some(Slot::AfternoonAuction(i)) => afternoon_open + u32::from(i) * SLOT_MINUTES,
                Some(Slot::PostClose) | None => post_close,
            };
            slot_times.push(time_from_minute(minute).ok_or(ScheduleError::PostCloseTooLate)?);
        }

        Ok(Self {
            pre_open,
            morning_open,
            afternoon_open,
            post_close,
            slot_times,
        })
    }

    /// Wall-clock time of `slot`.
    pub fn slot_time(&self, slot: Slot) -> NaiveTime {
        self.slot_times[slot.ordinal() as usize]
    }

    /// Map a time of day onto a slot, rounding to the nearest slot time.
    ///
    /// Windows, in priority order:
    /// - post-close: `[post_close - 2m, post_close + 5m]`
    /// - pre-open: `[pre_open - 5m, pre_open + 5m]`
    /// - morning: `[morning_open, morning_open + 120m]`
    /// - afternoon: `[afternoon_open, afternoon_open + 120m]`
    ///
    /// Seconds are ignored. Returns `None` outside every window.
    pub fn classify(&self, time: NaiveTime) -> Option<Slot> {
        let m = minute_of_day(time);

        if m + POST_CLOSE_LEAD_MINUTES >= self.post_close
            && m <= self.post_close + POST_CLOSE_TRAIL_MINUTES
        {
            return Some(Slot::PostClose);
        }
        if m + PRE_OPEN_TOLERANCE_MINUTES >= self.pre_open
            && m <= self.pre_open + PRE_OPEN_TOLERANCE_MINUTES
        {
            return Some(Slot::PreOpen);
        }
        if let Some(i) = session_position(m, self.morning_open) {
            return Some(Slot::MorningAuction(i));
        }
        if let Some(i) = session_position(m, self.afternoon_open) {
            return Some(Slot::AfternoonAuction(i));
        }
        None
    }

    pub fn pre_open(&self) -> NaiveTime {
        self.slot_time(Slot::PreOpen)
    }

    pub fn morning_open(&self) -> NaiveTime {
        self.slot_time(Slot::MorningAuction(0))
    }

    pub fn afternoon_open(&self) -> NaiveTime {
        self.slot_time(Slot::AfternoonAuction(0))
    }

    pub fn post_close(&self) -> NaiveTime {
        self.slot_time(Slot::PostClose)
    }
}

/// Exclusive end of a session (one slot past its last slot).
fn session_end(open: u32) -> u32 {
    open + u32::from(SLOTS_PER_SESSION) * SLOT_MINUTES
}

/// Nearest slot position for minute `m` in the session opening at `open`.
///
/// The session end itself is accepted and clamps onto the last slot.
fn session_position(m: u32, open: u32) -> Option<u8> {
    if m < open || m > session_end(open) {
        return None;
    }
    // Integer minutes never land exactly halfway between two slots.
    let rounded = (m - open + SLOT_MINUTES / 2) / SLOT_MINUTES;
    let last = u32::from(SLOTS_PER_SESSION) - 1;
    Some(rounded.min(last) as u8)
}

fn minute_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

fn time_from_minute(m: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(m / 60, m % 60, 0)
}
