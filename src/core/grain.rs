use std::fmt;

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// One calendar granularity level of the time axis.
///
/// Variants are declared finest to coarsest so the derived `Ord` gives the
/// grain order used by tick generation and row assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grain {
    Second,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

impl Grain {
    /// Every grain, finest first.
    pub const ALL: [Grain; 6] = [
        Grain::Second,
        Grain::Minute,
        Grain::Hour,
        Grain::Day,
        Grain::Month,
        Grain::Year,
    ];

    /// Position of this grain in [`Grain::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Rounds `epoch_ms` down to the start of its enclosing grain unit, in the
    /// wall clock of `offset`.
    ///
    /// Returns `None` when the timestamp is outside chrono's representable range.
    #[must_use]
    pub fn floor(self, epoch_ms: i64, offset: FixedOffset) -> Option<i64> {
        let local = to_local(epoch_ms, offset)?;
        let date = local.date();
        let floored = match self {
            Self::Second => date.and_hms_opt(local.hour(), local.minute(), local.second())?,
            Self::Minute => date.and_hms_opt(local.hour(), local.minute(), 0)?,
            Self::Hour => date.and_hms_opt(local.hour(), 0, 0)?,
            Self::Day => date.and_hms_opt(0, 0, 0)?,
            Self::Month => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1)?.and_hms_opt(0, 0, 0)?
            }
            Self::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_hms_opt(0, 0, 0)?,
        };
        Some(from_local(floored, offset))
    }

    /// Advances `epoch_ms` by exactly one unit of this grain.
    ///
    /// Month and year steps follow the calendar (a step from January 31st
    /// clamps to the last day of February). Returns `None` on overflow.
    #[must_use]
    pub fn step(self, epoch_ms: i64, offset: FixedOffset) -> Option<i64> {
        let fixed_step = match self {
            Self::Second => Some(MILLIS_PER_SECOND),
            Self::Minute => Some(MILLIS_PER_MINUTE),
            Self::Hour => Some(MILLIS_PER_HOUR),
            Self::Day => Some(MILLIS_PER_DAY),
            Self::Month | Self::Year => None,
        };
        if let Some(step) = fixed_step {
            return epoch_ms.checked_add(step);
        }

        let months = if self == Self::Month { 1 } else { 12 };
        let local = to_local(epoch_ms, offset)?;
        let advanced = local.checked_add_months(Months::new(months))?;
        Some(from_local(advanced, offset))
    }
}

impl fmt::Display for Grain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Wall-clock decomposition of a timestamp in a fixed offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarComponents {
    pub year: i32,
    /// 1-based month of year.
    pub month: u32,
    /// 1-based day of month.
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl CalendarComponents {
    #[must_use]
    pub fn from_epoch_ms(epoch_ms: i64, offset: FixedOffset) -> Option<Self> {
        let local = to_local(epoch_ms, offset)?;
        Some(Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
        })
    }
}

fn to_local(epoch_ms: i64, offset: FixedOffset) -> Option<NaiveDateTime> {
    let utc = DateTime::from_timestamp_millis(epoch_ms)?;
    Some(utc.with_timezone(&offset).naive_local())
}

fn from_local(local: NaiveDateTime, offset: FixedOffset) -> i64 {
    local.and_utc().timestamp_millis() - i64::from(offset.local_minus_utc()) * MILLIS_PER_SECOND
}
