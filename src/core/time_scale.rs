use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::SeriesSet;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Spans strictly longer than this many days are labelled per day.
pub const DAY_UNIT_MIN_SPAN_DAYS: f64 = 7.0;
/// Spans strictly longer than this many days (and not per day) are labelled per hour.
pub const HOUR_UNIT_MIN_SPAN_DAYS: f64 = 1.0;

/// Tick/label unit of the temporal x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minute,
    #[default]
    Hour,
    Day,
}

impl TimeUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
        }
    }

    /// `chrono` format pattern used for tick labels at this unit.
    #[must_use]
    pub const fn display_format(self) -> &'static str {
        match self {
            Self::Minute => "%H:%M",
            Self::Hour => "%b %-d, %H:%M",
            Self::Day => "%b %-d",
        }
    }

    #[must_use]
    pub fn format_label(self, time: DateTime<Utc>) -> String {
        time.format(self.display_format()).to_string()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Signed span between two instants in fractional days.
#[must_use]
pub fn span_days(first: DateTime<Utc>, last: DateTime<Utc>) -> f64 {
    (last - first).num_milliseconds() as f64 / MILLIS_PER_DAY
}

/// Picks the label unit for the range covered by `first..last`.
///
/// Thresholds are exclusive: exactly seven days stays on `Hour` and exactly
/// one day stays on `Minute`. Reversed input yields a negative span and so
/// `Minute`.
#[must_use]
pub fn select_time_unit(first: DateTime<Utc>, last: DateTime<Utc>) -> TimeUnit {
    let days = span_days(first, last);
    if days > DAY_UNIT_MIN_SPAN_DAYS {
        TimeUnit::Day
    } else if days > HOUR_UNIT_MIN_SPAN_DAYS {
        TimeUnit::Hour
    } else {
        TimeUnit::Minute
    }
}

/// Resolves the unit for `series`, keeping `current` when fewer than two
/// points leave the span undefined.
#[must_use]
pub fn resolve_time_unit(series: &SeriesSet, current: TimeUnit) -> TimeUnit {
    match series.time_bounds() {
        Some((first, last)) => select_time_unit(first, last),
        None => current,
    }
}
