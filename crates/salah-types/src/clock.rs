//! Minute-resolution time of day.

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::SalahError;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// A time of day with minute precision, rendered canonically as zero-padded `HH:mm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// `strftime` pattern of the canonical 24-hour form.
    pub const CANONICAL_FORMAT: &'static str = "%H:%M";

    pub const MIDNIGHT: ClockTime = ClockTime(NaiveTime::MIN);

    /// Returns `None` when `hour > 23` or `minute > 59`.
    pub fn from_hm(hour: u32, minute: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Truncates seconds and sub-seconds.
    pub fn from_naive(time: NaiveTime) -> Self {
        Self(NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time))
    }

    /// Builds a time from minutes since midnight, wrapping into a single day in both directions.
    pub fn from_minutes(minutes: i64) -> Self {
        let wrapped = minutes.rem_euclid(MINUTES_PER_DAY) as u32;
        Self::from_hm(wrapped / 60, wrapped % 60).unwrap_or(Self::MIDNIGHT)
    }

    /// Converts fractional hours to a clock time, rounding to the nearest minute.
    ///
    /// Half a minute is added before the hour and minute parts are floored, then the value is
    /// reduced into `[0, 24)`. Returns `None` for NaN or infinite input.
    pub fn from_fractional_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() {
            return None;
        }
        let reduced = (hours + 0.5 / 60.0).rem_euclid(24.0);
        let mut hour = reduced.floor() as u32;
        let minute = (((reduced - reduced.floor()) * 60.0).floor() as u32).min(59);
        // rem_euclid can land on 24.0 for tiny negative inputs
        if hour >= 24 {
            hour = 0;
        }
        Self::from_hm(hour, minute)
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.0.hour() * 60 + self.0.minute()
    }

    pub fn fractional_hours(&self) -> f64 {
        f64::from(self.minutes_since_midnight()) / 60.0
    }

    pub fn as_naive(&self) -> NaiveTime {
        self.0
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = SalahError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), Self::CANONICAL_FORMAT)
            .map(Self::from_naive)
            .map_err(|_| SalahError::invalid_time(s))
    }
}

impl From<ClockTime> for NaiveTime {
    fn from(time: ClockTime) -> Self {
        time.0
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
