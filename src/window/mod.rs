//! Trailing-minute window resolution and off-peak evaluation.
//!
//! Every run captures a single "now" and derives both the match window and
//! the off-peak decision from it, so archive and live-file scans always agree
//! on which minute they are looking at.
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, NaiveTime, TimeDelta};

use crate::error::ValidationError;

/// Access-log timestamp text up to minute precision, e.g. `01/Jan/2024:10:00`.
const WINDOW_FORMAT: &str = "%d/%b/%Y:%H:%M";
/// Date stamp appended to rotated archives, e.g. `20240101`.
const DAY_STAMP_FORMAT: &str = "%Y%m%d";
const TIME_OF_DAY_FORMAT: &str = "%H:%M";
/// Config value that disables the off-peak override.
const OFFPEAK_DISABLED: &str = "none";

/// Literal timestamp prefix identifying the minute before "now".
///
/// This is not an interval of instants: a line is in window when its text
/// contains the prefix, which only ever matches one calendar minute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow(String);

impl TimeWindow {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn matches(&self, line: &str) -> bool {
        line.contains(self.0.as_str())
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolves the window prefix for `now - 1 minute`.
#[must_use]
pub fn resolve_window(now: NaiveDateTime) -> TimeWindow {
    let previous_minute = now
        .checked_sub_signed(TimeDelta::minutes(1))
        .unwrap_or(now);
    TimeWindow(previous_minute.format(WINDOW_FORMAT).to_string())
}

/// Date stamp of `now` used to locate the same-day rotated archive.
#[must_use]
pub fn day_stamp(now: NaiveDateTime) -> String {
    now.format(DAY_STAMP_FORMAT).to_string()
}

/// Returns true when the time of day of `now` falls inside `[start, end]`.
///
/// A range whose start is after its end wraps past midnight.
#[must_use]
pub fn is_offpeak(now: NaiveDateTime, start: NaiveTime, end: NaiveTime) -> bool {
    let current = now.time();
    if start > end {
        current >= start || current <= end
    } else {
        start <= current && current <= end
    }
}

/// Configured quiet period, parsed from `HH:MM-HH:MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffpeakRange {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl OffpeakRange {
    #[must_use]
    pub const fn new(start: NaiveTime, end: NaiveTime) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn contains(&self, now: NaiveDateTime) -> bool {
        is_offpeak(now, self.start, self.end)
    }

    /// Parses an optional config value, treating `none` and empty as unset.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is neither unset nor a valid range.
    pub fn parse_setting(value: Option<&str>) -> Result<Option<Self>, ValidationError> {
        match value.map(str::trim) {
            None => Ok(None),
            Some(raw) if raw.is_empty() || raw.eq_ignore_ascii_case(OFFPEAK_DISABLED) => Ok(None),
            Some(raw) => raw.parse().map(Some),
        }
    }
}

impl FromStr for OffpeakRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start_str, end_str) =
            s.split_once('-')
                .ok_or_else(|| ValidationError::InvalidOffpeakFormat {
                    value: s.to_owned(),
                })?;
        Ok(Self::new(parse_time_of_day(start_str)?, parse_time_of_day(end_str)?))
    }
}

impl fmt::Display for OffpeakRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.start.format(TIME_OF_DAY_FORMAT),
            self.end.format(TIME_OF_DAY_FORMAT)
        )
    }
}

fn parse_time_of_day(value: &str) -> Result<NaiveTime, ValidationError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, TIME_OF_DAY_FORMAT).map_err(|err| {
        ValidationError::InvalidTimeOfDay {
            value: value.to_owned(),
            source: err,
        }
    })
}
