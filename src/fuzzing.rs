use std::time::Duration;

use chrono::NaiveDateTime;
use clap::Parser;

use crate::args::ScanArgs;
use crate::config::types::ConfigFile;
use crate::config::{apply_config, build_requests, parse_duration_value, parse_now};
use crate::error::{AppError, AppResult, ValidationError};
use crate::scan::{LineMatcher, LineRecord, SourceCounts};
use crate::window::{OffpeakRange, TimeWindow, resolve_window};

thread_local! {
    static SMS_MATCHER: Option<LineMatcher> = LineMatcher::compile(Some("SendSms"), "SendSms 200").ok();
}

const FUZZ_NOW: &str = "2024-01-01T10:01:30";

fn fixed_now() -> Result<NaiveDateTime, ValidationError> {
    parse_now(FUZZ_NOW)
}

fn fixed_window() -> Option<TimeWindow> {
    fixed_now().ok().map(resolve_window)
}

/// Classifies one line against the `SendSms` patterns for the
/// `01/Jan/2024:10:00` window.
#[must_use]
pub fn classify_line_input(line: &str) -> Option<LineRecord> {
    let window = fixed_window()?;
    SMS_MATCHER.with(|matcher| {
        matcher
            .as_ref()
            .and_then(|matcher| matcher.classify(line, &window))
    })
}

/// Counts every line of `text` the way a source scan does.
#[must_use]
pub fn count_lines_input(text: &str) -> SourceCounts {
    let mut counts = SourceCounts::new();
    let Some(window) = fixed_window() else {
        return counts;
    };
    SMS_MATCHER.with(|matcher| {
        if let Some(matcher) = matcher.as_ref() {
            for line in text.lines() {
                counts.observe(line, matcher, &window);
            }
        }
    });
    counts
}

/// Parses an off-peak setting (`HH:MM-HH:MM` or `none`).
///
/// # Errors
///
/// Returns an error when the range is malformed.
pub fn parse_offpeak_input(input: &str) -> AppResult<Option<OffpeakRange>> {
    OffpeakRange::parse_setting(Some(input)).map_err(AppError::from)
}

/// Parses a duration value from config.
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_value_input(input: &str) -> AppResult<Duration> {
    parse_duration_value(input).map_err(AppError::from)
}

/// Parses TOML config, applies it to default arguments and validates the
/// catalog. Returns the number of services that would be scanned.
///
/// # Errors
///
/// Returns an error when parsing or run-wide validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<usize> {
    let config: ConfigFile = toml::from_str(input)?;
    apply_config_to_defaults(config)
}

/// Parses JSON config, applies it to default arguments and validates the
/// catalog. Returns the number of services that would be scanned.
///
/// # Errors
///
/// Returns an error when parsing or run-wide validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<usize> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    apply_config_to_defaults(config)
}

fn apply_config_to_defaults(config: ConfigFile) -> AppResult<usize> {
    let args = ScanArgs::try_parse_from(["logpulse"])?;
    let now = fixed_now()?;
    let plan = apply_config(&args, Some(config), now)?;
    let (requests, _rejected) = build_requests(&plan.services);
    Ok(requests.len())
}
