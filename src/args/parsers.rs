use std::time::Duration;

use chrono::NaiveDateTime;

use crate::config::{parse_duration_value, parse_now};
use crate::error::ValidationError;

pub(crate) fn parse_duration_arg(s: &str) -> Result<Duration, ValidationError> {
    parse_duration_value(s)
}

pub(crate) fn parse_now_arg(s: &str) -> Result<NaiveDateTime, ValidationError> {
    parse_now(s)
}
