use regex::Regex;

use crate::window::TimeWindow;

/// Bracket-prefixed access-log timestamp at one-second granularity.
pub const TIMESTAMP_PATTERN: &str =
    r"\[([0-9]{2}/[A-Za-z]{3}/[0-9]{4}:[0-9]{2}:[0-9]{2}:[0-9]{2})";

/// Outcome for a line that passed the window and total filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineRecord {
    pub is_total: bool,
    pub is_success: bool,
    pub timestamp: Option<String>,
}

/// Compiled patterns for one service.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    total: Option<Regex>,
    success: Regex,
    timestamp: Regex,
}

impl LineMatcher {
    /// Builds a matcher from already-compiled service patterns.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp pattern fails to compile.
    pub fn new(total: Option<Regex>, success: Regex) -> Result<Self, regex::Error> {
        Ok(Self {
            total,
            success,
            timestamp: Regex::new(TIMESTAMP_PATTERN)?,
        })
    }

    /// Compiles a matcher from pattern text.
    ///
    /// # Errors
    ///
    /// Returns an error if either pattern is not a valid regular expression.
    pub fn compile(total: Option<&str>, success: &str) -> Result<Self, regex::Error> {
        let total = total.map(Regex::new).transpose()?;
        Self::new(total, Regex::new(success)?)
    }

    #[must_use]
    pub fn classify(&self, line: &str, window: &TimeWindow) -> Option<LineRecord> {
        if !window.matches(line) {
            return None;
        }
        if let Some(total) = self.total.as_ref()
            && !total.is_match(line)
        {
            return None;
        }
        Some(LineRecord {
            is_total: true,
            is_success: self.success.is_match(line),
            timestamp: self.extract_timestamp(line).map(str::to_owned),
        })
    }

    /// First bracketed `DD/Mon/YYYY:HH:MM:SS` in the line, without the bracket.
    #[must_use]
    pub fn extract_timestamp<'line>(&self, line: &'line str) -> Option<&'line str> {
        self.timestamp
            .captures(line)
            .and_then(|captures| captures.get(1))
            .map(|found| found.as_str())
    }
}

#[must_use]
pub fn classify(line: &str, matcher: &LineMatcher, window: &TimeWindow) -> Option<LineRecord> {
    matcher.classify(line, window)
}
