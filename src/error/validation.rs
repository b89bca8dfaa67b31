use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid off-peak range '{value}'. Expected 'HH:MM-HH:MM'.")]
    InvalidOffpeakFormat { value: String },
    #[error("Invalid time of day '{value}': {source}")]
    InvalidTimeOfDay {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Invalid timestamp '{value}'. Expected 'YYYY-MM-DDTHH:MM:SS': {source}")]
    InvalidNow {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("Unknown service '{name}'.")]
    UnknownService { name: String },
    #[error("Duration must not be empty.")]
    DurationEmpty,
    #[error("Invalid duration '{value}'.")]
    InvalidDurationFormat { value: String },
    #[error("Invalid duration '{value}': {source}")]
    InvalidDurationNumber {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("Duration overflow.")]
    DurationOverflow,
    #[error("Invalid duration unit '{unit}'.")]
    InvalidDurationUnit { unit: String },
    #[error("Duration must be > 0.")]
    DurationZero,
    #[cfg(test)]
    #[error("Test expectation failed: {message}")]
    TestExpectation { message: &'static str },
    #[cfg(test)]
    #[error("Test expectation failed: {message}: {value}")]
    TestExpectationValue {
        message: &'static str,
        value: String,
    },
}
