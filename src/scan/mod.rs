//! Line classification and per-source counting.
mod classify;
mod counts;


pub use classify::{LineMatcher, LineRecord, TIMESTAMP_PATTERN, classify};
pub use counts::SourceCounts;
