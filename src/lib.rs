//! Core library for the `logpulse` CLI.
//!
//! `logpulse` scans a service's live access log together with the same-day
//! rotated archive, counts the requests of the previous full minute, and
//! reduces them to success rate, failure rate, request totals and peak
//! requests per second. This crate exposes the building blocks used by the
//! binary: window resolution, log sources, line classification,
//! aggregation, configuration and metric sinks.
pub mod args;
pub mod config;
pub mod error;
pub mod metrics;
pub mod scan;
pub mod sinks;
pub mod source;
pub mod window;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
