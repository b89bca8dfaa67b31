//! Service catalog and run configuration.
pub(crate) mod apply;
mod catalog;
mod loader;
mod parse;
pub mod types;

#[cfg(test)]
mod tests;

pub use apply::{RunPlan, RunSettings, apply_config};
pub use catalog::{ScanRequest, build_requests, builtin_services, select_services};
pub use loader::load_config;

#[cfg(test)]
pub(crate) use loader::load_config_file;
pub(crate) use parse::{parse_duration_value, parse_now};
