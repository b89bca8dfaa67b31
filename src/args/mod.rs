//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;

#[cfg(test)]
mod tests;

pub use cli::ScanArgs;
pub use defaults::{DEFAULT_CONFIG_FILES, DEFAULT_HOST_LABEL, DEFAULT_READ_TIMEOUT};
