use super::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config '{path}': {source}")]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse TOML config '{path}': {source}")]
    ParseToml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to parse JSON config '{path}': {source}")]
    ParseJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Unsupported config extension '{ext}'. Use .toml or .json.")]
    UnsupportedExtension { ext: String },
    #[error("Config file must have .toml or .json extension.")]
    MissingExtension,
    #[error("Config must define at least one service.")]
    EmptyCatalog,
    #[error("Service name must not be empty.")]
    EmptyServiceName,
    #[error("Service '{service}' is defined more than once.")]
    DuplicateService { service: String },
    #[error("Service '{service}' must set log_path.")]
    EmptyLogPath { service: String },
    #[error("Service '{service}' has an invalid {field}: {source}")]
    InvalidPattern {
        service: String,
        field: &'static str,
        #[source]
        source: regex::Error,
    },
    #[error("Service '{service}' has an invalid offpeak_time: {source}")]
    InvalidOffpeak {
        service: String,
        #[source]
        source: ValidationError,
    },
    #[error("Invalid read_timeout: {source}")]
    InvalidReadTimeout {
        #[source]
        source: ValidationError,
    },
    #[error("archive_ext must not be empty.")]
    EmptyArchiveExt,
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
