use std::time::Duration;

/// Config filenames checked when `--config` is not given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["logpulse.toml", "logpulse.json"];
/// Host the metrics are reported under in the monitoring server.
pub const DEFAULT_HOST_LABEL: &str = "api-host";
/// Upper bound for reading one log source.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);
