use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDateTime;

use super::catalog::{builtin_services, select_services};
use super::types::{ConfigFile, ServiceConfig};
use crate::args::{DEFAULT_HOST_LABEL, DEFAULT_READ_TIMEOUT, ScanArgs};
use crate::error::{AppError, AppResult, ConfigError};
use crate::sinks::{SinkConfig, SinkTarget};
use crate::source::DEFAULT_ARCHIVE_EXT;
use crate::window::{TimeWindow, day_stamp, resolve_window};

/// Output path meaning "write to stdout".
const STDOUT_OUTPUT: &str = "-";

/// Values shared by every scan of one run.
///
/// `now` is captured once; the window and day stamp are derived from it so
/// concurrent scans never disagree about the minute being measured.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub host_label: String,
    pub now: NaiveDateTime,
    pub window: TimeWindow,
    pub day_stamp: String,
    pub archive_ext: String,
    pub read_timeout: Duration,
    pub sink: SinkConfig,
}

impl RunSettings {
    #[must_use]
    pub fn new(
        host_label: String,
        now: NaiveDateTime,
        archive_ext: String,
        read_timeout: Duration,
        sink: SinkConfig,
    ) -> Self {
        Self {
            host_label,
            now,
            window: resolve_window(now),
            day_stamp: day_stamp(now),
            archive_ext,
            read_timeout,
            sink,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunPlan {
    pub settings: RunSettings,
    pub services: Vec<ServiceConfig>,
}

/// Merges CLI arguments over the config file over built-in defaults.
///
/// `clock_now` is used unless `--now` was given.
///
/// # Errors
///
/// Returns an error when a run-wide setting is invalid, the config lists no
/// services, or `--service` names an unknown service.
pub fn apply_config(
    args: &ScanArgs,
    config: Option<ConfigFile>,
    clock_now: NaiveDateTime,
) -> AppResult<RunPlan> {
    let config = config.unwrap_or_default();

    let host_label = args
        .host_label
        .clone()
        .or(config.host_label)
        .unwrap_or_else(|| DEFAULT_HOST_LABEL.to_owned());

    let archive_ext = args
        .archive_ext
        .clone()
        .or(config.archive_ext)
        .unwrap_or_else(|| DEFAULT_ARCHIVE_EXT.to_owned());
    if archive_ext.trim_start_matches('.').trim().is_empty() {
        return Err(AppError::config(ConfigError::EmptyArchiveExt));
    }

    let read_timeout = match args.read_timeout {
        Some(timeout) => timeout,
        None => config
            .read_timeout
            .as_ref()
            .map(|value| value.to_duration())
            .transpose()
            .map_err(|err| AppError::config(ConfigError::InvalidReadTimeout { source: err }))?
            .unwrap_or(DEFAULT_READ_TIMEOUT),
    };

    let target = args
        .output
        .clone()
        .or(config.output)
        .filter(|output| output != STDOUT_OUTPUT)
        .map_or(SinkTarget::Stdout, |output| SinkTarget::File(PathBuf::from(output)));
    let sink = SinkConfig {
        format: args.format.or(config.format).unwrap_or_default(),
        target,
    };

    let services = match config.services {
        Some(services) if services.is_empty() => {
            return Err(AppError::config(ConfigError::EmptyCatalog));
        }
        Some(services) => services,
        None => {
            tracing::debug!("No services configured; using the built-in catalog.");
            builtin_services()
        }
    };
    let services = select_services(services, &args.services)?;

    let now = args.now.unwrap_or(clock_now);
    Ok(RunPlan {
        settings: RunSettings::new(host_label, now, archive_ext, read_timeout, sink),
        services,
    })
}
