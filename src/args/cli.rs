use chrono::NaiveDateTime;
use clap::Parser;
use std::time::Duration;

use crate::sinks::SinkFormat;

use super::parsers::{parse_duration_arg, parse_now_arg};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Per-service success rate, failure rate and peak TPS from rotating access logs, emitted as Zabbix sender lines."
)]
pub struct ScanArgs {
    /// Path to config file (TOML/JSON). Defaults to ./logpulse.toml or ./logpulse.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Host name the metrics are reported under
    #[arg(long = "host-label", env = "LOGPULSE_HOST_LABEL")]
    pub host_label: Option<String>,

    /// Only scan the named service (repeatable)
    #[arg(long = "service", short = 's')]
    pub services: Vec<String>,

    /// Evaluate as if the local clock read this time (YYYY-MM-DDTHH:MM:SS)
    #[arg(long, value_parser = parse_now_arg)]
    pub now: Option<NaiveDateTime>,

    /// Extension of the same-day rotated archive (default: gz)
    #[arg(long = "archive-ext")]
    pub archive_ext: Option<String>,

    /// Give up on a log source after this long (supports ms/s/m/h, default: 30s)
    #[arg(long = "read-timeout", value_parser = parse_duration_arg)]
    pub read_timeout: Option<Duration>,

    /// Write metrics to this file instead of stdout ('-' for stdout)
    #[arg(long, short = 'o')]
    pub output: Option<String>,

    /// Metric output format
    #[arg(long, value_enum, ignore_case = true)]
    pub format: Option<SinkFormat>,

    /// Enable verbose logging (sets log level to debug unless overridden by LOGPULSE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color in diagnostic output
    #[arg(long = "no-color")]
    pub no_color: bool,
}
