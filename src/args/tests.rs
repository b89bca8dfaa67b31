use super::*;
use crate::error::{AppError, AppResult};
use crate::sinks::SinkFormat;
use clap::Parser;
use std::time::Duration;

fn parse_test_args<I, T>(args: I) -> AppResult<ScanArgs>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    ScanArgs::try_parse_from(args).map_err(AppError::from)
}

#[test]
fn parse_args_defaults() -> AppResult<()> {
    let args = parse_test_args(["logpulse"])?;

    let checks = [
        (args.config.is_none(), "Expected config to be None"),
        (args.services.is_empty(), "Expected services to be empty"),
        (args.now.is_none(), "Expected now to be None"),
        (args.archive_ext.is_none(), "Expected archive_ext to be None"),
        (args.read_timeout.is_none(), "Expected read_timeout to be None"),
        (args.output.is_none(), "Expected output to be None"),
        (args.format.is_none(), "Expected format to be None"),
        (!args.verbose, "Expected verbose to be false"),
        (!args.no_color, "Expected no_color to be false"),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }
    Ok(())
}

#[test]
fn parse_args_overrides() -> AppResult<()> {
    let args = parse_test_args([
        "logpulse",
        "--config",
        "/etc/logpulse.toml",
        "--host-label",
        "edge-1",
        "-s",
        "sms",
        "--service",
        "auto",
        "--now",
        "2024-01-01T10:01:30",
        "--archive-ext",
        "log.gz",
        "--read-timeout",
        "1500ms",
        "-o",
        "/tmp/metrics.txt",
        "--format",
        "Prometheus",
        "-v",
        "--no-color",
    ])?;

    let checks = [
        (
            args.config.as_deref() == Some("/etc/logpulse.toml"),
            "Unexpected config",
        ),
        (
            args.host_label.as_deref() == Some("edge-1"),
            "Unexpected host_label",
        ),
        (args.services == ["sms", "auto"], "Unexpected services"),
        (
            args.now.map(|now| now.to_string()).as_deref() == Some("2024-01-01 10:01:30"),
            "Unexpected now",
        ),
        (
            args.archive_ext.as_deref() == Some("log.gz"),
            "Unexpected archive_ext",
        ),
        (
            args.read_timeout == Some(Duration::from_millis(1500)),
            "Unexpected read_timeout",
        ),
        (
            args.output.as_deref() == Some("/tmp/metrics.txt"),
            "Unexpected output",
        ),
        (
            args.format == Some(SinkFormat::Prometheus),
            "Unexpected format",
        ),
        (args.verbose, "Expected verbose"),
        (args.no_color, "Expected no_color"),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }
    Ok(())
}

#[test]
fn parse_args_accepts_space_separated_now() -> AppResult<()> {
    let args = parse_test_args(["logpulse", "--now", "2024-01-01 00:00:05"])?;
    match args.now.map(|now| now.to_string()) {
        Some(value) if value == "2024-01-01 00:00:05" => Ok(()),
        other => Err(AppError::validation(format!("Unexpected now: {:?}", other))),
    }
}

#[test]
fn parse_args_rejects_invalid_values() -> AppResult<()> {
    let invalid = [
        vec!["logpulse", "--now", "yesterday"],
        vec!["logpulse", "--read-timeout", "0s"],
        vec!["logpulse", "--read-timeout", "5 parsecs"],
        vec!["logpulse", "--format", "graphite"],
    ];
    for args in invalid {
        if ScanArgs::try_parse_from(args.clone()).is_ok() {
            return Err(AppError::validation(format!("Expected {:?} to fail", args)));
        }
    }
    Ok(())
}
