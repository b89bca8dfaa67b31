use super::*;
use crate::args::{DEFAULT_HOST_LABEL, DEFAULT_READ_TIMEOUT, ScanArgs};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};
use crate::sinks::{SinkFormat, SinkTarget};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::tempdir;
use types::{ConfigFile, ServiceConfig};

fn test_now() -> AppResult<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|date| date.and_hms_opt(10, 1, 30))
        .ok_or_else(|| AppError::validation("Invalid test timestamp"))
}

fn parse_args(args: &[&str]) -> AppResult<ScanArgs> {
    let mut argv = vec!["logpulse"];
    argv.extend_from_slice(args);
    Ok(ScanArgs::try_parse_from(argv)?)
}

fn service(name: &str, success: &str, total: Option<&str>, offpeak: Option<&str>) -> ServiceConfig {
    ServiceConfig {
        name: name.to_owned(),
        log_path: format!("/tmp/{}.log", name),
        success_pattern: success.to_owned(),
        total_pattern: total.map(str::to_owned),
        offpeak_time: offpeak.map(str::to_owned),
    }
}

#[test]
fn load_toml_config_with_aliases() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("logpulse.toml");
    std::fs::write(
        &path,
        r#"
zabbix_hostname = "edge-7"
archive_ext = "gz"
read_timeout = "2s"
format = "prometheus"

[[services]]
service_name = "sms"
log_file = "/var/log/nginx/sms.log"
success_pattern = "SendSms 200"
total_pattern = "SendSms"

[[services]]
name = "auto"
log_path = "/var/log/nginx/auto.log"
success_pattern = "notify.+200"
offpeak_time = "00:00-09:00"
"#,
    )?;

    let config = load_config_file(&path)?;
    let services = config.services.clone().unwrap_or_default();

    let checks = [
        (config.host_label.as_deref() == Some("edge-7"), "Unexpected host_label"),
        (config.archive_ext.as_deref() == Some("gz"), "Unexpected archive_ext"),
        (
            matches!(config.read_timeout.as_ref().map(|value| value.to_duration()), Some(Ok(d)) if d == Duration::from_secs(2)),
            "Unexpected read_timeout",
        ),
        (config.format == Some(SinkFormat::Prometheus), "Unexpected format"),
        (services.len() == 2, "Expected two services"),
        (
            services.first().map(|s| s.log_path.as_str()) == Some("/var/log/nginx/sms.log"),
            "Expected log_file alias to populate log_path",
        ),
        (
            services.get(1).and_then(|s| s.offpeak_time.as_deref()) == Some("00:00-09:00"),
            "Unexpected offpeak_time",
        ),
        (
            services.get(1).is_some_and(|s| s.total_pattern.is_none()),
            "Expected missing total_pattern",
        ),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }
    Ok(())
}

#[test]
fn load_json_config() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("logpulse.json");
    std::fs::write(
        &path,
        r#"{
  "host_label": "api-host",
  "read_timeout": 5,
  "services": [
    { "name": "lending", "log_path": "/var/log/lending.log", "success_pattern": "EvdGenericRequest 200" }
  ]
}"#,
    )?;

    let config = load_config(Some(&path.display().to_string()))?
        .ok_or_else(|| AppError::validation("Expected a config"))?;
    let timeout = config
        .read_timeout
        .as_ref()
        .map(|value| value.to_duration())
        .transpose()?;
    if timeout != Some(Duration::from_secs(5)) {
        return Err(AppError::validation(format!("Unexpected timeout {:?}", timeout)));
    }
    match config.services.as_deref() {
        Some([only]) if only.name == "lending" => Ok(()),
        other => Err(AppError::validation(format!("Unexpected services {:?}", other))),
    }
}

#[test]
fn load_config_rejects_unknown_extension() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("logpulse.yaml");
    std::fs::write(&path, "host_label: x")?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected unsupported extension, got {:?}",
            other.map(|_| ())
        ))),
    }
}

#[test]
fn load_config_reports_parse_errors() -> AppResult<()> {
    let dir = tempdir()?;
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "services = [[")?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::ParseToml { .. })) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected TOML parse error, got {:?}",
            other.map(|_| ())
        ))),
    }
}

#[test]
fn apply_config_uses_defaults_and_builtin_catalog() -> AppResult<()> {
    let args = parse_args(&[])?;
    let plan = apply_config(&args, None, test_now()?)?;
    let names: Vec<&str> = plan.services.iter().map(|s| s.name.as_str()).collect();

    let checks = [
        (plan.settings.host_label == DEFAULT_HOST_LABEL, "Unexpected host label"),
        (plan.settings.archive_ext == "gz", "Unexpected archive ext"),
        (plan.settings.read_timeout == DEFAULT_READ_TIMEOUT, "Unexpected timeout"),
        (plan.settings.sink.format == SinkFormat::Zabbix, "Unexpected format"),
        (plan.settings.sink.target == SinkTarget::Stdout, "Unexpected target"),
        (plan.settings.window.as_str() == "01/Jan/2024:10:00", "Unexpected window"),
        (plan.settings.day_stamp == "20240101", "Unexpected day stamp"),
        (names == ["recovery", "lending", "sms", "auto"], "Unexpected catalog"),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }
    Ok(())
}

#[test]
fn apply_config_prefers_cli_over_file() -> AppResult<()> {
    let args = parse_args(&[
        "--host-label",
        "cli-host",
        "--now",
        "2024-03-05T00:00:10",
        "--read-timeout",
        "250ms",
        "--output",
        "/tmp/out.prom",
    ])?;
    let config = ConfigFile {
        host_label: Some("file-host".to_owned()),
        archive_ext: Some("log.gz".to_owned()),
        read_timeout: Some(types::DurationValue::Seconds(9)),
        output: Some("-".to_owned()),
        format: Some(SinkFormat::Prometheus),
        services: Some(vec![service("sms", "SendSms 200", Some("SendSms"), None)]),
    };
    let plan = apply_config(&args, Some(config), test_now()?)?;

    let checks = [
        (plan.settings.host_label == "cli-host", "CLI host label should win"),
        (plan.settings.archive_ext == "log.gz", "File archive ext should apply"),
        (
            plan.settings.read_timeout == Duration::from_millis(250),
            "CLI timeout should win",
        ),
        (
            plan.settings.sink.target == SinkTarget::File(PathBuf::from("/tmp/out.prom")),
            "CLI output should win",
        ),
        (
            plan.settings.sink.format == SinkFormat::Prometheus,
            "File format should apply",
        ),
        (
            plan.settings.window.as_str() == "04/Mar/2024:23:59",
            "Window should come from --now",
        ),
        (plan.settings.day_stamp == "20240305", "Day stamp should come from --now"),
        (plan.services.len() == 1, "Expected the file catalog"),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }
    Ok(())
}

#[test]
fn apply_config_rejects_empty_catalog() -> AppResult<()> {
    let args = parse_args(&[])?;
    let config = ConfigFile {
        services: Some(Vec::new()),
        ..ConfigFile::default()
    };
    match apply_config(&args, Some(config), test_now()?) {
        Err(AppError::Config(ConfigError::EmptyCatalog)) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected empty catalog error, got {:?}",
            other.map(|_| ())
        ))),
    }
}

#[test]
fn apply_config_rejects_zero_timeout_in_file() -> AppResult<()> {
    let args = parse_args(&[])?;
    let config = ConfigFile {
        read_timeout: Some(types::DurationValue::Seconds(0)),
        ..ConfigFile::default()
    };
    match apply_config(&args, Some(config), test_now()?) {
        Err(AppError::Config(ConfigError::InvalidReadTimeout { .. })) => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected timeout error, got {:?}",
            other.map(|_| ())
        ))),
    }
}

#[test]
fn select_services_filters_and_rejects_unknown() -> AppResult<()> {
    let selected = select_services(builtin_services(), &["sms".to_owned()])?;
    if selected.len() != 1 || selected.first().map(|s| s.name.as_str()) != Some("sms") {
        return Err(AppError::validation("Expected only sms"));
    }

    match select_services(builtin_services(), &["payroll".to_owned()]) {
        Err(ValidationError::UnknownService { name }) if name == "payroll" => Ok(()),
        other => Err(AppError::validation(format!(
            "Expected unknown service, got {:?}",
            other.map(|list| list.len())
        ))),
    }
}

#[test]
fn build_requests_keeps_valid_services() -> AppResult<()> {
    let services = vec![
        service("good", "Ok 200", Some("Ok"), Some("23:00-02:00")),
        service("bad-regex", "Ok (200", None, None),
        service("bad-offpeak", "Ok 200", None, Some("9am-5pm")),
        service("good", "Ok 200", None, None),
        service("empty-total", "Ok 200", Some(""), Some("none")),
    ];
    let (requests, rejected) = build_requests(&services);

    let names: Vec<&str> = requests.iter().map(|r| r.service_name.as_str()).collect();
    let good_offpeak = requests
        .first()
        .and_then(|r| r.offpeak)
        .map(|range| range.to_string());
    let empty_total = requests.get(1);

    let checks = [
        (names == ["good", "empty-total"], "Unexpected accepted services"),
        (good_offpeak.as_deref() == Some("23:00-02:00"), "Unexpected off-peak"),
        (
            empty_total.is_some_and(|r| r.offpeak.is_none()),
            "Expected 'none' to disable off-peak",
        ),
        (rejected.len() == 3, "Expected three rejected services"),
        (
            rejected.iter().any(|err| matches!(err, ConfigError::InvalidPattern { service, .. } if service == "bad-regex")),
            "Expected invalid pattern error",
        ),
        (
            rejected.iter().any(|err| matches!(err, ConfigError::InvalidOffpeak { service, .. } if service == "bad-offpeak")),
            "Expected invalid off-peak error",
        ),
        (
            rejected.iter().any(|err| matches!(err, ConfigError::DuplicateService { service } if service == "good")),
            "Expected duplicate service error",
        ),
    ];

    for (ok, msg) in checks {
        if !ok {
            return Err(AppError::validation(msg));
        }
    }
    Ok(())
}

#[test]
fn empty_total_pattern_counts_every_window_line() -> AppResult<()> {
    let request = ScanRequest::from_config(&service("any", "200", Some(""), None))?;
    let window = crate::window::resolve_window(test_now()?);
    let line = r#"10.0.0.1 - - [01/Jan/2024:10:00:59 +0700] "GET /other HTTP/1.1" 500"#;
    match request.matcher.classify(line, &window) {
        Some(record) if record.is_total && !record.is_success => Ok(()),
        other => Err(AppError::validation(format!("Unexpected record {:?}", other))),
    }
}

#[test]
fn builtin_catalog_entries_compile() -> AppResult<()> {
    let (requests, rejected) = build_requests(&builtin_services());
    if !rejected.is_empty() {
        return Err(AppError::validation(format!("Rejected: {:?}", rejected)));
    }
    let auto = requests
        .iter()
        .find(|r| r.service_name == "auto")
        .and_then(|r| r.offpeak)
        .map(|range| range.to_string());
    if auto.as_deref() != Some("00:00-09:00") {
        return Err(AppError::validation("Expected auto off-peak 00:00-09:00"));
    }
    Ok(())
}

#[test]
fn parse_duration_value_units() -> AppResult<()> {
    let cases = [
        ("1500ms", Duration::from_millis(1500)),
        ("5", Duration::from_secs(5)),
        ("2m", Duration::from_secs(120)),
        ("1h", Duration::from_secs(3600)),
    ];
    for (input, expected) in cases {
        let parsed = parse_duration_value(input)?;
        if parsed != expected {
            return Err(AppError::validation(format!("{} parsed as {:?}", input, parsed)));
        }
    }
    for input in ["", "ms", "0s", "3d"] {
        if parse_duration_value(input).is_ok() {
            return Err(AppError::validation(format!("Expected {:?} to fail", input)));
        }
    }
    Ok(())
}
