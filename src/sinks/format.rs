use std::fmt::Write as _;

use crate::error::SinkError;
use crate::metrics::MetricResult;

/// Metric suffixes in emission order. Downstream item keys depend on them.
pub const METRIC_NAMES: [&str; 6] = [
    "success.rate",
    "success.request",
    "total.request",
    "failed.request",
    "failed.rate",
    "tps.rate",
];

const PROMETHEUS_PREFIX: &str = "logpulse";

const PROMETHEUS_HELP: [&str; 6] = [
    "Share of in-window requests matching the success pattern (percentage).",
    "In-window requests matching the success pattern.",
    "In-window requests matching the total pattern.",
    "In-window requests matching the total but not the success pattern.",
    "Share of in-window requests that failed (percentage).",
    "Peak number of requests logged within a single second.",
];

/// One service's metrics held for grouped output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceMetrics {
    pub host_label: String,
    pub service: String,
    pub result: MetricResult,
}

pub(super) fn write_line(output: &mut String, line: &str) -> Result<(), SinkError> {
    writeln!(output, "{}", line).map_err(|err| SinkError::WriteLine { source: err })
}

fn metric_values(result: &MetricResult) -> [String; 6] {
    [
        result.success_rate.to_string(),
        result.success_total.to_string(),
        result.total_total.to_string(),
        result.failure_total.to_string(),
        result.failure_rate.to_string(),
        result.max_tps.to_string(),
    ]
}

/// Renders the six Zabbix sender lines of one service.
///
/// # Errors
///
/// Returns an error if formatting into the output buffer fails.
pub fn format_zabbix(
    host_label: &str,
    service: &str,
    result: &MetricResult,
) -> Result<String, SinkError> {
    let mut output = String::new();
    for (name, value) in METRIC_NAMES.iter().zip(metric_values(result)) {
        write_line(
            &mut output,
            &format!("{} {}.{} {}", host_label, service, name, value),
        )?;
    }
    Ok(output)
}

/// Renders a full Prometheus exposition for all scanned services.
///
/// Samples are grouped by metric family as the text format requires.
///
/// # Errors
///
/// Returns an error if formatting into the output buffer fails.
pub fn format_prometheus(samples: &[ServiceMetrics]) -> Result<String, SinkError> {
    let mut output = String::new();
    let rendered: Vec<(&ServiceMetrics, [String; 6])> = samples
        .iter()
        .map(|sample| (sample, metric_values(&sample.result)))
        .collect();

    for (index, (name, help)) in METRIC_NAMES.iter().zip(PROMETHEUS_HELP).enumerate() {
        let family = format!("{}_{}", PROMETHEUS_PREFIX, name.replace('.', "_"));
        write_line(&mut output, &format!("# HELP {} {}", family, help))?;
        write_line(&mut output, &format!("# TYPE {} gauge", family))?;
        for (sample, values) in &rendered {
            let Some(value) = values.get(index) else {
                continue;
            };
            write_line(
                &mut output,
                &format!(
                    "{}{{host=\"{}\",service=\"{}\"}} {}",
                    family,
                    escape_label(&sample.host_label),
                    escape_label(&sample.service),
                    value
                ),
            )?;
        }
    }
    Ok(output)
}

fn escape_label(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}
