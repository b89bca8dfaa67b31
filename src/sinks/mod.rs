//! Metric emission in Zabbix sender or Prometheus text format.
pub mod config;
mod format;
mod writers;


pub use config::{SinkConfig, SinkFormat, SinkTarget};
pub use format::{METRIC_NAMES, ServiceMetrics, format_prometheus, format_zabbix};
pub use writers::{MetricSink, emit};
