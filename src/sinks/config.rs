use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SinkFormat {
    /// `<host> <service>.<metric> <value>` lines for `zabbix_sender -i`
    #[default]
    Zabbix,
    /// Prometheus text exposition gauges
    Prometheus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SinkTarget {
    #[default]
    Stdout,
    File(PathBuf),
}

impl SinkTarget {
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Stdout => "stdout".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SinkConfig {
    pub format: SinkFormat,
    pub target: SinkTarget,
}
