use std::time::Duration;

use serde::Deserialize;

use crate::error::ValidationError;
use crate::sinks::SinkFormat;

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(alias = "zabbix_hostname")]
    pub host_label: Option<String>,
    pub archive_ext: Option<String>,
    pub read_timeout: Option<DurationValue>,
    pub output: Option<String>,
    pub format: Option<SinkFormat>,
    pub services: Option<Vec<ServiceConfig>>,
}

/// One catalog entry as written in the config file.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    #[serde(alias = "service_name")]
    pub name: String,
    #[serde(alias = "log_file")]
    pub log_path: String,
    pub success_pattern: String,
    pub total_pattern: Option<String>,
    pub offpeak_time: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> Result<Duration, ValidationError> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    Err(ValidationError::DurationZero)
                } else {
                    Ok(Duration::from_secs(*secs))
                }
            }
            DurationValue::Text(text) => super::parse_duration_value(text),
        }
    }
}
