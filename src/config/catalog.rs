use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use regex::Regex;

use super::types::ServiceConfig;
use crate::error::{ConfigError, ValidationError};
use crate::scan::LineMatcher;
use crate::window::OffpeakRange;

/// Shared nginx log scanned by the built-in catalog.
const BUILTIN_LOG_PATH: &str = "/var/log/nginx/apipostdata.log";

/// A validated, ready-to-scan catalog entry.
#[derive(Debug, Clone)]
pub struct ScanRequest {
    pub service_name: String,
    pub log_path: PathBuf,
    pub matcher: Arc<LineMatcher>,
    pub offpeak: Option<OffpeakRange>,
}

impl ScanRequest {
    /// Compiles patterns and parses the off-peak range of one service.
    ///
    /// An empty `total_pattern` is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the name or log path is empty, a pattern does
    /// not compile, or the off-peak range is malformed.
    pub fn from_config(service: &ServiceConfig) -> Result<Self, ConfigError> {
        let name = service.name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyServiceName);
        }
        if service.log_path.trim().is_empty() {
            return Err(ConfigError::EmptyLogPath {
                service: name.to_owned(),
            });
        }

        let total = service
            .total_pattern
            .as_deref()
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| compile_pattern(name, "total_pattern", pattern))
            .transpose()?;
        let success = compile_pattern(name, "success_pattern", &service.success_pattern)?;
        let matcher =
            LineMatcher::new(total, success).map_err(|err| ConfigError::InvalidPattern {
                service: name.to_owned(),
                field: "timestamp pattern",
                source: err,
            })?;
        let offpeak = OffpeakRange::parse_setting(service.offpeak_time.as_deref()).map_err(
            |err| ConfigError::InvalidOffpeak {
                service: name.to_owned(),
                source: err,
            },
        )?;

        Ok(Self {
            service_name: name.to_owned(),
            log_path: PathBuf::from(service.log_path.trim()),
            matcher: Arc::new(matcher),
            offpeak,
        })
    }
}

fn compile_pattern(service: &str, field: &'static str, pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|err| ConfigError::InvalidPattern {
        service: service.to_owned(),
        field,
        source: err,
    })
}

/// Validates every service; invalid entries are returned separately so the
/// remaining services still run.
#[must_use]
pub fn build_requests(services: &[ServiceConfig]) -> (Vec<ScanRequest>, Vec<ConfigError>) {
    let mut seen = BTreeSet::new();
    let mut requests = Vec::with_capacity(services.len());
    let mut rejected = Vec::new();
    for service in services {
        match ScanRequest::from_config(service) {
            Ok(request) if !seen.insert(request.service_name.clone()) => {
                rejected.push(ConfigError::DuplicateService {
                    service: request.service_name,
                });
            }
            Ok(request) => requests.push(request),
            Err(err) => rejected.push(err),
        }
    }
    (requests, rejected)
}

/// Restricts the catalog to `names`; an empty list keeps every service.
///
/// # Errors
///
/// Returns an error naming the first requested service not in the catalog.
pub fn select_services(
    services: Vec<ServiceConfig>,
    names: &[String],
) -> Result<Vec<ServiceConfig>, ValidationError> {
    if names.is_empty() {
        return Ok(services);
    }
    if let Some(unknown) = names
        .iter()
        .find(|name| !services.iter().any(|service| service.name.trim() == name.as_str()))
    {
        return Err(ValidationError::UnknownService {
            name: unknown.clone(),
        });
    }
    Ok(services
        .into_iter()
        .filter(|service| names.iter().any(|name| name == service.name.trim()))
        .collect())
}

/// Catalog used when no config file is present.
#[must_use]
pub fn builtin_services() -> Vec<ServiceConfig> {
    let entry = |name: &str, success: &str, total: &str, offpeak: Option<&str>| ServiceConfig {
        name: name.to_owned(),
        log_path: BUILTIN_LOG_PATH.to_owned(),
        success_pattern: success.to_owned(),
        total_pattern: Some(total.to_owned()),
        offpeak_time: offpeak.map(str::to_owned),
    };
    vec![
        entry("recovery", "AmountCharging 200", "AmountCharging", None),
        entry("lending", "EvdGenericRequest 200", "EvdGenericRequest", None),
        entry("sms", "SendSms 200", "SendSms", None),
        entry("auto", "notify.+200", "notify", Some("00:00-09:00")),
    ]
}
