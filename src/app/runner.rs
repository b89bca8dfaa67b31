use std::io::Write;
use std::sync::Arc;

use tokio::task::JoinSet;

use super::pipeline::scan_service;
use crate::config::{RunPlan, RunSettings, ScanRequest, build_requests};
use crate::error::{AppError, AppResult};
use crate::sinks::{MetricSink, emit};

/// What happened to the services of one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct RunReport {
    pub emitted: usize,
    pub rejected: usize,
    pub failed: usize,
}

/// Validates the catalog, then scans and emits every valid service.
///
/// # Errors
///
/// Returns an error when the output cannot be opened or written.
pub(crate) async fn run_plan(plan: RunPlan) -> AppResult<RunReport> {
    let RunPlan { settings, services } = plan;
    let (requests, rejected) = build_requests(&services);
    for err in &rejected {
        tracing::error!("Skipping service: {}", err);
    }

    let sink = MetricSink::open(&settings.sink).map_err(AppError::sink)?;
    let (_, mut report) = run_scans(requests, &Arc::new(settings), sink).await?;
    report.rejected = rejected.len();
    Ok(report)
}

/// Runs one task per service and emits each result as soon as it completes.
///
/// # Errors
///
/// Returns an error when metrics cannot be written to `sink`.
pub(crate) async fn run_scans<W: Write>(
    requests: Vec<ScanRequest>,
    settings: &Arc<RunSettings>,
    mut sink: MetricSink<W>,
) -> AppResult<(W, RunReport)> {
    tracing::debug!(
        "Scanning {} service(s) for window {}",
        requests.len(),
        settings.window
    );

    let mut tasks = JoinSet::new();
    for request in requests {
        let settings = Arc::clone(settings);
        tasks.spawn(async move {
            let result = scan_service(&request, &settings).await;
            (request.service_name, result)
        });
    }

    let mut report = RunReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((service, result)) => {
                emit(&mut sink, &settings.host_label, &service, &result)
                    .map_err(AppError::sink)?;
                report.emitted = report.emitted.saturating_add(1);
            }
            Err(err) => {
                tracing::error!("Service scan task failed: {}", err);
                report.failed = report.failed.saturating_add(1);
            }
        }
    }

    let writer = sink.finish().map_err(AppError::sink)?;
    Ok((writer, report))
}
