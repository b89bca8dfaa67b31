use std::sync::Arc;
use std::time::Duration;

use crate::config::{RunSettings, ScanRequest};
use crate::metrics::{MetricResult, aggregate};
use crate::scan::{LineMatcher, SourceCounts};
use crate::source::{LogSource, scan_source};
use crate::window::TimeWindow;

/// Scans the archive and live file of one service concurrently and reduces
/// both to metrics. Unreadable sources count as empty.
pub(crate) async fn scan_service(request: &ScanRequest, settings: &RunSettings) -> MetricResult {
    let archive = LogSource::archive(
        request.log_path.clone(),
        settings.day_stamp.clone(),
        settings.archive_ext.clone(),
    );
    let live = LogSource::live(request.log_path.clone());

    let (archive_counts, live_counts) = tokio::join!(
        scan_or_empty(
            &request.service_name,
            archive,
            Arc::clone(&request.matcher),
            settings.window.clone(),
            settings.read_timeout,
        ),
        scan_or_empty(
            &request.service_name,
            live,
            Arc::clone(&request.matcher),
            settings.window.clone(),
            settings.read_timeout,
        ),
    );

    aggregate(
        [archive_counts, live_counts],
        request.offpeak.as_ref(),
        settings.now,
    )
}

async fn scan_or_empty(
    service: &str,
    source: LogSource,
    matcher: Arc<LineMatcher>,
    window: TimeWindow,
    timeout: Duration,
) -> SourceCounts {
    let kind = source.kind();
    match scan_source(source, matcher, window, timeout).await {
        Ok(counts) => {
            tracing::debug!(
                "{} {} source: {} total, {} success",
                service,
                kind.label(),
                counts.total,
                counts.success
            );
            counts
        }
        Err(err) => {
            tracing::warn!(
                "{} {} source unavailable, counting as empty: {}",
                service,
                kind.label(),
                err
            );
            SourceCounts::new()
        }
    }
}
