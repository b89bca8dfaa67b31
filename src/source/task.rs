use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{LogLines, archive_path, read_archive_lines, read_live_lines};
use crate::error::SourceError;
use crate::scan::{LineMatcher, SourceCounts};
use crate::window::TimeWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Archive,
    Live,
}

impl SourceKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Live => "live",
        }
    }
}

/// One of the two inputs of a scan.
#[derive(Debug, Clone)]
pub struct LogSource {
    kind: SourceKind,
    log_path: PathBuf,
    day_stamp: String,
    archive_ext: String,
}

impl LogSource {
    #[must_use]
    pub const fn live(log_path: PathBuf) -> Self {
        Self {
            kind: SourceKind::Live,
            log_path,
            day_stamp: String::new(),
            archive_ext: String::new(),
        }
    }

    #[must_use]
    pub const fn archive(log_path: PathBuf, day_stamp: String, archive_ext: String) -> Self {
        Self {
            kind: SourceKind::Archive,
            log_path,
            day_stamp,
            archive_ext,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> SourceKind {
        self.kind
    }

    /// File actually read for this source.
    #[must_use]
    pub fn path(&self) -> PathBuf {
        match self.kind {
            SourceKind::Live => self.log_path.clone(),
            SourceKind::Archive => archive_path(&self.log_path, &self.day_stamp, &self.archive_ext),
        }
    }

    /// Opens the source for reading.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing file cannot be opened.
    pub fn open(&self) -> Result<LogLines, SourceError> {
        match self.kind {
            SourceKind::Live => read_live_lines(&self.log_path),
            SourceKind::Archive => {
                read_archive_lines(&self.log_path, &self.day_stamp, &self.archive_ext)
            }
        }
    }
}

/// Classifies every line of `lines`, stopping early once `cancel` is set.
///
/// # Errors
///
/// Returns the first read or decompression error; counts gathered before it
/// are discarded.
pub fn scan_lines(
    lines: LogLines,
    matcher: &LineMatcher,
    window: &TimeWindow,
    cancel: &AtomicBool,
) -> Result<SourceCounts, SourceError> {
    let mut counts = SourceCounts::new();
    for line in lines {
        if cancel.load(Ordering::Relaxed) {
            break;
        }
        counts.observe(&line?, matcher, window);
    }
    Ok(counts)
}

/// Reads and classifies one source on a blocking thread within `timeout`.
///
/// # Errors
///
/// Returns an error when the source cannot be read, fails to decompress,
/// does not finish within `timeout`, or the scan task panics.
pub async fn scan_source(
    source: LogSource,
    matcher: Arc<LineMatcher>,
    window: TimeWindow,
    timeout: Duration,
) -> Result<SourceCounts, SourceError> {
    let path = source.path();
    let cancel = Arc::new(AtomicBool::new(false));
    let task_cancel = Arc::clone(&cancel);

    let handle = tokio::task::spawn_blocking(move || {
        let lines = source.open()?;
        scan_lines(lines, &matcher, &window, &task_cancel)
    });

    match tokio::time::timeout(timeout, handle).await {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => Err(SourceError::Join { path, source: err }),
        Err(_elapsed) => {
            cancel.store(true, Ordering::Relaxed);
            Err(SourceError::Timeout { path, timeout })
        }
    }
}
