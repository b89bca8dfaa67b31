use super::{LineMatcher, LineRecord};
use crate::window::TimeWindow;

/// Counts gathered from one log source.
///
/// `failure` is never measured on its own: it is kept equal to
/// `total - success` after every update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub success: u64,
    pub failure: u64,
    pub total: u64,
    pub timestamps: Vec<String>,
}

impl SourceCounts {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            success: 0,
            failure: 0,
            total: 0,
            timestamps: Vec::new(),
        }
    }

    pub fn record(&mut self, record: LineRecord) {
        if !record.is_total {
            return;
        }
        self.total = self.total.saturating_add(1);
        if record.is_success {
            self.success = self.success.saturating_add(1);
        }
        self.failure = self.total.saturating_sub(self.success);
        if let Some(timestamp) = record.timestamp {
            self.timestamps.push(timestamp);
        }
    }

    /// Classifies one raw line and records it when it is in scope.
    pub fn observe(&mut self, line: &str, matcher: &LineMatcher, window: &TimeWindow) {
        if let Some(record) = matcher.classify(line, window) {
            if record.timestamp.is_none() {
                tracing::trace!("Counted line without a timestamp: {}", line);
            }
            self.record(record);
        }
    }

    pub fn merge(&mut self, other: Self) {
        self.success = self.success.saturating_add(other.success);
        self.total = self.total.saturating_add(other.total);
        self.failure = self.total.saturating_sub(self.success);
        self.timestamps.extend(other.timestamps);
    }

    #[must_use]
    pub fn combine<I>(sources: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        sources.into_iter().fold(Self::new(), |mut combined, source| {
            combined.merge(source);
            combined
        })
    }
}
