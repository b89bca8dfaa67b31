use std::collections::HashMap;

use chrono::NaiveDateTime;

use super::{MetricResult, Percent};
use crate::scan::SourceCounts;
use crate::window::OffpeakRange;

/// Merges per-source counts and reduces them to the reported metrics.
///
/// No traffic during a configured off-peak range reports 100% success;
/// no traffic otherwise reports 0% for both rates.
#[must_use]
pub fn aggregate<I>(sources: I, offpeak: Option<&OffpeakRange>, now: NaiveDateTime) -> MetricResult
where
    I: IntoIterator<Item = SourceCounts>,
{
    let combined = SourceCounts::combine(sources);
    let quiet_offpeak = combined.total == 0 && offpeak.is_some_and(|range| range.contains(now));

    let (success_rate, failure_rate) = if quiet_offpeak {
        tracing::debug!("No traffic during off-peak; reporting full success.");
        (Percent::HUNDRED, Percent::ZERO)
    } else {
        compute_rates(combined.success, combined.total)
    };

    MetricResult {
        success_rate,
        failure_rate,
        success_total: combined.success,
        failure_total: combined.failure,
        total_total: combined.total,
        max_tps: max_tps(&combined.timestamps),
    }
}

/// Success and failure percentages; both zero when `total` is zero.
///
/// Each rate is rounded from its own exact ratio, so the rendered pair can
/// differ from 100.00 by a hundredth.
#[must_use]
pub fn compute_rates(success: u64, total: u64) -> (Percent, Percent) {
    if total == 0 {
        return (Percent::ZERO, Percent::ZERO);
    }
    let failure = total.saturating_sub(success);
    (
        Percent::from_ratio(success, total),
        Percent::from_ratio(failure, total),
    )
}

/// Largest number of lines sharing the same one-second timestamp.
#[must_use]
pub fn max_tps(timestamps: &[String]) -> u64 {
    let mut per_second: HashMap<&str, u64> = HashMap::with_capacity(timestamps.len());
    for timestamp in timestamps {
        let count = per_second.entry(timestamp.as_str()).or_insert(0);
        *count = count.saturating_add(1);
    }
    per_second.into_values().max().unwrap_or(0)
}
