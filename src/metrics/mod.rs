//! Aggregation of per-source counts into service metrics.
mod aggregate;
mod types;


pub use aggregate::{aggregate, compute_rates, max_tps};
pub use types::{MetricResult, Percent};
