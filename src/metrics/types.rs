use std::fmt;

/// Percentage stored in hundredths, rendered with two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Percent(u64);

impl Percent {
    pub const ZERO: Self = Self(0);
    pub const HUNDRED: Self = Self(10_000);

    /// `part / whole` as a percentage, rounded half-up to two decimals.
    ///
    /// A zero `whole` yields zero.
    #[must_use]
    pub fn from_ratio(part: u64, whole: u64) -> Self {
        let doubled_whole = u128::from(whole).saturating_mul(2);
        let scaled = u128::from(part)
            .saturating_mul(20_000)
            .saturating_add(u128::from(whole))
            .checked_div(doubled_whole)
            .unwrap_or(0);
        Self(u64::try_from(scaled).unwrap_or(u64::MAX).min(Self::HUNDRED.0))
    }

    #[must_use]
    pub const fn from_hundredths(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn hundredths(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Six values reported for a service after one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricResult {
    pub success_rate: Percent,
    pub failure_rate: Percent,
    pub success_total: u64,
    pub failure_total: u64,
    pub total_total: u64,
    pub max_tps: u64,
}
