//! Summary statistics over recorded clear durations
//!
//! Kept apart from the engine: the engine only exposes the raw durations.

use std::fmt;

use super::types::SimTime;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationSummary {
    pub count: usize,
    pub mean: SimTime,
    /// Sample variance (n - 1); zero for a single value
    pub variance: SimTime,
    pub std_dev: SimTime,
    pub min: SimTime,
    pub q1: SimTime,
    pub median: SimTime,
    pub q3: SimTime,
    pub max: SimTime,
}

impl DurationSummary {
    /// Returns None for an empty series
    pub fn from_durations(durations: &[SimTime]) -> Option<Self> {
        if durations.is_empty() {
            return None;
        }

        let count = durations.len();
        let mean = average(durations);
        let variance = if count > 1 {
            durations.iter().map(|d| (d - mean).powi(2)).sum::<SimTime>() / (count - 1) as SimTime
        } else {
            0.0
        };

        let mut sorted = durations.to_vec();
        sorted.sort_by(SimTime::total_cmp);

        Some(Self {
            count,
            mean,
            variance,
            std_dev: variance.sqrt(),
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }
}

impl fmt::Display for DurationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Drivers cleared: {}", self.count)?;
        writeln!(f, "Mean time to clear: {:.3}", self.mean)?;
        writeln!(f, "Variance: {:.3} (std dev {:.3})", self.variance, self.std_dev)?;
        writeln!(f, "Min / Max: {:.3} / {:.3}", self.min, self.max)?;
        write!(
            f,
            "Quartiles (Q1 / median / Q3): {:.3} / {:.3} / {:.3}",
            self.q1, self.median, self.q3
        )
    }
}

/// Arithmetic mean; zero for an empty slice
pub fn average(values: &[SimTime]) -> SimTime {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<SimTime>() / values.len() as SimTime
}

/// Linear-interpolated quantile of already sorted, non-empty data
fn quantile(sorted: &[SimTime], q: f64) -> SimTime {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}
