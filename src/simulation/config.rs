//! Configuration for a simulation run.

use super::error::SimError;
use super::random::RandomSource;
use super::types::{
    SimTime, CLEAR_TIME, CLEAR_TIME_SHIFT, MAX_IN_INTERSECTION, MEAN_ARRIVAL_TIME, STOP_TIME,
    STOP_TIME_SHIFT, TOTAL_ARRIVALS,
};

/// A duration that takes one of two values with equal probability.
///
/// This is intentionally not a continuous interval: a draw below 0.5 yields
/// `low`, anything else yields `high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoPointDuration {
    pub low: SimTime,
    pub high: SimTime,
}

impl TwoPointDuration {
    pub fn new(low: SimTime, high: SimTime) -> Self {
        Self { low, high }
    }

    /// Both outcomes are the same value
    pub fn fixed(value: SimTime) -> Self {
        Self::new(value, value)
    }

    /// `center - shift` or `center + shift`
    pub fn centered(center: SimTime, shift: SimTime) -> Self {
        Self::new(center - shift, center + shift)
    }

    /// Pick `low` or `high` with a fair coin flip over one uniform draw
    pub fn sample(&self, rng: &mut dyn RandomSource) -> SimTime {
        if rng.uniform() < 0.5 {
            self.low
        } else {
            self.high
        }
    }

    fn validate(&self, field: &'static str, allow_zero: bool) -> Result<(), SimError> {
        if !self.low.is_finite() || !self.high.is_finite() {
            return Err(SimError::invalid_config(field, "bounds must be finite"));
        }
        if allow_zero && self.low < 0.0 {
            return Err(SimError::invalid_config(
                field,
                format!("low bound {} must be >= 0", self.low),
            ));
        }
        if !allow_zero && self.low <= 0.0 {
            return Err(SimError::invalid_config(
                field,
                format!("low bound {} must be > 0", self.low),
            ));
        }
        if self.low > self.high {
            return Err(SimError::invalid_config(
                field,
                format!("low bound {} exceeds high bound {}", self.low, self.high),
            ));
        }
        Ok(())
    }
}

/// Configuration for a simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Run until more than this many arrivals have been scheduled.
    pub total_arrivals: u64,

    /// Mean gap between arrivals; gaps are uniform in [0, 2 * mean).
    pub mean_arrival_time: SimTime,

    /// How long a driver takes to come to a stop.
    pub stop_time: TwoPointDuration,

    /// How long a driver takes to clear the intersection once dispatched.
    pub clear_time: TwoPointDuration,

    /// Maximum number of drivers clearing at the same time.
    pub capacity: usize,

    /// Emit a trace entry for every processed event.
    pub trace_events: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_arrivals: TOTAL_ARRIVALS,
            mean_arrival_time: MEAN_ARRIVAL_TIME,
            stop_time: TwoPointDuration::centered(STOP_TIME, STOP_TIME_SHIFT),
            clear_time: TwoPointDuration::centered(CLEAR_TIME, CLEAR_TIME_SHIFT),
            capacity: MAX_IN_INTERSECTION,
            trace_events: false,
        }
    }
}

impl SimConfig {
    pub fn new(total_arrivals: u64) -> Self {
        Self {
            total_arrivals,
            ..Self::default()
        }
    }

    /// Set the mean inter-arrival gap.
    pub fn with_mean_arrival_time(mut self, mean: SimTime) -> Self {
        self.mean_arrival_time = mean;
        self
    }

    /// Set the stop duration distribution.
    pub fn with_stop_time(mut self, stop_time: TwoPointDuration) -> Self {
        self.stop_time = stop_time;
        self
    }

    /// Set the clear duration distribution.
    pub fn with_clear_time(mut self, clear_time: TwoPointDuration) -> Self {
        self.clear_time = clear_time;
        self
    }

    /// Set how many drivers may clear at once.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Enable or disable the per-event trace.
    pub fn with_trace_events(mut self, enabled: bool) -> Self {
        self.trace_events = enabled;
        self
    }

    /// Upper bound of the uniform inter-arrival gap
    pub fn upper_arrival_time(&self) -> SimTime {
        2.0 * self.mean_arrival_time
    }

    /// Reject out-of-range values. Nothing is clamped.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.total_arrivals < 1 {
            return Err(SimError::invalid_config(
                "total_arrivals",
                "at least one arrival is required",
            ));
        }
        if !self.mean_arrival_time.is_finite() || self.mean_arrival_time <= 0.0 {
            return Err(SimError::invalid_config(
                "mean_arrival_time",
                format!("{} must be a finite value > 0", self.mean_arrival_time),
            ));
        }
        if self.capacity < 1 {
            return Err(SimError::invalid_config(
                "capacity",
                "at least one vehicle must be able to clear",
            ));
        }
        self.stop_time.validate("stop_time", true)?;
        self.clear_time.validate("clear_time", false)?;
        Ok(())
    }
}
