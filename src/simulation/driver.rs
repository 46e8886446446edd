//! Per-vehicle state
//!
//! A driver lives in its approach queue until it is dispatched, then only its
//! recorded clear duration survives.

use super::config::TwoPointDuration;
use super::random::RandomSource;
use super::types::{DriverId, SimTime};

/// A driver waiting at (or stopping at) the intersection
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub id: DriverId,
    pub arrival_time: SimTime,
    has_stopped: bool,
}

impl Driver {
    pub fn new(id: DriverId, arrival_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            has_stopped: false,
        }
    }

    pub fn has_stopped(&self) -> bool {
        self.has_stopped
    }

    /// Mark the mandatory stop as done. Only ever goes false -> true.
    pub fn record_stop(&mut self) {
        self.has_stopped = true;
    }

    /// Draw how long this driver takes to stop
    pub fn stop_time(&self, bounds: &TwoPointDuration, rng: &mut dyn RandomSource) -> SimTime {
        bounds.sample(rng)
    }

    /// Draw how long this driver takes to clear the intersection
    pub fn clear_time(&self, bounds: &TwoPointDuration, rng: &mut dyn RandomSource) -> SimTime {
        bounds.sample(rng)
    }
}
