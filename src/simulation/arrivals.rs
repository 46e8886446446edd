//! Arrival generation
//!
//! Each processed arrival schedules exactly one more, independent of which
//! approaches are occupied. The count of scheduled arrivals is what ends a run.

use super::config::SimConfig;
use super::event::{Event, EventQueue};
use super::random::RandomSource;
use super::types::{Direction, SimTime};

#[derive(Debug, Clone)]
pub struct ArrivalGenerator {
    upper_arrival_time: SimTime,
    scheduled: u64,
}

impl ArrivalGenerator {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            upper_arrival_time: config.upper_arrival_time(),
            scheduled: 0,
        }
    }

    /// Schedule the next arrival after `clock`.
    ///
    /// Draws the gap first (uniform in [0, 2 * mean)), then the approach.
    pub fn schedule_next(
        &mut self,
        clock: SimTime,
        events: &mut EventQueue,
        rng: &mut dyn RandomSource,
    ) -> Event {
        let inter_arrival_time = rng.uniform() * self.upper_arrival_time;
        let direction = Direction::from_draw(rng.uniform());
        let event = Event::arrival(clock + inter_arrival_time, direction);
        events.insert(event);
        self.scheduled += 1;
        event
    }

    /// Arrivals scheduled so far, including ones not yet processed
    pub fn scheduled(&self) -> u64 {
        self.scheduled
    }
}
