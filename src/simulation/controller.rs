//! Right-of-way state machine for the intersection
//!
//! Owns the four approach queues and the count of drivers clearing. Every
//! event is applied in full before the next one is looked at, and any
//! follow-on events are pushed back onto the caller's queue.

use log::trace;
use std::fmt;

use super::approach::ApproachQueue;
use super::config::{SimConfig, TwoPointDuration};
use super::driver::Driver;
use super::error::SimError;
use super::event::{Event, EventKind, EventQueue};
use super::random::RandomSource;
use super::types::{Direction, DriverId, SimTime};

/// A driver being let into the intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatch {
    pub driver_id: DriverId,
    pub direction: Direction,
    pub dispatched_at: SimTime,
    /// When the driver's departure event fires
    pub clear_time: SimTime,
    /// Time from arrival to having cleared
    pub duration: SimTime,
}

/// Observable state of the controller at one instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSnapshot {
    pub clock: SimTime,
    /// Indexed by `Direction::index`
    pub queue_lengths: [usize; 4],
    /// Indexed by `Direction::index`
    pub ready: [bool; 4],
    pub in_intersection: usize,
}

impl IntersectionSnapshot {
    pub fn queue_length(&self, direction: Direction) -> usize {
        self.queue_lengths[direction.index()]
    }

    pub fn is_ready(&self, direction: Direction) -> bool {
        self.ready[direction.index()]
    }

    pub fn total_queued(&self) -> usize {
        self.queue_lengths.iter().sum()
    }
}

impl fmt::Display for IntersectionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [n, e, s, w] = self.queue_lengths;
        writeln!(f, "[N,E,S,W] = [{},{},{},{}]", n, e, s, w)?;
        write!(f, "Number in the intersection: {}", self.in_intersection)
    }
}

/// The intersection state machine
#[derive(Debug)]
pub struct IntersectionController {
    approaches: [ApproachQueue; 4],
    in_intersection: usize,
    capacity: usize,
    stop_time: TwoPointDuration,
    clear_time: TwoPointDuration,
    clock: SimTime,
    next_driver_id: u64,
    durations: Vec<SimTime>,
}

impl IntersectionController {
    pub fn new(config: &SimConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            approaches: Default::default(),
            in_intersection: 0,
            capacity: config.capacity,
            stop_time: config.stop_time,
            clear_time: config.clear_time,
            clock: 0.0,
            next_driver_id: 1,
            durations: Vec::new(),
        })
    }

    /// Apply one event at its scheduled time.
    ///
    /// Returns the dispatch it caused, if any. At most one driver is let in per event.
    pub fn handle(
        &mut self,
        event: &Event,
        events: &mut EventQueue,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<Dispatch>, SimError> {
        if event.time() < self.clock {
            return Err(SimError::InvariantViolation(format!(
                "event at {} is earlier than the clock at {}",
                event.time(),
                self.clock
            )));
        }
        self.clock = event.time();

        match event.kind() {
            EventKind::Arrival => {
                self.arrive(event.direction(), events, rng);
                Ok(None)
            }
            EventKind::Stop => self.stop(event.direction(), events, rng),
            EventKind::Departure => self.depart(event.direction(), events, rng),
        }
    }

    fn arrive(&mut self, direction: Direction, events: &mut EventQueue, rng: &mut dyn RandomSource) {
        let driver = Driver::new(DriverId(self.next_driver_id), self.clock);
        self.next_driver_id += 1;

        let stop_time = driver.stop_time(&self.stop_time, rng);
        self.approaches[direction.index()].push(driver);
        events.insert(Event::stop(self.clock + stop_time, direction));
    }

    fn stop(
        &mut self,
        direction: Direction,
        events: &mut EventQueue,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<Dispatch>, SimError> {
        let approach = &mut self.approaches[direction.index()];
        // Stops may be processed out of arrival order, so credit the front-most driver
        if !approach.record_stop() {
            return Err(SimError::NoPendingStop(direction));
        }
        approach.mark_ready();

        if self.in_intersection < self.capacity {
            self.depart_from(direction, events, rng).map(Some)
        } else {
            Ok(None)
        }
    }

    fn depart(
        &mut self,
        direction: Direction,
        events: &mut EventQueue,
        rng: &mut dyn RandomSource,
    ) -> Result<Option<Dispatch>, SimError> {
        if self.in_intersection == 0 {
            return Err(SimError::NoVehicleClearing(direction));
        }
        self.in_intersection -= 1;
        self.approaches[direction.index()].refresh_ready();

        // One freed slot, one dispatch; other ready approaches wait for the next event
        let next = direction
            .round_robin_from()
            .into_iter()
            .find(|d| self.approaches[d.index()].is_ready());

        match next {
            Some(next) => self.depart_from(next, events, rng).map(Some),
            None => Ok(None),
        }
    }

    /// Send the head driver of `direction` into the intersection.
    ///
    /// This is the only place clear durations are recorded.
    pub fn depart_from(
        &mut self,
        direction: Direction,
        events: &mut EventQueue,
        rng: &mut dyn RandomSource,
    ) -> Result<Dispatch, SimError> {
        if self.in_intersection >= self.capacity {
            return Err(SimError::InvariantViolation(format!(
                "dispatch from {} with {} of {} slots taken",
                direction, self.in_intersection, self.capacity
            )));
        }

        let clear_bounds = self.clear_time;
        let approach = &mut self.approaches[direction.index()];
        let clear_duration = match approach.head() {
            Some(head) if approach.is_ready() && head.has_stopped() => {
                head.clear_time(&clear_bounds, rng)
            }
            _ => return Err(SimError::DirectionNotReady(direction)),
        };
        let driver = approach
            .pop_head()
            .ok_or(SimError::DirectionNotReady(direction))?;

        let clear_time = self.clock + clear_duration;
        events.insert(Event::departure(clear_time, direction));
        self.in_intersection += 1;

        let duration = clear_time - driver.arrival_time;
        if duration < 0.0 {
            return Err(SimError::InvariantViolation(format!(
                "driver {:?} would clear {} before arriving",
                driver.id, -duration
            )));
        }
        self.durations.push(duration);

        trace!(
            "dispatched driver {:?} from {} at {:.3}, clears at {:.3}",
            driver.id,
            direction,
            self.clock,
            clear_time
        );

        Ok(Dispatch {
            driver_id: driver.id,
            direction,
            dispatched_at: self.clock,
            clear_time,
            duration,
        })
    }

    /// Verify the capacity bound and that every ready approach has a stopped head
    pub fn check_invariants(&self) -> Result<(), SimError> {
        if self.in_intersection > self.capacity {
            return Err(SimError::InvariantViolation(format!(
                "{} drivers clearing with capacity {}",
                self.in_intersection, self.capacity
            )));
        }
        for direction in Direction::ALL {
            let approach = &self.approaches[direction.index()];
            if approach.is_ready() && !approach.head_has_stopped() {
                return Err(SimError::InvariantViolation(format!(
                    "{} is marked ready but its head driver has not stopped",
                    direction
                )));
            }
        }
        Ok(())
    }

    pub fn snapshot(&self) -> IntersectionSnapshot {
        let mut queue_lengths = [0; 4];
        let mut ready = [false; 4];
        for direction in Direction::ALL {
            let approach = &self.approaches[direction.index()];
            queue_lengths[direction.index()] = approach.len();
            ready[direction.index()] = approach.is_ready();
        }
        IntersectionSnapshot {
            clock: self.clock,
            queue_lengths,
            ready,
            in_intersection: self.in_intersection,
        }
    }

    pub fn approach(&self, direction: Direction) -> &ApproachQueue {
        &self.approaches[direction.index()]
    }

    pub fn clock(&self) -> SimTime {
        self.clock
    }

    pub fn in_intersection(&self) -> usize {
        self.in_intersection
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total number of drivers still waiting on any approach
    pub fn queued_drivers(&self) -> usize {
        self.approaches.iter().map(ApproachQueue::len).sum()
    }

    /// Recorded clear durations, in dispatch order
    pub fn durations(&self) -> &[SimTime] {
        &self.durations
    }

    pub fn into_durations(self) -> Vec<SimTime> {
        self.durations
    }
}
