//! Simulation runner that ties everything together
//!
//! Create, run, then read the recorded durations. All per-run state lives in
//! the `Simulation` value, so independent runs can coexist.

use log::{debug, info, trace};
use std::fmt;

use super::arrivals::ArrivalGenerator;
use super::config::SimConfig;
use super::controller::{Dispatch, IntersectionController, IntersectionSnapshot};
use super::error::SimError;
use super::event::{Event, EventKind, EventQueue};
use super::random::RandomSource;
use super::types::SimTime;

/// What happened while processing one event
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEntry {
    /// 1-based position of this event in the run
    pub sequence: u64,
    pub event: Event,
    /// The driver let into the intersection, if the event caused a dispatch
    pub dispatch: Option<Dispatch>,
    /// Controller state after the event was applied
    pub snapshot: IntersectionSnapshot,
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.event.description())?;
        if let Some(dispatch) = &self.dispatch {
            writeln!(
                f,
                "Driver {} from the {} enters the intersection, clears at {}.",
                dispatch.driver_id.0, dispatch.direction, dispatch.clear_time
            )?;
        }
        write!(f, "{}", self.snapshot)
    }
}

/// A single simulation run
pub struct Simulation<R: RandomSource> {
    config: SimConfig,
    controller: IntersectionController,
    events: EventQueue,
    arrivals: ArrivalGenerator,
    rng: R,
    events_processed: u64,
}

impl<R: RandomSource> Simulation<R> {
    /// Validate the configuration and schedule the first arrival
    pub fn new(config: SimConfig, mut rng: R) -> Result<Self, SimError> {
        let controller = IntersectionController::new(&config)?;
        let mut events = EventQueue::new();
        let mut arrivals = ArrivalGenerator::new(&config);
        arrivals.schedule_next(0.0, &mut events, &mut rng);

        Ok(Self {
            config,
            controller,
            events,
            arrivals,
            rng,
            events_processed: 0,
        })
    }

    /// True once more arrivals have been scheduled than the target
    pub fn is_finished(&self) -> bool {
        self.arrivals.scheduled() > self.config.total_arrivals
    }

    /// Process the next pending event
    pub fn step(&mut self) -> Result<TraceEntry, SimError> {
        let event = self.events.extract_min()?;
        let dispatch = self
            .controller
            .handle(&event, &mut self.events, &mut self.rng)?;
        if event.kind() == EventKind::Arrival {
            self.arrivals
                .schedule_next(self.controller.clock(), &mut self.events, &mut self.rng);
        }
        self.controller.check_invariants()?;
        self.events_processed += 1;

        let entry = TraceEntry {
            sequence: self.events_processed,
            event,
            dispatch,
            snapshot: self.controller.snapshot(),
        };
        debug!("{}", event.description());
        trace!("{:?}", entry.snapshot);
        Ok(entry)
    }

    /// Run to termination.
    ///
    /// With `trace_events` enabled every entry is also logged at info level.
    pub fn run(&mut self) -> Result<(), SimError> {
        let trace_events = self.config.trace_events;
        self.run_with_trace(|entry| {
            if trace_events {
                info!("{}", entry);
            }
        })
    }

    /// Run to termination, handing every processed event to `sink`
    pub fn run_with_trace<F>(&mut self, mut sink: F) -> Result<(), SimError>
    where
        F: FnMut(&TraceEntry),
    {
        info!(
            "Starting run: {} arrivals, capacity {}",
            self.config.total_arrivals, self.config.capacity
        );
        while !self.is_finished() {
            let entry = self.step()?;
            sink(&entry);
        }
        info!(
            "Run complete at t={:.3}: {} events, {} durations recorded, {} still queued, {} still clearing",
            self.clock(),
            self.events_processed,
            self.durations().len(),
            self.controller.queued_drivers(),
            self.controller.in_intersection()
        );
        Ok(())
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn controller(&self) -> &IntersectionController {
        &self.controller
    }

    pub fn clock(&self) -> SimTime {
        self.controller.clock()
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    pub fn arrivals_scheduled(&self) -> u64 {
        self.arrivals.scheduled()
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Recorded clear durations, in dispatch order
    pub fn durations(&self) -> &[SimTime] {
        self.controller.durations()
    }

    pub fn into_durations(self) -> Vec<SimTime> {
        self.controller.into_durations()
    }
}
