//! Discrete-event simulation of a cautious four-way intersection
//!
//! Drivers arrive on one of four approaches, come to a full stop, and are let
//! into the intersection a limited number at a time, in counter-clockwise
//! round-robin order. The engine records how long each driver took from
//! arrival until it cleared.

mod approach;
mod arrivals;
mod config;
mod controller;
mod driver;
mod error;
mod event;
mod random;
mod report;
mod runner;
mod types;

pub use approach::ApproachQueue;
pub use arrivals::ArrivalGenerator;
pub use config::{SimConfig, TwoPointDuration};
pub use controller::{Dispatch, IntersectionController, IntersectionSnapshot};
pub use driver::Driver;
pub use error::SimError;
pub use event::{Event, EventKind, EventQueue};
pub use random::{RandomSource, RngSource, ScriptedSource};
pub use report::{average, DurationSummary};
pub use runner::{Simulation, TraceEntry};
pub use types::{
    Direction, DriverId, SimTime, CLEAR_TIME, CLEAR_TIME_SHIFT, MAX_IN_INTERSECTION,
    MEAN_ARRIVAL_TIME, STOP_TIME, STOP_TIME_SHIFT, TOTAL_ARRIVALS,
};
