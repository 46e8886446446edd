//! Cautious Intersection Simulation Library
//!
//! A discrete-event model of a four-way stop used to estimate how long drivers
//! wait to clear the intersection under a given arrival load.

pub mod simulation;
