//! Error types for the intersection simulation.

use thiserror::Error;

use super::types::Direction;

/// Errors raised while configuring or running a simulation.
///
/// Everything other than `InvalidConfig` means the event scheduling went wrong;
/// the run is aborted rather than continuing with skewed data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// A configuration value was rejected.
    #[error("Invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    /// The event queue was empty when the next event was requested.
    #[error("Event queue is empty; no arrival was pending")]
    EmptyEventQueue,

    /// A dispatch was attempted from an approach with no stopped head driver.
    #[error("Cannot dispatch from {0}: approach is not ready")]
    DirectionNotReady(Direction),

    /// A stop event found no driver that still had to stop.
    #[error("Stop event for {0} found no driver waiting to stop")]
    NoPendingStop(Direction),

    /// A departure event arrived while nobody was clearing the intersection.
    #[error("Departure event for {0} while the intersection is empty")]
    NoVehicleClearing(Direction),

    /// The controller state broke one of its invariants.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl SimError {
    pub(crate) fn invalid_config(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
