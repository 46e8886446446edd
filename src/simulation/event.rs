//! Events and the time-ordered event queue

use ordered_float::OrderedFloat;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

use super::error::SimError;
use super::types::{Direction, SimTime};

/// What happens when an event fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Arrival,   // A driver joins the back of an approach
    Stop,      // A driver finishes its mandatory stop
    Departure, // A driver finishes clearing the intersection
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::Arrival => "Arrival",
            EventKind::Stop => "Stop",
            EventKind::Departure => "Departure",
        };
        f.write_str(name)
    }
}

/// A scheduled event. Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    kind: EventKind,
    time: SimTime,
    direction: Direction,
}

impl Event {
    pub fn new(kind: EventKind, time: SimTime, direction: Direction) -> Self {
        Self {
            kind,
            time,
            direction,
        }
    }

    pub fn arrival(time: SimTime, direction: Direction) -> Self {
        Self::new(EventKind::Arrival, time, direction)
    }

    pub fn stop(time: SimTime, direction: Direction) -> Self {
        Self::new(EventKind::Stop, time, direction)
    }

    pub fn departure(time: SimTime, direction: Direction) -> Self {
        Self::new(EventKind::Departure, time, direction)
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Human-readable account of what happened when this event fired
    pub fn description(&self) -> String {
        match self.kind {
            EventKind::Arrival => {
                format!("{}: A driver arrives from the {}.", self.time, self.direction)
            }
            EventKind::Stop => {
                format!("{}: A driver from the {} has stopped.", self.time, self.direction)
            }
            EventKind::Departure => format!(
                "{}: A driver from the {} has cleared the intersection.",
                self.time, self.direction
            ),
        }
    }
}

/// Heap entry ordered so the earliest time, then the earliest insertion, pops first
#[derive(Debug)]
struct QueuedEvent {
    time: OrderedFloat<SimTime>,
    seq: u64,
    event: Event,
}

impl PartialEq for QueuedEvent {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueuedEvent {}

impl Ord for QueuedEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .time
            .cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueuedEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Pending events, extracted in non-decreasing time order.
///
/// Events with identical times come out in the order they were inserted.
#[derive(Debug, Default)]
pub struct EventQueue {
    heap: BinaryHeap<QueuedEvent>,
    next_seq: u64,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, event: Event) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(QueuedEvent {
            time: OrderedFloat(event.time),
            seq,
            event,
        });
    }

    /// Remove and return the earliest pending event
    pub fn extract_min(&mut self) -> Result<Event, SimError> {
        self.heap
            .pop()
            .map(|queued| queued.event)
            .ok_or(SimError::EmptyEventQueue)
    }

    /// Time of the earliest pending event, if any
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|queued| queued.time.into_inner())
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}
