//! Core types for the intersection simulation

use std::fmt;

/// Simulated time, in the same (unitless) scale as the configured durations
pub type SimTime = f64;

/// Default mean gap between arrivals
pub const MEAN_ARRIVAL_TIME: SimTime = 10.0;

/// Default centre of the stop duration
pub const STOP_TIME: SimTime = 5.0;

/// Default spread around the stop duration
pub const STOP_TIME_SHIFT: SimTime = 0.0;

/// Default centre of the clear duration
pub const CLEAR_TIME: SimTime = 7.0;

/// Default spread around the clear duration
pub const CLEAR_TIME_SHIFT: SimTime = 0.0;

/// Default number of vehicles allowed to clear at once
pub const MAX_IN_INTERSECTION: usize = 2;

/// Default number of arrivals before the run terminates
pub const TOTAL_ARRIVALS: u64 = 1000;

/// One of the four approaches into the intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// All approaches, in queue-index order
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Index of this approach into per-direction arrays
    pub fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::East => 1,
            Direction::South => 2,
            Direction::West => 3,
        }
    }

    /// The next approach counter-clockwise: North -> West -> South -> East -> North
    pub fn counter_clockwise(self) -> Direction {
        match self {
            Direction::North => Direction::West,
            Direction::West => Direction::South,
            Direction::South => Direction::East,
            Direction::East => Direction::North,
        }
    }

    /// The four approaches in the order they are checked after `self` is vacated.
    ///
    /// Starts at the counter-clockwise neighbour and ends with `self`.
    pub fn round_robin_from(self) -> [Direction; 4] {
        let first = self.counter_clockwise();
        let second = first.counter_clockwise();
        let third = second.counter_clockwise();
        [first, second, third, self]
    }

    /// Map a uniform draw in [0,1) to an approach, 25% each
    pub fn from_draw(draw: f64) -> Direction {
        if draw < 0.25 {
            Direction::North
        } else if draw < 0.5 {
            Direction::East
        } else if draw < 0.75 {
            Direction::South
        } else {
            Direction::West
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::North => "North",
            Direction::East => "East",
            Direction::South => "South",
            Direction::West => "West",
        };
        f.write_str(name)
    }
}

/// A unique identifier for a driver, assigned in arrival order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DriverId(pub u64);
