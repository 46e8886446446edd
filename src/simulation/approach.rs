//! A single approach's waiting line

use std::collections::VecDeque;

use super::driver::Driver;

/// FIFO line of drivers on one approach, plus its ready flag.
///
/// `ready` is only true while the head driver has completed its stop.
#[derive(Debug, Clone, Default)]
pub struct ApproachQueue {
    drivers: VecDeque<Driver>,
    ready: bool,
}

impl ApproachQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a driver to the back of the line
    pub fn push(&mut self, driver: Driver) {
        if self.drivers.is_empty() {
            // The newcomer has not stopped yet
            self.ready = false;
        }
        self.drivers.push_back(driver);
    }

    /// Mark the front-most driver that has not stopped yet as stopped.
    ///
    /// Returns false when every queued driver had already stopped.
    pub fn record_stop(&mut self) -> bool {
        match self.drivers.iter_mut().find(|d| !d.has_stopped()) {
            Some(driver) => {
                driver.record_stop();
                true
            }
            None => false,
        }
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    /// Clear the ready flag if the line is empty or its head has not stopped
    pub fn refresh_ready(&mut self) {
        if !self.head_has_stopped() {
            self.ready = false;
        }
    }

    /// Remove the head driver; the caller takes ownership
    pub fn pop_head(&mut self) -> Option<Driver> {
        let driver = self.drivers.pop_front();
        self.refresh_ready();
        driver
    }

    pub fn head(&self) -> Option<&Driver> {
        self.drivers.front()
    }

    pub fn head_has_stopped(&self) -> bool {
        self.head().is_some_and(Driver::has_stopped)
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Driver> {
        self.drivers.iter()
    }
}
