//! Wall-clock budget tracking for a single search call.
//!
//! Search is single-threaded and never preempted: engines capture a
//! [`TimeControl`] when the call starts and poll [`TimeControl::expired`] at
//! the boundaries of their units of work. A call may therefore overrun its
//! budget by the cost of the unit in flight.

use std::time::{Duration, Instant};

/// Start time plus an optional limit.
#[derive(Debug, Clone, Copy)]
pub struct TimeControl {
    start: Instant,
    limit: Option<Duration>,
}

impl TimeControl {
    /// Start the clock now.
    ///
    /// # Arguments
    /// * `limit` - Maximum time allowed for the search (None = infinite)
    pub fn start(limit: Option<Duration>) -> Self {
        Self {
            start: Instant::now(),
            limit,
        }
    }

    /// A clock that never expires.
    pub fn unlimited() -> Self {
        Self::start(None)
    }

    /// True once the elapsed time has reached the limit.
    #[inline]
    pub fn expired(&self) -> bool {
        match self.limit {
            Some(limit) => self.start.elapsed() >= limit,
            None => false,
        }
    }

    /// Time since the clock was started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Remaining time (None if no limit).
    pub fn remaining(&self) -> Option<Duration> {
        let limit = self.limit?;
        Some(limit.saturating_sub(self.elapsed()))
    }
}

#[cfg(test)]
#[path = "time_control_tests.rs"]
mod time_control_tests;
