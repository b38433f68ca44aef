//! The stopwatch measuring a single play-through.
//!
//! Unlike a general-purpose stopwatch, this one runs exactly once: it's started by the first settling move, stopped
//! when the game ends, and can neither be restarted nor paused.

use std::time::{Duration, Instant};

#[derive(Debug, Default, Clone, Copy)]
pub struct Stopwatch {
    /// The moment the stopwatch has been started (`None` if it has never been started yet).
    start_time: Option<Instant>,
    /// The time measured by the moment the stopwatch has been stopped (`None` while it's still running).
    frozen: Option<Duration>,
}

impl Stopwatch {
    /// Starts the stopwatch. Has no effect if the stopwatch has ever been started before.
    pub fn start(&mut self) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
    }

    /// Stops the stopwatch for good. Has no effect if it's not running.
    pub fn stop(&mut self) {
        if self.is_running() {
            self.frozen = Some(self.get_elapsed_time());
        }
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some() && self.frozen.is_none()
    }

    /// Returns the time elapsed since the stopwatch has been started, up to the moment it's been stopped.
    pub fn get_elapsed_time(&self) -> Duration {
        match (self.start_time, self.frozen) {
            (_, Some(frozen)) => frozen,
            (Some(start_time), None) => start_time.elapsed(),
            (None, None) => Duration::ZERO,
        }
    }
}
