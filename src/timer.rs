//! Elapsed-time clock of a session
//!
//! The clock starts on the first accepted guess and stops for good when the
//! session completes. It has no pause.

use std::time::Duration;

use web_time::Instant;

/// Formats a duration as `minutes:seconds`, seconds zero-padded
///
/// Only whole seconds are shown.
pub fn format_clock(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Start and stop instants of a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizTimer {
    started: Option<Instant>,
    stopped: Option<Instant>,
}

impl QuizTimer {
    /// Starts the clock
    ///
    /// Returns `false` and leaves the clock untouched if it was already
    /// started.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.started.is_some() {
            return false;
        }
        self.started = Some(now);
        true
    }

    /// Stops the clock; later calls keep the first stop instant
    pub fn stop(&mut self, now: Instant) {
        if self.started.is_some() && self.stopped.is_none() {
            self.stopped = Some(now);
        }
    }

    /// Whether the clock has started
    pub fn is_started(&self) -> bool {
        self.started.is_some()
    }

    /// Whether the clock is currently counting
    pub fn is_running(&self) -> bool {
        self.started.is_some() && self.stopped.is_none()
    }

    /// Time counted so far, zero before the start
    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.started {
            Some(started) => self
                .stopped
                .unwrap_or(now)
                .saturating_duration_since(started),
            None => Duration::ZERO,
        }
    }

    /// The elapsed time as shown on the timer label
    pub fn label(&self, now: Instant) -> String {
        format_clock(self.elapsed(now))
    }
}
