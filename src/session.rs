//! Host-side collaborators of the engine
//!
//! The engine neither draws nor keeps time by itself. It pushes every visual
//! change through a [`Presenter`] and asks a [`Scheduler`] to deliver
//! [`AlarmMessage`]s back to it later. Both are implemented by the host,
//! typically a thin layer over a map widget and the browser's timers.

use std::time::Duration;

use crate::{
    AlarmMessage,
    location::{Bounds, Verdict},
    score::Summary,
};

/// Trait for rendering the quiz
///
/// All methods take `&self`; implementations that need to mutate state use
/// interior mutability, the same way a message channel would.
pub trait Presenter {
    /// Displays the current question, or the completion text once finished
    fn render_question(&self, name: &str);

    /// Displays how many questions have been answered out of the total
    fn render_progress(&self, current: usize, total: usize);

    /// Displays the correct and incorrect counters
    fn render_counts(&self, correct: usize, incorrect: usize);

    /// Displays the elapsed time label (`m:ss`)
    fn render_timer(&self, label: &str);

    /// Displays a one-line feedback text under the question
    fn render_feedback(&self, text: &str);

    /// Overlays the bounds of the location just answered, colored by verdict
    ///
    /// See [`Verdict::region_style`] for the colors.
    fn draw_region(&self, bounds: &Bounds, verdict: Verdict);

    /// Removes every overlay
    fn clear_regions(&self);

    /// Adds an entry to the answer history
    fn append_log_entry(&self, name: &str, verdict: Verdict);

    /// Empties the answer history
    fn clear_log(&self);

    /// Shows the end-of-quiz banner
    fn show_completion_banner(&self, text: &str);

    /// Hides the end-of-quiz banner
    fn hide_completion_banner(&self);

    /// Records a finished session on the score panel
    fn append_score_entry(&self, summary: &Summary);
}

/// Opaque handle of a scheduled alarm, issued by a [`Scheduler`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    /// Wraps a host-specific timer identifier
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The host-specific timer identifier
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Trait for one-shot, cancellable timers
///
/// When a scheduled alarm is due, the host hands it to
/// [`QuizEngine::receive_alarm`](crate::engine::QuizEngine::receive_alarm).
pub trait Scheduler {
    /// Delivers `message` after `delay` and returns a handle to cancel it
    ///
    /// A zero `delay` may deliver the alarm before `schedule` returns; the
    /// [`Controller`](crate::controller::Controller) holds such alarms back
    /// until the engine call that scheduled them has finished.
    fn schedule(&mut self, message: AlarmMessage, delay: Duration) -> TimerHandle;

    /// Cancels a pending alarm; cancelling a fired alarm has no effect
    fn cancel(&mut self, handle: TimerHandle);
}
