//! Recording presenter and manual scheduler shared by the unit tests

use std::{cell::RefCell, time::Duration};

use itertools::Itertools;

use crate::{
    AlarmMessage,
    location::{Bounds, Verdict},
    score::Summary,
    session::{Presenter, Scheduler, TimerHandle},
};

/// One call received by [`RecordingPresenter`]
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Question(String),
    Progress(usize, usize),
    Counts(usize, usize),
    Timer(String),
    Feedback(String),
    Region(Bounds, Verdict),
    ClearRegions,
    Log(String, Verdict),
    ClearLog,
    ShowBanner(String),
    HideBanner,
    ScoreEntry(Summary),
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: RefCell<Vec<Event>>,
}

impl RecordingPresenter {
    fn push(&self, event: Event) {
        self.events.borrow_mut().push(event);
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn contains(&self, event: &Event) -> bool {
        self.events.borrow().contains(event)
    }

    fn last_matching<T>(&self, f: impl Fn(&Event) -> Option<T>) -> Option<T> {
        self.events.borrow().iter().rev().find_map(f)
    }

    pub fn last_question(&self) -> Option<String> {
        self.last_matching(|e| match e {
            Event::Question(q) => Some(q.clone()),
            _ => None,
        })
    }

    pub fn last_timer(&self) -> Option<String> {
        self.last_matching(|e| match e {
            Event::Timer(t) => Some(t.clone()),
            _ => None,
        })
    }

    pub fn last_feedback(&self) -> Option<String> {
        self.last_matching(|e| match e {
            Event::Feedback(f) => Some(f.clone()),
            _ => None,
        })
    }

    /// Banner currently shown, `None` if hidden or never shown
    pub fn banner(&self) -> Option<String> {
        self.last_matching(|e| match e {
            Event::ShowBanner(b) => Some(Some(b.clone())),
            Event::HideBanner => Some(None),
            _ => None,
        })
        .flatten()
    }

    /// Overlays drawn since the last clear
    pub fn regions_on_map(&self) -> usize {
        self.since_last(&Event::ClearRegions, |e| matches!(e, Event::Region(..)))
    }

    /// Log entries appended since the last clear
    pub fn log_entries(&self) -> usize {
        self.since_last(&Event::ClearLog, |e| matches!(e, Event::Log(..)))
    }

    fn since_last(&self, clear: &Event, f: impl Fn(&Event) -> bool) -> usize {
        self.events
            .borrow()
            .iter()
            .rev()
            .take_while(|e| *e != clear)
            .filter(|e| f(*e))
            .count()
    }

    pub fn score_entries(&self) -> Vec<Summary> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                Event::ScoreEntry(s) => Some(s.clone()),
                _ => None,
            })
            .collect_vec()
    }
}

impl Presenter for RecordingPresenter {
    fn render_question(&self, name: &str) {
        self.push(Event::Question(name.to_owned()));
    }

    fn render_progress(&self, current: usize, total: usize) {
        self.push(Event::Progress(current, total));
    }

    fn render_counts(&self, correct: usize, incorrect: usize) {
        self.push(Event::Counts(correct, incorrect));
    }

    fn render_timer(&self, label: &str) {
        self.push(Event::Timer(label.to_owned()));
    }

    fn render_feedback(&self, text: &str) {
        self.push(Event::Feedback(text.to_owned()));
    }

    fn draw_region(&self, bounds: &Bounds, verdict: Verdict) {
        self.push(Event::Region(*bounds, verdict));
    }

    fn clear_regions(&self) {
        self.push(Event::ClearRegions);
    }

    fn append_log_entry(&self, name: &str, verdict: Verdict) {
        self.push(Event::Log(name.to_owned(), verdict));
    }

    fn clear_log(&self) {
        self.push(Event::ClearLog);
    }

    fn show_completion_banner(&self, text: &str) {
        self.push(Event::ShowBanner(text.to_owned()));
    }

    fn hide_completion_banner(&self) {
        self.push(Event::HideBanner);
    }

    fn append_score_entry(&self, summary: &Summary) {
        self.push(Event::ScoreEntry(summary.clone()));
    }
}

/// Scheduler that only fires alarms when a test takes them
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: Vec<(TimerHandle, AlarmMessage, Duration)>,
    cancelled: Vec<TimerHandle>,
}

impl ManualScheduler {
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled(&self) -> &[TimerHandle] {
        &self.cancelled
    }

    pub fn count(&self, f: impl Fn(&AlarmMessage) -> bool) -> usize {
        self.pending.iter().filter(|(_, m, _)| f(m)).count()
    }

    pub fn delay_of(&self, f: impl Fn(&AlarmMessage) -> bool) -> Option<Duration> {
        self.pending
            .iter()
            .find(|(_, m, _)| f(m))
            .map(|(_, _, delay)| *delay)
    }

    /// Removes the oldest pending alarm matching `f`, as if it fired
    pub fn take(&mut self, f: impl Fn(&AlarmMessage) -> bool) -> Option<AlarmMessage> {
        let position = self.pending.iter().position(|(_, m, _)| f(m))?;
        Some(self.pending.remove(position).1)
    }

    pub fn take_advance(&mut self) -> Option<AlarmMessage> {
        self.take(|m| matches!(m, AlarmMessage::Advance { .. }))
    }

    pub fn take_tick(&mut self) -> Option<AlarmMessage> {
        self.take(|m| matches!(m, AlarmMessage::Tick { .. }))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, message: AlarmMessage, delay: Duration) -> TimerHandle {
        self.next += 1;
        let handle = TimerHandle::new(self.next);
        self.pending.push((handle, message, delay));
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.push(handle);
        self.pending.retain(|(h, _, _)| *h != handle);
    }
}
