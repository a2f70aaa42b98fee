//! Core quiz logic and state management
//!
//! This module contains the quiz engine: the session it is playing, the
//! sequencing of questions, judging of guesses, the elapsed-time clock and
//! final scoring. Every visible effect goes through a [`Presenter`] and
//! every delayed effect through a [`Scheduler`].

use std::{fmt::Debug, time::Duration};

use enum_map::EnumMap;
use garde::Validate;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::{
    AlarmMessage, Error, SyncMessage,
    catalog::Catalog,
    constants,
    location::{Location, Point, Verdict},
    sampler,
    score::Summary,
    session::{Presenter, Scheduler, TimerHandle},
    session_id::SessionId,
    timer::QuizTimer,
};

/// Represents the current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// No guess has been made yet; the clock is not running
    NotStarted,
    /// At least one guess has been made and questions remain
    InProgress,
    /// Every question has been answered
    Complete,
}

type ValidationResult = garde::Result;

/// Validates that a duration falls within bounds given in milliseconds
fn validate_duration<const MIN_MILLIS: u64, const MAX_MILLIS: u64>(
    field: &'static str,
    val: &Duration,
) -> ValidationResult {
    if (u128::from(MIN_MILLIS)..=u128::from(MAX_MILLIS)).contains(&val.as_millis()) {
        Ok(())
    } else {
        Err(garde::Error::new(format!(
            "{field} is outside of the bounds [{MIN_MILLIS}ms,{MAX_MILLIS}ms]",
        )))
    }
}

fn validate_advance_delay(val: &Duration) -> ValidationResult {
    validate_duration::<
        { constants::session::MIN_ADVANCE_DELAY_MS },
        { constants::session::MAX_ADVANCE_DELAY_MS },
    >("advance_delay", val)
}

fn validate_tick_interval(val: &Duration) -> ValidationResult {
    validate_duration::<
        { constants::session::MIN_TICK_INTERVAL_MS },
        { constants::session::MAX_TICK_INTERVAL_MS },
    >("tick_interval", val)
}

/// Pacing options of the engine
///
/// Missing fields take their default when deserialized.
#[serde_with::serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Options {
    /// Catalog locations asked per session, the required location excluded
    #[garde(range(
        min = constants::session::MIN_SAMPLE_COUNT,
        max = constants::session::MAX_SAMPLE_COUNT
    ))]
    sample_count: usize,
    /// How long a verdict stays on screen before the next question
    #[garde(custom(|v, _| validate_advance_delay(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    advance_delay: Duration,
    /// How often the timer label is refreshed
    #[garde(custom(|v, _| validate_tick_interval(v)))]
    #[serde_as(as = "serde_with::DurationMilliSeconds<u64>")]
    tick_interval: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            sample_count: constants::session::SAMPLE_COUNT,
            advance_delay: Duration::from_millis(constants::session::ADVANCE_DELAY_MS),
            tick_interval: Duration::from_millis(constants::session::TICK_INTERVAL_MS),
        }
    }
}

impl Options {
    /// Sets the number of sampled locations per session
    #[must_use]
    pub fn with_sample_count(mut self, sample_count: usize) -> Self {
        self.sample_count = sample_count;
        self
    }

    /// Sets the verdict display time
    #[must_use]
    pub fn with_advance_delay(mut self, advance_delay: Duration) -> Self {
        self.advance_delay = advance_delay;
        self
    }

    /// Sets the timer refresh interval
    #[must_use]
    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Catalog locations asked per session
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Verdict display time
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    /// Timer refresh interval
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

/// Inputs coming from the player
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum IncomingMessage {
    /// A map click answering the current question
    Guess(Point),
    /// Request to throw the session away and start a new one
    Restart,
}

/// One judged guess, kept for the answer history
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attempt {
    /// Location that was asked for
    pub location: Location,
    /// Whether the guess landed inside it
    pub verdict: Verdict,
}

/// A single playthrough
///
/// Replaced as a whole on restart.
#[derive(Debug)]
struct QuizSession {
    id: SessionId,
    locations: Vec<Location>,
    index: usize,
    counts: EnumMap<Verdict, usize>,
    timer: QuizTimer,
    /// Set from an accepted guess until its advance runs
    answer_pending: bool,
    pending_advance: Option<TimerHandle>,
    pending_tick: Option<TimerHandle>,
    attempts: Vec<Attempt>,
    summary: Option<Summary>,
}

impl QuizSession {
    fn new(catalog: &Catalog, sample_count: usize, rng: &mut fastrand::Rng) -> Self {
        Self {
            id: SessionId::new(),
            locations: sampler::sample(catalog.locations(), sample_count, catalog.required(), rng),
            index: 0,
            counts: EnumMap::default(),
            timer: QuizTimer::default(),
            answer_pending: false,
            pending_advance: None,
            pending_tick: None,
            attempts: Vec::new(),
            summary: None,
        }
    }

    fn current(&self) -> Option<&Location> {
        self.locations.get(self.index)
    }

    fn is_complete(&self) -> bool {
        self.index >= self.locations.len()
    }
}

/// The quiz engine
///
/// Owns the catalog, the options and the session being played. Operations
/// take the host's presenter and scheduler as arguments; the engine keeps
/// only the handles of the alarms it scheduled.
pub struct QuizEngine {
    catalog: Catalog,
    options: Options,
    rng: fastrand::Rng,
    session: QuizSession,
}

impl Debug for QuizEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuizEngine")
            .field("options", &self.options)
            .field("session", &self.session.id)
            .field("index", &self.session.index)
            .finish_non_exhaustive()
    }
}

// Accessors
impl QuizEngine {
    /// Current phase of the session
    pub fn state(&self) -> State {
        if self.session.is_complete() {
            State::Complete
        } else if self.session.timer.is_started() {
            State::InProgress
        } else {
            State::NotStarted
        }
    }

    /// Identifier of the current session
    pub fn session_id(&self) -> SessionId {
        self.session.id
    }

    /// Index of the current question; equals [`QuizEngine::len`] once complete
    pub fn index(&self) -> usize {
        self.session.index
    }

    /// Number of questions in the session
    pub fn len(&self) -> usize {
        self.session.locations.len()
    }

    /// Whether the session has no questions
    pub fn is_empty(&self) -> bool {
        self.session.locations.is_empty()
    }

    /// Correct guesses so far
    pub fn correct(&self) -> usize {
        self.session.counts[Verdict::Correct]
    }

    /// Incorrect guesses so far
    pub fn incorrect(&self) -> usize {
        self.session.counts[Verdict::Incorrect]
    }

    /// Location currently asked for, `None` once complete
    pub fn current_location(&self) -> Option<&Location> {
        self.session.current()
    }

    /// Locations of the session in the order they are asked
    pub fn locations(&self) -> &[Location] {
        &self.session.locations
    }

    /// Guesses judged so far, oldest first
    pub fn attempts(&self) -> &[Attempt] {
        &self.session.attempts
    }

    /// Final results, available once complete
    pub fn summary(&self) -> Option<&Summary> {
        self.session.summary.as_ref()
    }

    /// Whether a verdict is on screen and further guesses are ignored
    pub fn is_answer_pending(&self) -> bool {
        self.session.answer_pending
    }

    /// Elapsed time of the session clock
    pub fn elapsed(&self, now: Instant) -> Duration {
        self.session.timer.elapsed(now)
    }

    /// Timer label (`m:ss`)
    pub fn timer_label(&self, now: Instant) -> String {
        self.session.timer.label(now)
    }

    /// Options the engine was built with
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Catalog sessions are sampled from
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl QuizEngine {
    /// Creates an engine with a fresh, not yet started session
    ///
    /// # Errors
    ///
    /// Returns [`Error::Invalid`] for out-of-range options and
    /// [`Error::SampleTooLarge`] if the catalog cannot supply
    /// `sample_count` distinct locations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use campus_quiz::catalog::Catalog;
    /// use campus_quiz::engine::{Options, QuizEngine, State};
    ///
    /// let engine = QuizEngine::new(Catalog::default(), Options::default()).unwrap();
    /// assert_eq!(engine.state(), State::NotStarted);
    /// assert_eq!(engine.len(), 5);
    /// ```
    pub fn new(catalog: Catalog, options: Options) -> Result<Self, Error> {
        Self::with_rng(catalog, options, fastrand::Rng::new())
    }

    /// Creates an engine drawing its samples from `rng`
    ///
    /// # Errors
    ///
    /// Same as [`QuizEngine::new`].
    pub fn with_rng(
        catalog: Catalog,
        options: Options,
        mut rng: fastrand::Rng,
    ) -> Result<Self, Error> {
        options.validate()?;

        if options.sample_count > catalog.len() {
            return Err(Error::SampleTooLarge {
                requested: options.sample_count,
                available: catalog.len(),
            });
        }

        let session = QuizSession::new(&catalog, options.sample_count, &mut rng);
        log::info!(
            "session {} created with {} questions",
            session.id,
            session.locations.len()
        );

        Ok(Self {
            catalog,
            options,
            rng,
            session,
        })
    }

    /// Renders the whole current view
    ///
    /// Used for the first display and for redrawing a host. Does not start
    /// the clock.
    pub fn start<P: Presenter>(&self, presenter: &P) {
        self.start_at(Instant::now(), presenter);
    }

    /// [`QuizEngine::start`] with an explicit current instant
    pub fn start_at<P: Presenter>(&self, now: Instant, presenter: &P) {
        self.render_status(presenter);
        presenter.render_timer(&self.session.timer.label(now));

        match &self.session.summary {
            Some(summary) => {
                presenter.render_feedback("");
                presenter.show_completion_banner(&summary.banner());
            }
            None => {
                presenter.hide_completion_banner();
                presenter.render_feedback(constants::text::PROMPT);
            }
        }
    }

    /// Judges a guess for the current question
    ///
    /// Returns `None` without touching anything if the session is complete
    /// or the verdict of the previous guess is still on screen.
    pub fn submit_guess<P: Presenter, S: Scheduler>(
        &mut self,
        point: Point,
        presenter: &P,
        scheduler: &mut S,
    ) -> Option<Verdict> {
        self.submit_guess_at(point, Instant::now(), presenter, scheduler)
    }

    /// [`QuizEngine::submit_guess`] with an explicit current instant
    pub fn submit_guess_at<P: Presenter, S: Scheduler>(
        &mut self,
        point: Point,
        now: Instant,
        presenter: &P,
        scheduler: &mut S,
    ) -> Option<Verdict> {
        if self.session.answer_pending {
            log::debug!("guess ignored, a verdict is still on screen");
            return None;
        }

        let Some(location) = self.session.current().cloned() else {
            log::debug!("guess ignored, session {} is complete", self.session.id);
            return None;
        };

        if self.session.timer.start(now) {
            log::info!("session {} started", self.session.id);
            self.schedule_tick(scheduler);
        }

        let verdict = location.judge(point);
        log::debug!("{} for {}", verdict, location.name);

        self.session.counts[verdict] += 1;
        self.session.answer_pending = true;

        presenter.render_feedback(verdict.message());
        presenter.draw_region(&location.bounds, verdict);
        presenter.append_log_entry(&location.name, verdict);
        self.render_status(presenter);

        self.session.attempts.push(Attempt { location, verdict });

        self.session.pending_advance = Some(scheduler.schedule(
            AlarmMessage::Advance {
                session: self.session.id,
                index: self.session.index,
            },
            self.options.advance_delay,
        ));

        Some(verdict)
    }

    /// Moves on from the answered question
    ///
    /// Normally run by the scheduled [`AlarmMessage::Advance`]. Does nothing
    /// and returns `false` unless a guess is pending. Completes the session
    /// after the last question.
    pub fn advance<P: Presenter, S: Scheduler>(
        &mut self,
        presenter: &P,
        scheduler: &mut S,
    ) -> bool {
        self.advance_at(Instant::now(), presenter, scheduler)
    }

    /// [`QuizEngine::advance`] with an explicit current instant
    pub fn advance_at<P: Presenter, S: Scheduler>(
        &mut self,
        now: Instant,
        presenter: &P,
        scheduler: &mut S,
    ) -> bool {
        if !self.session.answer_pending {
            return false;
        }

        if let Some(handle) = self.session.pending_advance.take() {
            scheduler.cancel(handle);
        }

        self.session.index += 1;
        self.session.answer_pending = false;
        self.render_status(presenter);

        if self.session.is_complete() {
            self.finish(now, presenter, scheduler);
        } else {
            presenter.render_feedback(constants::text::PROMPT);
        }

        true
    }

    /// Stops the clock, scores the session and shows the results
    fn finish<P: Presenter, S: Scheduler>(
        &mut self,
        now: Instant,
        presenter: &P,
        scheduler: &mut S,
    ) {
        self.session.timer.stop(now);

        if let Some(handle) = self.session.pending_tick.take() {
            scheduler.cancel(handle);
        }

        let summary = Summary::new(
            self.correct(),
            self.incorrect(),
            self.len(),
            self.session.timer.elapsed(now),
        );

        log::info!(
            "session {} complete: {}",
            self.session.id,
            summary.banner()
        );

        presenter.render_timer(&self.session.timer.label(now));
        presenter.render_feedback("");
        presenter.show_completion_banner(&summary.banner());
        presenter.append_score_entry(&summary);

        self.session.summary = Some(summary);
    }

    /// Discards the session and starts over with a new sample
    ///
    /// Pending alarms of the old session are cancelled first.
    pub fn restart<P: Presenter, S: Scheduler>(&mut self, presenter: &P, scheduler: &mut S) {
        self.restart_at(Instant::now(), presenter, scheduler);
    }

    /// [`QuizEngine::restart`] with an explicit current instant
    pub fn restart_at<P: Presenter, S: Scheduler>(
        &mut self,
        now: Instant,
        presenter: &P,
        scheduler: &mut S,
    ) {
        for handle in [
            self.session.pending_advance.take(),
            self.session.pending_tick.take(),
        ]
        .into_iter()
        .flatten()
        {
            scheduler.cancel(handle);
        }

        let previous = self.session.id;
        self.session = QuizSession::new(&self.catalog, self.options.sample_count, &mut self.rng);
        log::info!("session {previous} replaced by {}", self.session.id);

        presenter.render_timer(&self.session.timer.label(now));
        presenter.clear_regions();
        presenter.clear_log();
        presenter.hide_completion_banner();
        presenter.render_feedback(constants::text::PROMPT);
        self.render_status(presenter);
    }

    /// Handles input from the player
    pub fn receive_message<P: Presenter, S: Scheduler>(
        &mut self,
        message: IncomingMessage,
        presenter: &P,
        scheduler: &mut S,
    ) {
        self.receive_message_at(message, Instant::now(), presenter, scheduler);
    }

    /// [`QuizEngine::receive_message`] with an explicit current instant
    pub fn receive_message_at<P: Presenter, S: Scheduler>(
        &mut self,
        message: IncomingMessage,
        now: Instant,
        presenter: &P,
        scheduler: &mut S,
    ) {
        match message {
            IncomingMessage::Guess(point) => {
                self.submit_guess_at(point, now, presenter, scheduler);
            }
            IncomingMessage::Restart => self.restart_at(now, presenter, scheduler),
        }
    }

    /// Handles an alarm delivered by the scheduler
    ///
    /// Alarms scheduled by an earlier session, or an advance for a question
    /// that is no longer current, are ignored.
    pub fn receive_alarm<P: Presenter, S: Scheduler>(
        &mut self,
        message: AlarmMessage,
        presenter: &P,
        scheduler: &mut S,
    ) {
        self.receive_alarm_at(message, Instant::now(), presenter, scheduler);
    }

    /// [`QuizEngine::receive_alarm`] with an explicit current instant
    pub fn receive_alarm_at<P: Presenter, S: Scheduler>(
        &mut self,
        message: AlarmMessage,
        now: Instant,
        presenter: &P,
        scheduler: &mut S,
    ) {
        match message {
            AlarmMessage::Advance { session, index }
                if session == self.session.id && index == self.session.index =>
            {
                self.session.pending_advance = None;
                self.advance_at(now, presenter, scheduler);
            }
            AlarmMessage::Tick { session } if session == self.session.id => {
                self.session.pending_tick = None;
                if self.session.timer.is_running() {
                    let label = self.session.timer.label(now);
                    log::trace!("tick {label}");
                    presenter.render_timer(&label);
                    self.schedule_tick(scheduler);
                }
            }
            message => log::debug!("stale alarm ignored: {message:?}"),
        }
    }

    /// Returns the message necessary to redraw the current view
    pub fn state_message(&self, now: Instant) -> SyncMessage {
        match (&self.session.summary, self.session.current()) {
            (Some(summary), _) => SyncMessage::Complete {
                session: self.session.id,
                summary: summary.clone(),
            },
            (None, location) => SyncMessage::Question {
                session: self.session.id,
                index: self.session.index,
                count: self.len(),
                question: location.map_or_else(
                    || constants::text::COMPLETE.to_owned(),
                    |l| l.name.clone(),
                ),
                correct: self.correct(),
                incorrect: self.incorrect(),
                timer: self.session.timer.label(now),
                answer_pending: self.session.answer_pending,
            },
        }
    }

    fn schedule_tick<S: Scheduler>(&mut self, scheduler: &mut S) {
        self.session.pending_tick = Some(scheduler.schedule(
            AlarmMessage::Tick {
                session: self.session.id,
            },
            self.options.tick_interval,
        ));
    }

    /// Renders question, progress and counters
    fn render_status<P: Presenter>(&self, presenter: &P) {
        presenter.render_question(
            self.session
                .current()
                .map_or(constants::text::COMPLETE, |l| l.name.as_str()),
        );
        presenter.render_progress(self.session.index.min(self.len()), self.len());
        presenter.render_counts(self.correct(), self.incorrect());
    }
}
