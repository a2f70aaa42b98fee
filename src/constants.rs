//! Configuration constants for the campus quiz
//!
//! This module contains the default pacing and scoring parameters of a
//! quiz session, the limits used to validate options and catalogs, and the
//! fixed texts shown to the player.

/// Session pacing and sampling constants
pub mod session {
    /// Number of catalog locations sampled per session (the required location comes on top)
    pub const SAMPLE_COUNT: usize = 4;
    /// Smallest sample count an engine accepts
    pub const MIN_SAMPLE_COUNT: usize = 1;
    /// Largest sample count an engine accepts
    pub const MAX_SAMPLE_COUNT: usize = 32;
    /// Milliseconds a verdict stays visible before the next question loads
    pub const ADVANCE_DELAY_MS: u64 = 1_000;
    /// Smallest advance delay in milliseconds
    pub const MIN_ADVANCE_DELAY_MS: u64 = 0;
    /// Largest advance delay in milliseconds
    pub const MAX_ADVANCE_DELAY_MS: u64 = 10_000;
    /// Milliseconds between two refreshes of the timer label
    pub const TICK_INTERVAL_MS: u64 = 1_000;
    /// Smallest tick interval in milliseconds
    pub const MIN_TICK_INTERVAL_MS: u64 = 100;
    /// Largest tick interval in milliseconds
    pub const MAX_TICK_INTERVAL_MS: u64 = 10_000;
}

/// Scoring constants
pub mod scoring {
    /// Seconds a player is expected to need per question
    pub const EXPECTED_SECONDS_PER_QUESTION: f64 = 0.5;
    /// Points a question is worth when answered correctly and in time
    pub const POINTS_PER_QUESTION: u64 = 100;
}

/// Catalog validation constants
pub mod catalog {
    /// Maximum length of a location name in characters
    pub const MAX_NAME_LENGTH: usize = 100;
    /// Maximum number of sampleable locations in a catalog
    pub const MAX_LOCATIONS: usize = 256;
}

/// Texts rendered through the presenter
pub mod text {
    /// Feedback shown while waiting for a guess
    pub const PROMPT: &str = "Double-click the map to answer.";
    /// Feedback and log message for a correct guess
    pub const CORRECT: &str = "Your answer is correct!!";
    /// Feedback and log message for an incorrect guess
    pub const INCORRECT: &str = "Sorry wrong location.";
    /// Question text once every location has been answered
    pub const COMPLETE: &str = "Quiz Complete";
}
