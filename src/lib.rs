//! # Campus Quiz Library
//!
//! This library provides the core logic of a map-based geography quiz. A
//! session asks for a random selection of campus locations, judges each map
//! click against the location's bounds, and scores accuracy against a time
//! budget. Drawing and timers belong to the host, reached through the
//! [`session::Presenter`] and [`session::Scheduler`] traits.

#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod catalog;
pub mod constants;
pub mod controller;
pub mod engine;
pub mod location;
pub mod sampler;
pub mod score;
pub mod session;
pub mod session_id;
pub mod timer;

#[cfg(test)]
mod testing;

use score::Summary;
use session_id::SessionId;

/// Timed events the engine schedules through its host
///
/// Every alarm names the session that scheduled it. The engine ignores
/// alarms of any other session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmMessage {
    /// Moves on from the question at `index` once its verdict has been shown
    Advance {
        /// Session that scheduled the alarm
        session: SessionId,
        /// Index of the answered question
        index: usize,
    },
    /// Refreshes the timer label
    Tick {
        /// Session that scheduled the alarm
        session: SessionId,
    },
}

/// Full view of the engine, used to redraw a host from scratch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SyncMessage {
    /// A question is on screen
    Question {
        /// Current session
        session: SessionId,
        /// Index of the current question (0-based)
        index: usize,
        /// Number of questions in the session
        count: usize,
        /// Name of the location asked for
        question: String,
        /// Correct guesses so far
        correct: usize,
        /// Incorrect guesses so far
        incorrect: usize,
        /// Timer label
        timer: String,
        /// Whether the verdict of a guess is being shown
        answer_pending: bool,
    },
    /// Every question has been answered
    Complete {
        /// Current session
        session: SessionId,
        /// Final results
        summary: Summary,
    },
}

impl SyncMessage {
    /// Converts the sync message to a JSON string for transmission
    ///
    /// # Panics
    ///
    /// This method panics if serialization fails, which should never happen
    /// with the default JSON serializer for well-formed data.
    pub fn to_message(&self) -> String {
        serde_json::to_string(self).expect("default serializer cannot fail")
    }
}

/// Errors raised while setting up a quiz
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is out of range
    #[error("invalid configuration: {0}")]
    Invalid(#[from] garde::Report),
    /// A location's south edge is above its north edge or its west edge right of its east edge
    #[error("bounds of {0} are inverted")]
    InvertedBounds(String),
    /// More locations requested per session than the catalog holds
    #[error("requested {requested} locations but the catalog only has {available}")]
    SampleTooLarge {
        /// Requested sample count
        requested: usize,
        /// Sampleable locations in the catalog
        available: usize,
    },
    /// The catalog JSON could not be parsed
    #[error("malformed catalog: {0}")]
    Catalog(#[from] serde_json::Error),
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_alarm_message_json() {
        let session = SessionId::new();
        let alarm = AlarmMessage::Advance { session, index: 3 };
        let json = serde_json::to_string(&alarm).unwrap();

        assert!(json.contains("Advance"));
        assert!(json.contains(&session.to_string()));
        assert_eq!(serde_json::from_str::<AlarmMessage>(&json).unwrap(), alarm);
    }

    #[test]
    fn test_sync_message_to_message() {
        let sync = SyncMessage::Complete {
            session: SessionId::new(),
            summary: Summary::new(5, 0, 5, std::time::Duration::from_millis(2_500)),
        };
        let json = sync.to_message();

        assert!(json.contains("Complete"));
        assert!(json.contains("\"score\":500"));
    }

    #[test]
    fn test_error_messages() {
        let error = Error::SampleTooLarge {
            requested: 12,
            available: 9,
        };
        assert_eq!(
            error.to_string(),
            "requested 12 locations but the catalog only has 9"
        );
        assert_eq!(
            Error::InvertedBounds("Lot B5".to_owned()).to_string(),
            "bounds of Lot B5 are inverted"
        );
    }
}
