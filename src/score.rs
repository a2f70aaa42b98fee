//! Final scoring of a session
//!
//! A session is worth [`POINTS_PER_QUESTION`] per question. That maximum is
//! scaled by the share of correct answers and by how far the player stayed
//! within [`EXPECTED_SECONDS_PER_QUESTION`] per question.
//!
//! [`POINTS_PER_QUESTION`]: crate::constants::scoring::POINTS_PER_QUESTION
//! [`EXPECTED_SECONDS_PER_QUESTION`]: crate::constants::scoring::EXPECTED_SECONDS_PER_QUESTION

use std::time::Duration;

use serde::Serialize;
use serde_with::{DurationMilliSeconds, serde_as};

use crate::{constants::scoring, timer::format_clock};

/// Computes the score of a finished session
///
/// Returns 0 when no question was answered or when no time elapsed. A
/// perfect session finished within the expected time earns exactly the
/// maximum; the score never exceeds it.
pub fn calculate_score(correct: usize, incorrect: usize, elapsed_seconds: f64) -> u64 {
    let total = correct + incorrect;

    if total == 0 || elapsed_seconds.is_nan() || elapsed_seconds <= 0. {
        return 0;
    }

    let accuracy = correct as f64 / total as f64;
    let expected_time = total as f64 * scoring::EXPECTED_SECONDS_PER_QUESTION;
    let time_factor = (expected_time / elapsed_seconds).min(1.);
    let max_score = (total as u64 * scoring::POINTS_PER_QUESTION) as f64;

    (max_score * accuracy * time_factor).round() as u64
}

/// Results of a completed session
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of correct guesses
    pub correct: usize,
    /// Number of incorrect guesses
    pub incorrect: usize,
    /// Number of questions in the session
    pub total: usize,
    /// Time between the first guess and completion
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    pub elapsed: Duration,
    /// Final score
    pub score: u64,
}

impl Summary {
    /// Scores a session from its counts and elapsed time
    pub fn new(correct: usize, incorrect: usize, total: usize, elapsed: Duration) -> Self {
        Self {
            correct,
            incorrect,
            total,
            elapsed,
            score: calculate_score(correct, incorrect, elapsed.as_secs_f64()),
        }
    }

    /// Text of the completion banner
    pub fn banner(&self) -> String {
        format!(
            "{} Correct, {} Incorrect | Time: {} | Score: {}",
            self.correct,
            self.incorrect,
            format_clock(self.elapsed),
            self.score
        )
    }

    /// Detail line of a score panel entry, e.g. `4/5 correct · 0:07`
    pub fn details(&self) -> String {
        format!(
            "{}/{} correct · {}",
            self.correct,
            self.total,
            format_clock(self.elapsed)
        )
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_no_questions_scores_zero() {
        assert_eq!(calculate_score(0, 0, 0.), 0);
        assert_eq!(calculate_score(0, 0, 2.5), 0);
        assert_eq!(calculate_score(0, 0, 100.), 0);
    }

    #[test]
    fn test_no_elapsed_time_scores_zero() {
        assert_eq!(calculate_score(5, 0, 0.), 0);
        assert_eq!(calculate_score(3, 2, 0.), 0);
        assert_eq!(calculate_score(3, 2, -1.), 0);
        assert_eq!(calculate_score(3, 2, f64::NAN), 0);
    }

    #[test]
    fn test_perfect_in_time() {
        assert_eq!(calculate_score(5, 0, 2.5), 500);
    }

    #[test]
    fn test_perfect_faster_than_expected_is_capped() {
        assert_eq!(calculate_score(5, 0, 0.1), 500);
    }

    #[test]
    fn test_partial_and_slow() {
        assert_eq!(calculate_score(3, 2, 10.), 75);
    }

    #[test]
    fn test_all_wrong_scores_zero() {
        assert_eq!(calculate_score(0, 5, 1.), 0);
    }

    #[test]
    fn test_score_decays_with_time() {
        let scores: Vec<_> = [2.5, 5., 10., 20., 40.]
            .into_iter()
            .map(|t| calculate_score(5, 0, t))
            .collect();

        assert_eq!(scores, vec![500, 250, 125, 63, 31]);
    }

    #[test]
    fn test_score_decays_with_mistakes() {
        let scores: Vec<_> = (0..=5)
            .map(|wrong| calculate_score(5 - wrong, wrong, 2.5))
            .collect();

        assert_eq!(scores, vec![500, 400, 300, 200, 100, 0]);
    }

    #[test]
    fn test_summary_banner() {
        let summary = Summary::new(5, 0, 5, Duration::from_millis(2_500));

        assert_eq!(summary.score, 500);
        assert_eq!(
            summary.banner(),
            "5 Correct, 0 Incorrect | Time: 0:02 | Score: 500"
        );
    }

    #[test]
    fn test_summary_details() {
        let summary = Summary::new(4, 1, 5, Duration::from_secs(67));

        assert_eq!(summary.details(), "4/5 correct · 1:07");
    }

    #[test]
    fn test_summary_serializes_elapsed_as_millis() {
        let summary = Summary::new(3, 2, 5, Duration::from_secs(10));
        let json = serde_json::to_string(&summary).unwrap();

        assert!(json.contains("\"elapsed\":10000"));
        assert!(json.contains("\"score\":75"));
    }
}
