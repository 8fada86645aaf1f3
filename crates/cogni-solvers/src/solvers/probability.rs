//! Fair-coin independence, stated-probability independence, and hot-hand
//! questions (spec §4.4 "probability"). Excludes expected-value questions.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

static EXPECTED_VALUE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bexpected\s+value\b|\bexpectation\b").expect("static regex"));

static COIN_STREAK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:fair\s+)?coin\b.*\b(heads|tails)\b.*\b(?:in\s+a\s+row|streak|consecutive)\b|flipped\s+\d+\s+(heads|tails)\s+in\s+a\s+row").expect("static regex")
});

static STATED_PROBABILITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:probability|chance)\s+of\s+(?:[\w\s]+\s+)?is\s+(\d+(?:\.\d+)?)\s*%?.*\bindependent\b").expect("static regex"));

static HOT_HAND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bhot\s+hand\b|made\s+\d+\s+(?:shots|free\s+throws)\s+in\s+a\s+row").expect("static regex"));

fn solve_coin_streak(lower: &str) -> Option<ComputeResult> {
    COIN_STREAK_RE.captures(lower)?;
    let answer = if lower.contains('%') || lower.contains("percent") { "50" } else { "0.5" };
    Some(ComputeResult::solved("fair_coin_independence", answer, 0.95, 0))
}

fn solve_stated_independence(lower: &str) -> Option<ComputeResult> {
    let caps = STATED_PROBABILITY_RE.captures(lower)?;
    let stated = &caps[1];
    Some(ComputeResult::solved("probability", format!("{stated}%"), 0.9, 0))
}

fn solve_hot_hand(lower: &str) -> Option<ComputeResult> {
    HOT_HAND_RE.captures(lower)?;
    Some(ComputeResult::solved("probability", "the streak does not change the probability of the next shot", 0.85, 0))
}

fn solve(text: &str, lower: &str) -> ComputeResult {
    let _ = text;
    timed(|| {
        if EXPECTED_VALUE_RE.is_match(lower) {
            return ComputeResult::unsolved();
        }
        solve_coin_streak(lower).or_else(|| solve_stated_independence(lower)).or_else(|| solve_hot_hand(lower)).unwrap_or_else(ComputeResult::unsolved)
    })
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver { name: "probability", description: "Independence of coin flips, stated probabilities, and hot-hand reasoning", types: solver_type::PROBABILITY, priority: 12, solve };

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn coin_after_a_streak_is_always_fifty_percent() {
        let result = solve(
            "A fair coin landed heads 5 times in a row. What's the probability the next flip is heads?",
            "a fair coin landed heads 5 times in a row. what's the probability the next flip is heads?",
        );
        assert!(result.solved);
        assert_eq!(result.method, Some("fair_coin_independence"));
        assert_eq!(result.result.as_deref(), Some("0.5"));
    }

    #[test]
    fn coin_after_a_streak_reports_a_percent_when_the_question_asks_for_one() {
        let result = solve(
            "A fair coin landed heads 5 times in a row. What percent chance is the next flip heads?",
            "a fair coin landed heads 5 times in a row. what percent chance is the next flip heads?",
        );
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("50"));
    }

    #[test]
    fn stated_probability_is_preserved_for_independent_events() {
        let result = solve("The probability of rain is 30%, and each day is independent.", "the probability of rain is 30%, and each day is independent.");
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("30%"));
    }

    #[test]
    fn hot_hand_does_not_change_independent_probability() {
        let result = solve("The player has a hot hand after making 8 free throws in a row.", "the player has a hot hand after making 8 free throws in a row.");
        assert!(result.solved);
    }

    #[test]
    fn expected_value_questions_are_excluded() {
        let result = solve(
            "A fair coin landed heads 5 times in a row, what is the expected value of the next 10 flips?",
            "a fair coin landed heads 5 times in a row, what is the expected value of the next 10 flips?",
        );
        assert!(!result.solved);
    }

    #[test]
    fn unrelated_text_is_unsolved() {
        let result = solve("what a nice day", "what a nice day");
        assert!(!result.solved);
    }
}
