//! Rationality/irrationality/integer/fraction facts (spec §4.4 "facts").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

/// `n` is a perfect square `k^2` for `k` in `1..=15` (the spec's explicit
/// `sqrt(n)` rationality table, `n` up to `225`).
fn is_perfect_square_up_to_225(n: u32) -> bool {
    (1..=15).any(|k| k * k == n)
}

static SQRT_RATIONALITY: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:is\s+)?sqrt\(\s*(\d+)\s*\)\s*(?:rational|irrational)?").expect("static regex"));
static NAMED_IRRATIONAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bis\s+(pi|e|phi)\s+(?:rational|irrational)\b").expect("static regex"));
static INTEGER_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bis\s+(-?\d+(?:\.\d+)?)\s+an?\s+integer\b").expect("static regex"));
static FRACTION_QUESTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bis\s+(-?\d+)\s*/\s*(-?\d+)\s+(?:a\s+)?(?:rational\s+number|fraction)\b").expect("static regex"));

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

fn solve_sqrt_rationality(lower: &str) -> Option<ComputeResult> {
    let caps = SQRT_RATIONALITY.captures(lower)?;
    if !lower.contains("rational") {
        return None;
    }
    let n: u32 = caps[1].parse().ok()?;
    let answer = if is_perfect_square_up_to_225(n) { "rational" } else { "irrational" };
    Some(ComputeResult::solved("math_fact_rationality", answer, 0.97, 0))
}

fn solve_named_irrational(lower: &str) -> Option<ComputeResult> {
    NAMED_IRRATIONAL.captures(lower)?;
    Some(ComputeResult::solved("math_fact_known_irrational", "irrational", 0.99, 0))
}

fn solve_integer_question(lower: &str) -> Option<ComputeResult> {
    let caps = INTEGER_QUESTION.captures(lower)?;
    let value: f64 = caps[1].parse().ok()?;
    let answer = if value == value.trunc() { "yes" } else { "no" };
    Some(ComputeResult::solved("math_fact_integer", answer, 0.95, 0))
}

fn solve_fraction_question(lower: &str) -> Option<ComputeResult> {
    let caps = FRACTION_QUESTION.captures(lower)?;
    let numerator: i64 = caps[1].parse().ok()?;
    let denominator: i64 = caps[2].parse().ok()?;
    if denominator == 0 {
        return None;
    }
    let divisor = gcd(numerator, denominator).max(1);
    let answer = format!("yes, equal to {}/{}", numerator / divisor, denominator / divisor);
    Some(ComputeResult::solved("math_fact_fraction", answer, 0.95, 0))
}

fn solve(text: &str, lower: &str) -> ComputeResult {
    let _ = text;
    timed(|| {
        solve_sqrt_rationality(lower)
            .or_else(|| solve_named_irrational(lower))
            .or_else(|| solve_integer_question(lower))
            .or_else(|| solve_fraction_question(lower))
            .unwrap_or_else(ComputeResult::unsolved)
    })
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver { name: "facts", description: "Rationality, known irrationals, integer/fraction facts", types: solver_type::FACTS, priority: 5, solve };
