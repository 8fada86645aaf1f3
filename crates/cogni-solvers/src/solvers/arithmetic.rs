//! Safe arithmetic expression evaluation via the math parser — never uses
//! host `eval` (spec §4.4 "arithmetic").

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

use cogni_ast::{eval, parse_expression};

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

static EMBEDDED_EXPR: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+(?:\.\d+)?(?:\s*[-+*/^]\s*-?\d+(?:\.\d+)?)+").expect("static regex"));

fn format_value(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn try_whole_text(text: &str) -> Option<ComputeResult> {
    let trimmed = text.trim().trim_end_matches('?').trim_end_matches('=').trim();
    let ast = parse_expression(trimmed)?;
    let value = eval(&ast, &HashMap::new())?;
    Some(ComputeResult::solved("arithmetic", format_value(value), 0.95, 0))
}

fn try_embedded_expression(text: &str) -> Option<ComputeResult> {
    let span = EMBEDDED_EXPR.find(text)?;
    let ast = parse_expression(span.as_str())?;
    let value = eval(&ast, &HashMap::new())?;
    Some(ComputeResult::solved("inline_arithmetic", format_value(value), 0.9, 0))
}

fn solve(text: &str, lower: &str) -> ComputeResult {
    let _ = lower;
    timed(|| try_whole_text(text).or_else(|| try_embedded_expression(text)).unwrap_or_else(ComputeResult::unsolved))
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver { name: "arithmetic", description: "Evaluate arithmetic expressions via the math parser", types: solver_type::ARITHMETIC, priority: 10, solve };

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_a_bare_expression() {
        let result = solve("2 + 2", "2 + 2");
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("4"));
        assert_eq!(result.method, Some("arithmetic"));
    }

    #[test]
    fn evaluates_with_trailing_question_mark() {
        let result = solve("what is 6 * 7?", "what is 6 * 7?");
        assert!(result.solved);
        assert_eq!(result.method, Some("inline_arithmetic"));
        assert_eq!(result.result.as_deref(), Some("42"));
    }

    #[test]
    fn prefers_whole_text_parse_when_it_succeeds() {
        let result = solve("3.5 * 2", "3.5 * 2");
        assert!(result.solved);
        assert_eq!(result.method, Some("arithmetic"));
        assert_eq!(result.result.as_deref(), Some("7"));
    }

    #[test]
    fn prose_without_an_expression_is_unsolved() {
        let result = solve("tell me a story", "tell me a story");
        assert!(!result.solved);
    }

    #[test]
    fn division_by_zero_is_unsolved() {
        let result = solve("1 / 0", "1 / 0");
        assert!(!result.solved);
    }
}
