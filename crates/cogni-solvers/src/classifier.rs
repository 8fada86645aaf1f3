//! Pure-function classifier: runs a table of cheap guard predicates over the
//! input and OR-accumulates the solver-type bits whose guard fired (spec
//! §4.5).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{solver_type, CharCounts, ClassifierResult};

type Guard = fn(text: &str, lower: &str, chars: &CharCounts) -> bool;

struct ClassifierRule {
    mask: u32,
    guard: Guard,
}

static ARITHMETIC_EXPR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9][\s0-9+\-*/^().]*[0-9)]").expect("static regex"));
static FACTS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(rational|irrational|sqrt\(|is\s+\d+\s+(prime|even|odd))\b").expect("static regex"));
static PROBABILITY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(probability|chance|odds|coin|heads|tails|likely)\b").expect("static regex"));
static LOGIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(if\s+.*then|all\s+\w+\s+are|some\s+\w+\s+are|therefore|implies|contrapositive|modus)\b").expect("static regex"));
static FORMULA_T1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(percent|factorial|modulo|mod\b|prime|fibonacci)\b|!|%").expect("static regex"));
static FORMULA_T2_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bsqrt\b|\^|\bgcd\b|\blcm\b|\bpower\b").expect("static regex"));
static FORMULA_T3_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\blog\b|\bln\b|quadratic|\bcombinations?\b|\bpermutations?\b|last\s+digit").expect("static regex"));
static FORMULA_T4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)pythagorean|trailing\s+zero|geometric\s+series|determinant|compound\s+interest").expect("static regex"));
static WORD_PROBLEM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(bat\s+and\s+ball|lily\s?pad|widget|harmonic\s+mean|catch\s+up|sock\s+drawer|age[sd]?\b|train|years\s+old)\b").expect("static regex"));
static MULTI_STEP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bhas\s+\d+|twice\s+as\s+many|half\s+as\s+many|more\s+than|less\s+than").expect("static regex"));
static CALCULUS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(derivative|integral|d/dx|differentiate|integrate)\b").expect("static regex"));
static DERIVATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(verify|prove|show\s+that|derivation)\b").expect("static regex"));

static RULES: &[ClassifierRule] = &[
    ClassifierRule { mask: solver_type::ARITHMETIC, guard: |text, _, chars| chars.digit > 0 && ARITHMETIC_EXPR.is_match(text) },
    ClassifierRule { mask: solver_type::FACTS, guard: |_, lower, _| FACTS_RE.is_match(lower) },
    ClassifierRule { mask: solver_type::PROBABILITY, guard: |_, lower, _| PROBABILITY_RE.is_match(lower) },
    ClassifierRule { mask: solver_type::LOGIC, guard: |_, lower, _| LOGIC_RE.is_match(lower) },
    ClassifierRule { mask: solver_type::FORMULA_T1, guard: |_, lower, chars| FORMULA_T1_RE.is_match(lower) || chars.percent > 0 || chars.bang > 0 },
    ClassifierRule { mask: solver_type::FORMULA_T2, guard: |_, lower, chars| FORMULA_T2_RE.is_match(lower) || chars.caret > 0 },
    ClassifierRule { mask: solver_type::FORMULA_T3, guard: |_, lower, _| FORMULA_T3_RE.is_match(lower) },
    ClassifierRule { mask: solver_type::FORMULA_T4, guard: |_, lower, _| FORMULA_T4_RE.is_match(lower) },
    ClassifierRule { mask: solver_type::WORD_PROBLEM, guard: |_, lower, _| WORD_PROBLEM_RE.is_match(lower) },
    ClassifierRule { mask: solver_type::MULTI_STEP, guard: |_, lower, _| MULTI_STEP_RE.is_match(lower) },
    ClassifierRule { mask: solver_type::CALCULUS, guard: |_, lower, _| CALCULUS_RE.is_match(lower) },
    ClassifierRule { mask: solver_type::DERIVATION, guard: |_, lower, _| DERIVATION_RE.is_match(lower) },
];

/// Classify `text` into the OR of every solver-type bit whose guard rule
/// fired. If no rule fires but the text contains a digit, falls back to
/// `ARITHMETIC` alone.
#[must_use]
pub fn classify(text: &str) -> ClassifierResult {
    let lower = text.to_lowercase();
    let chars = CharCounts::scan(text);
    let mut mask = 0u32;
    for rule in RULES {
        if (rule.guard)(text, &lower, &chars) {
            mask |= rule.mask;
        }
    }
    if mask == 0 && chars.digit > 0 {
        mask = solver_type::ARITHMETIC;
    }
    ClassifierResult { mask, lower, chars }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn plain_arithmetic_sets_arithmetic_bit() {
        let result = classify("2 + 2");
        assert_ne!(result.mask & solver_type::ARITHMETIC, 0);
    }

    #[test]
    fn probability_language_sets_probability_bit() {
        let result = classify("What is the probability of flipping heads?");
        assert_ne!(result.mask & solver_type::PROBABILITY, 0);
    }

    #[test]
    fn logic_language_sets_logic_bit() {
        let result = classify("If it rains then the ground is wet. Therefore the ground is wet.");
        assert_ne!(result.mask & solver_type::LOGIC, 0);
    }

    #[test]
    fn derivative_language_sets_calculus_bit() {
        let result = classify("Find the derivative of x^2");
        assert_ne!(result.mask & solver_type::CALCULUS, 0);
    }

    #[test]
    fn prose_with_no_digits_falls_back_to_zero_mask() {
        let result = classify("the weather is nice today");
        assert_eq!(result.mask, 0);
    }

    #[test]
    fn prose_with_a_digit_falls_back_to_arithmetic() {
        let result = classify("I have 3 apples and like them");
        assert_eq!(result.mask, solver_type::ARITHMETIC);
    }
}
