//! Propositional/syllogistic pattern detectors: modus ponens/tollens, valid
//! and invalid syllogism (undistributed middle), XOR-violation,
//! affirming-the-consequent, denying-the-antecedent, De Morgan,
//! contrapositive (spec §4.4 "logic"). Every pattern here is a single-pass
//! regex, not a general theorem prover.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

static IF_THEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)if\s+(.+?)\s*,?\s*then\s+(.+?)[.\n]").expect("static regex"));
static CONTRAPOSITIVE_ASK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bcontrapositive\b").expect("static regex"));
static DE_MORGAN_AND: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)not\s*\(\s*(.+?)\s+and\s+(.+?)\s*\)").expect("static regex"));
static DE_MORGAN_OR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)not\s*\(\s*(.+?)\s+or\s+(.+?)\s*\)").expect("static regex"));
static XOR_CONSTRAINT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)either\s+.+?\s+or\s+.+?,?\s*but\s+not\s+both").expect("static regex"));
static BOTH_ASSERTED: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\bboth\b.*\b(?:true|happened|occurred|are\s+the\s+case)\b").expect("static regex"));
static ALL_ARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)all\s+(\w+)\s+are\s+(\w+)").expect("static regex"));

fn negation_of(clause: &str) -> String {
    format!("not {}", clause.trim())
}

fn contains_clause(haystack: &str, clause: &str) -> bool {
    haystack.contains(clause.trim())
}

fn contains_negated_clause(haystack: &str, clause: &str) -> bool {
    haystack.contains(&negation_of(clause)) || haystack.contains(&format!("{} is false", clause.trim()))
}

/// Given `if P then Q` plus a second assertion, classify the argument form.
fn solve_conditional_argument(lower: &str) -> Option<ComputeResult> {
    let caps = IF_THEN.captures(lower)?;
    let antecedent = caps[1].trim();
    let consequent = caps[2].trim();
    let rest = &lower[caps.get(0)?.end()..];

    if contains_negated_clause(rest, consequent) {
        return Some(ComputeResult::solved("logic", format!("valid (modus tollens): {}", negation_of(antecedent)), 0.9, 0));
    }
    if contains_negated_clause(rest, antecedent) {
        return Some(ComputeResult::solved("logic", "invalid: denying the antecedent — the consequent could still hold for another reason", 0.85, 0));
    }
    if contains_clause(rest, consequent) {
        return Some(ComputeResult::solved("logic", "invalid: affirming the consequent — the antecedent isn't the only way to reach the consequent", 0.85, 0));
    }
    if contains_clause(rest, antecedent) {
        return Some(ComputeResult::solved("logic", format!("valid (modus ponens): {consequent}"), 0.9, 0));
    }
    None
}

fn solve_contrapositive(lower: &str) -> Option<ComputeResult> {
    if !CONTRAPOSITIVE_ASK.is_match(lower) {
        return None;
    }
    let caps = IF_THEN.captures(lower)?;
    let antecedent = caps[1].trim();
    let consequent = caps[2].trim();
    Some(ComputeResult::solved("logic", format!("if not {consequent} then not {antecedent}"), 0.9, 0))
}

fn solve_de_morgan(lower: &str) -> Option<ComputeResult> {
    if let Some(caps) = DE_MORGAN_AND.captures(lower) {
        return Some(ComputeResult::solved("logic", format!("not {} or not {}", caps[1].trim(), caps[2].trim()), 0.9, 0));
    }
    if let Some(caps) = DE_MORGAN_OR.captures(lower) {
        return Some(ComputeResult::solved("logic", format!("not {} and not {}", caps[1].trim(), caps[2].trim()), 0.9, 0));
    }
    None
}

fn solve_xor_violation(lower: &str) -> Option<ComputeResult> {
    XOR_CONSTRAINT.find(lower)?;
    if BOTH_ASSERTED.is_match(lower) {
        return Some(ComputeResult::solved("logic", "invalid: violates the stated exclusive-or constraint (both can't hold)", 0.85, 0));
    }
    None
}

fn solve_syllogism(lower: &str) -> Option<ComputeResult> {
    let mut premises = ALL_ARE.captures_iter(lower);
    let first = premises.next()?;
    let second = premises.next()?;
    let (subj1, pred1) = (first[1].to_string(), first[2].to_string());
    let (subj2, pred2) = (second[1].to_string(), second[2].to_string());

    if pred1 == subj2 {
        return Some(ComputeResult::solved("logic", format!("valid: all {subj1} are {pred2}"), 0.9, 0));
    }
    if pred1 == pred2 && subj1 != subj2 {
        return Some(ComputeResult::solved("logic", "invalid: undistributed middle — sharing a predicate doesn't relate the two subjects", 0.85, 0));
    }
    None
}

fn solve(text: &str, lower: &str) -> ComputeResult {
    let _ = text;
    timed(|| {
        solve_contrapositive(lower)
            .or_else(|| solve_de_morgan(lower))
            .or_else(|| solve_xor_violation(lower))
            .or_else(|| solve_conditional_argument(lower))
            .or_else(|| solve_syllogism(lower))
            .unwrap_or_else(ComputeResult::unsolved)
    })
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver { name: "logic", description: "Propositional argument-form and categorical-syllogism patterns", types: solver_type::LOGIC, priority: 15, solve };

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_modus_ponens() {
        let lower = "if it rains then the ground is wet. it rains.";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert!(result.result.as_deref().unwrap().contains("modus ponens"));
    }

    #[test]
    fn recognizes_modus_tollens() {
        let lower = "if it rains then the ground is wet. the ground is wet is false.";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert!(result.result.as_deref().unwrap().contains("modus tollens"));
    }

    #[test]
    fn recognizes_affirming_the_consequent() {
        let lower = "if it rains then the ground is wet. the ground is wet.";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert!(result.result.as_deref().unwrap().contains("affirming the consequent"));
    }

    #[test]
    fn recognizes_denying_the_antecedent() {
        let lower = "if it rains then the ground is wet. it rains is false.";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert!(result.result.as_deref().unwrap().contains("denying the antecedent"));
    }

    #[test]
    fn computes_the_contrapositive() {
        let lower = "if it rains then the ground is wet. what is the contrapositive?";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("if not the ground is wet then not it rains"));
    }

    #[test]
    fn applies_de_morgan_to_a_conjunction() {
        let lower = "not (it rains and it snows)";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("not it rains or not it snows"));
    }

    #[test]
    fn detects_an_undistributed_middle() {
        let lower = "all cats are mammals. all dogs are mammals. therefore all cats are dogs.";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert!(result.result.as_deref().unwrap().contains("undistributed middle"));
    }

    #[test]
    fn validates_a_chained_syllogism() {
        let lower = "all cats are mammals. all mammals are animals.";
        let result = solve(lower, lower);
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("valid: all cats are animals"));
    }

    #[test]
    fn unrelated_text_is_unsolved() {
        let result = solve("what a nice day", "what a nice day");
        assert!(!result.solved);
    }
}
