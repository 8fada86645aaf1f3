//! Multi-entity word problems: extract named quantities and their
//! relationships, resolve the resulting dependency graph by fixed-point
//! iteration, then answer a specific-entity or total question (spec §4.4
//! "multi-step-word").

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use cogni_error::IterationBudget;

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

#[derive(Debug, Clone)]
enum Relation {
    /// `name` has a literal value.
    Direct { name: String, value: f64 },
    /// `name` has `multiplier * other`.
    Multiple { name: String, multiplier: f64, other: String },
    /// `name` has `other + delta` (`delta` negative for "less than").
    Offset { name: String, other: String, delta: f64 },
}

static DIRECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([A-Za-z]+)\s+has\s+(\d+(?:\.\d+)?)\b(?!\s*(?:times|as\s+many))").expect("static regex"));
static MULTIPLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([A-Za-z]+)\s+has\s+(twice|half|triple)\s+as\s+many\s+as\s+([A-Za-z]+)").expect("static regex"));
static OFFSET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([A-Za-z]+)\s+has\s+(\d+(?:\.\d+)?)\s+(more|less)\s+than\s+([A-Za-z]+)").expect("static regex"));
static SPECIFIC_QUESTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)how\s+many\s+does\s+([A-Za-z]+)\s+have").expect("static regex"));
static TOTAL_QUESTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)how\s+many.*?(?:total|altogether|in\s+all|combined)").expect("static regex"));

fn multiplier_for(word: &str) -> f64 {
    match word.to_lowercase().as_str() {
        "twice" => 2.0,
        "half" => 0.5,
        "triple" => 3.0,
        _ => 1.0,
    }
}

fn extract_relations(text: &str) -> Vec<Relation> {
    let mut relations = Vec::new();
    for caps in MULTIPLE_RE.captures_iter(text) {
        relations.push(Relation::Multiple { name: caps[1].to_string(), multiplier: multiplier_for(&caps[2]), other: caps[3].to_string() });
    }
    for caps in OFFSET_RE.captures_iter(text) {
        let Ok(amount) = caps[2].parse::<f64>() else { continue };
        let delta = if caps[3].eq_ignore_ascii_case("less") { -amount } else { amount };
        relations.push(Relation::Offset { name: caps[1].to_string(), other: caps[4].to_string(), delta });
    }
    // Direct assignments are only extracted for names not also the subject
    // of a relative relation (a "has twice as many" sentence never also
    // contains a literal count for that same name).
    let relational_names: std::collections::HashSet<&str> =
        relations.iter().map(|r| match r { Relation::Multiple { name, .. } | Relation::Offset { name, .. } => name.as_str() }).collect();
    for caps in DIRECT_RE.captures_iter(text) {
        if relational_names.contains(&caps[1]) {
            continue;
        }
        let Ok(value) = caps[2].parse::<f64>() else { continue };
        relations.push(Relation::Direct { name: caps[1].to_string(), value });
    }
    relations
}

/// Resolve every entity's value by repeatedly applying relations whose
/// dependencies are already known, up to the standard rounds budget.
fn resolve(relations: &[Relation]) -> HashMap<String, f64> {
    let mut known: HashMap<String, f64> = HashMap::new();
    let mut budget = IterationBudget::rounds();
    while budget.tick() {
        let mut progressed = false;
        for relation in relations {
            match relation {
                Relation::Direct { name, value } => {
                    if known.insert(name.clone(), *value).is_none() {
                        progressed = true;
                    }
                }
                Relation::Multiple { name, multiplier, other } => {
                    if !known.contains_key(name) {
                        if let Some(&other_value) = known.get(other) {
                            known.insert(name.clone(), multiplier * other_value);
                            progressed = true;
                        }
                    }
                }
                Relation::Offset { name, other, delta } => {
                    if !known.contains_key(name) {
                        if let Some(&other_value) = known.get(other) {
                            known.insert(name.clone(), other_value + delta);
                            progressed = true;
                        }
                    }
                }
            }
        }
        if !progressed {
            break;
        }
    }
    known
}

fn format_value(value: f64) -> String {
    if value == value.trunc() && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

fn solve(text: &str, lower: &str) -> ComputeResult {
    timed(|| {
        let relations = extract_relations(text);
        if relations.is_empty() {
            return ComputeResult::unsolved();
        }
        let known = resolve(&relations);
        if let Some(caps) = SPECIFIC_QUESTION_RE.captures(lower) {
            let name = &caps[1];
            let matched_name = known.keys().find(|k| k.eq_ignore_ascii_case(name));
            if let Some(matched_name) = matched_name {
                return ComputeResult::solved("multi_step_word", format_value(known[matched_name]), 0.85, 0);
            }
            return ComputeResult::unsolved();
        }
        if TOTAL_QUESTION_RE.is_match(lower) {
            if known.len() < relations.len() {
                return ComputeResult::unsolved(); // not every entity resolved
            }
            let total: f64 = known.values().sum();
            return ComputeResult::solved("multi_step_word", format_value(total), 0.85, 0);
        }
        ComputeResult::unsolved()
    })
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver {
    name: "multi_step_word",
    description: "Resolve named quantities linked by relative/offset relations via fixed-point iteration",
    types: solver_type::MULTI_STEP,
    priority: 40,
    solve,
};

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn resolves_a_direct_and_a_multiple_relation() {
        let text = "Alice has 4 apples. Bob has twice as many as Alice. How many does Bob have?";
        let result = solve(text, &text.to_lowercase());
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("8"));
    }

    #[test]
    fn resolves_an_offset_relation() {
        let text = "Alice has 4 apples. Bob has 3 more than Alice. How many does Bob have?";
        let result = solve(text, &text.to_lowercase());
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("7"));
    }

    #[test]
    fn answers_a_total_question() {
        let text = "Alice has 4 apples. Bob has twice as many as Alice. How many apples are there in total?";
        let result = solve(text, &text.to_lowercase());
        assert!(result.solved);
        assert_eq!(result.result.as_deref(), Some("12"));
    }

    #[test]
    fn unresolvable_chain_is_unsolved() {
        let text = "Bob has twice as many as Carol. How many does Bob have?";
        let result = solve(text, &text.to_lowercase());
        assert!(!result.solved);
    }

    #[test]
    fn unrelated_text_is_unsolved() {
        let result = solve("what a nice day", "what a nice day");
        assert!(!result.solved);
    }
}
