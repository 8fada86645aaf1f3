//! "What should the next step be?" and "how would this simplify?" helpers
//! (spec §4.2 "Suggest next step" / "Simplification path").

use cogni_ast::parse_expression;
use cogni_rewrite::{applicable_rules, simplify_with_steps, SimplifyStep};

use crate::step::DerivationStep;

/// A transformation registry entry that matched somewhere in an expression,
/// stripped down to what a caller needs to describe it (no function
/// pointers leak out of this crate's public surface).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestedRule {
    /// The rule's stable name (e.g. `"combine_like_terms"`).
    pub name: &'static str,
    /// Human-readable description of the transformation.
    pub description: &'static str,
    /// Its priority in the registry (higher runs first).
    pub priority: u8,
}

/// Result of asking "what transformation could come next?".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextStepSuggestion {
    /// Whether the last step's right-hand side parsed at all.
    pub parsed: bool,
    /// The expression the suggestion was computed from (the chain's final
    /// right-hand side).
    pub from: String,
    /// The single highest-priority applicable rule, if any.
    pub top: Option<SuggestedRule>,
    /// Every applicable rule, highest priority first.
    pub applicable: Vec<SuggestedRule>,
}

/// Suggest the next transformation to apply to a derivation chain's final
/// right-hand side.
#[must_use]
pub fn suggest_next_step(steps: &[DerivationStep]) -> NextStepSuggestion {
    let Some(last) = steps.last() else {
        return NextStepSuggestion { parsed: false, from: String::new(), top: None, applicable: Vec::new() };
    };
    let Some(ast) = parse_expression(&last.rhs) else {
        return NextStepSuggestion { parsed: false, from: last.rhs.clone(), top: None, applicable: Vec::new() };
    };
    let applicable: Vec<SuggestedRule> =
        applicable_rules(&ast).into_iter().map(|rule| SuggestedRule { name: rule.name, description: rule.description, priority: rule.priority }).collect();
    let top = applicable.first().cloned();
    NextStepSuggestion { parsed: true, from: last.rhs.clone(), top, applicable }
}

/// A full bounded simplification run over a single expression, with its
/// step-by-step log.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplificationPath {
    /// Whether `expr` parsed.
    pub parsed: bool,
    /// The steps taken, in order (empty if nothing applied or `expr` didn't parse).
    pub steps: Vec<SimplifyStep>,
}

/// Run the bounded fixed-point simplifier on a single expression, recording
/// every step taken (spec §4.2 "Simplification path").
#[must_use]
pub fn suggest_simplification_path(expr: &str) -> SimplificationPath {
    let Some(ast) = parse_expression(expr) else {
        return SimplificationPath { parsed: false, steps: Vec::new() };
    };
    let (_, steps) = simplify_with_steps(&ast);
    SimplificationPath { parsed: true, steps }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn suggests_combine_like_terms_for_x_plus_x() {
        let steps = vec![DerivationStep::new("2*x", "x + x")];
        let suggestion = suggest_next_step(&steps);
        assert!(suggestion.parsed);
        assert_eq!(suggestion.top.as_ref().map(|r| r.name), Some("combine_like_terms"));
    }

    #[test]
    fn no_applicable_rule_for_an_already_simplified_variable() {
        let steps = vec![DerivationStep::new("1", "x")];
        let suggestion = suggest_next_step(&steps);
        assert!(suggestion.parsed);
        assert!(suggestion.applicable.is_empty());
        assert!(suggestion.top.is_none());
    }

    #[test]
    fn unparseable_rhs_reports_not_parsed() {
        let steps = vec![DerivationStep::new("x", "2 +")];
        let suggestion = suggest_next_step(&steps);
        assert!(!suggestion.parsed);
    }

    #[test]
    fn empty_chain_has_no_suggestion() {
        let suggestion = suggest_next_step(&[]);
        assert!(!suggestion.parsed);
        assert!(suggestion.applicable.is_empty());
    }

    #[test]
    fn simplification_path_records_each_step() {
        let path = suggest_simplification_path("2*(x+3)");
        assert!(path.parsed);
        assert!(!path.steps.is_empty());
        assert_eq!(path.steps[0].transformation, "distribute");
    }
}
