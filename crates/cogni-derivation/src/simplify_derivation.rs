//! Simplifies each side of a derivation chain and prunes steps that add
//! nothing (spec §4.2 "Simplify derivation").

use cogni_ast::parse_expression;
use cogni_rewrite::simplify;

use crate::step::DerivationStep;

/// One step after both sides have been independently simplified.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifiedStep {
    /// The step as originally submitted.
    pub original: DerivationStep,
    /// `lhs` in canonical form (unchanged text if it didn't parse).
    pub simplified_lhs: String,
    /// `rhs` in canonical form (unchanged text if it didn't parse).
    pub simplified_rhs: String,
    /// Whether the two simplified sides are identical — the step, as
    /// written, performs no transformation at all.
    pub is_identity: bool,
}

/// Result of simplifying and pruning a derivation chain.
#[derive(Debug, Clone, PartialEq)]
pub struct SimplifyDerivationResult {
    /// Every input step, simplified, in original order (nothing dropped here).
    pub steps: Vec<SimplifiedStep>,
    /// The pruned chain: steps that made no progress are removed.
    pub cleaned: Vec<DerivationStep>,
    /// Human-readable explanation for each pruning decision, in order.
    pub reasons: Vec<String>,
}

fn simplified_text(raw: &str) -> (String, Option<cogni_ast::Node>) {
    match parse_expression(raw) {
        Some(ast) => {
            let canonical = simplify(&ast);
            let text = canonical.to_string();
            (text, Some(canonical))
        }
        None => (raw.to_string(), None),
    }
}

/// Simplify each step's `lhs`/`rhs` independently, mark identity steps, then
/// prune steps that make no progress relative to the chain's running
/// right-hand side.
#[must_use]
pub fn simplify_derivation(steps: &[DerivationStep]) -> SimplifyDerivationResult {
    let mut reported = Vec::with_capacity(steps.len());
    for step in steps {
        let (simplified_lhs, lhs_ast) = simplified_text(&step.lhs);
        let (simplified_rhs, rhs_ast) = simplified_text(&step.rhs);
        let is_identity = match (&lhs_ast, &rhs_ast) {
            (Some(l), Some(r)) => l == r,
            _ => simplified_lhs == simplified_rhs,
        };
        reported.push(SimplifiedStep { original: step.clone(), simplified_lhs, simplified_rhs, is_identity });
    }

    let mut cleaned = Vec::new();
    let mut reasons = Vec::new();
    let mut last_kept_rhs: Option<String> = None;

    for (index, step) in reported.iter().enumerate() {
        let one_based = index + 1;
        if step.is_identity {
            reasons.push(format!(
                "step {one_based} removed: both sides simplify to the same thing ({})",
                step.simplified_lhs
            ));
            continue;
        }
        if last_kept_rhs.as_deref() == Some(step.simplified_rhs.as_str()) {
            reasons.push(format!("step {one_based} removed: right-hand side is unchanged from the previous kept step"));
            continue;
        }
        last_kept_rhs = Some(step.simplified_rhs.clone());
        cleaned.push(step.original.clone());
    }

    SimplifyDerivationResult { steps: reported, cleaned, reasons }
}
