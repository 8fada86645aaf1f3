//! Derivation verification (spec §4.2 "Verify derivation").

use cogni_error::DerivationError;
use cogni_rewrite::compare;

use crate::step::DerivationStep;

/// The per-step result of verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepVerification {
    /// One-based step index, matching [`DerivationError`]'s `step` field.
    pub step: usize,
    /// The step as submitted.
    pub lhs: String,
    /// The step's right-hand side.
    pub rhs: String,
    /// Whether this step, considered alone, is a valid equivalence.
    pub valid: bool,
}

/// Result of verifying a whole derivation chain.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivationResult {
    /// Whether the entire chain verified with no failures.
    pub valid: bool,
    /// Per-step detail, in order.
    pub steps: Vec<StepVerification>,
    /// One-based index of the first failing step, if any.
    pub invalid_step: Option<usize>,
    /// The specific failure, discriminating "not an equivalence" from
    /// "doesn't continue the previous step".
    pub error: Option<DerivationError>,
}

/// Verify a derivation chain.
///
/// For each step `i` (one-based), requires:
///   (a) `compare(lhs_i, rhs_i)` — the step is itself a valid equivalence.
///   (b) for `i > 1`, `compare(rhs_{i-1}, lhs_i)` — the chain doesn't jump.
///
/// The first failing check wins; everything after it is still reported in
/// `steps` (each marked `valid` independently) but `invalid_step`/`error`
/// point at the earliest failure.
#[must_use]
pub fn verify_derivation(steps: &[DerivationStep]) -> DerivationResult {
    let mut reported = Vec::with_capacity(steps.len());
    let mut invalid_step = None;
    let mut error = None;

    for (index, step) in steps.iter().enumerate() {
        let one_based = index + 1;
        let step_valid = compare(&step.lhs, &step.rhs);
        reported.push(StepVerification { step: one_based, lhs: step.lhs.clone(), rhs: step.rhs.clone(), valid: step_valid });

        if invalid_step.is_some() {
            continue;
        }
        if !step_valid {
            invalid_step = Some(one_based);
            error = Some(DerivationError::InvalidTransformation { step: one_based, lhs: step.lhs.clone(), rhs: step.rhs.clone() });
            continue;
        }
        if index > 0 {
            let prev_rhs = &steps[index - 1].rhs;
            if !compare(prev_rhs, &step.lhs) {
                invalid_step = Some(one_based);
                error = Some(DerivationError::Discontinuity { step: one_based, prev_rhs: prev_rhs.clone(), lhs: step.lhs.clone() });
            }
        }
    }

    DerivationResult { valid: invalid_step.is_none(), steps: reported, invalid_step, error }
}
