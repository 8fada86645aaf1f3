//! Bridges the classifier's `DERIVATION` bit to the dedicated
//! `cogni-derivation` crate: extract a step chain from free-form text and
//! report whether it verifies (spec §4.4 "derivation", spec §4.2).

use cogni_derivation::{extract_steps, verify_derivation};

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

fn solve(text: &str, lower: &str) -> ComputeResult {
    let _ = lower;
    timed(|| {
        let steps = extract_steps(text);
        if steps.is_empty() {
            return ComputeResult::unsolved();
        }
        let verified = verify_derivation(&steps);
        if verified.valid {
            return ComputeResult::solved("derivation", "valid: every step follows from the previous one", 0.9, 0);
        }
        let Some(step) = verified.invalid_step else { return ComputeResult::unsolved() };
        let detail = verified.steps.get(step - 1);
        let message = match detail {
            Some(step_detail) => format!("invalid at step {step}: {} = {} does not hold", step_detail.lhs, step_detail.rhs),
            None => format!("invalid at step {step}"),
        };
        ComputeResult::solved("derivation", message, 0.85, 0)
    })
}

/// The registry entry for this solver.
pub const SOLVER: Solver = Solver {
    name: "derivation",
    description: "Extract and verify a step-by-step derivation chain from prose",
    types: solver_type::DERIVATION,
    priority: 45,
    solve,
};
