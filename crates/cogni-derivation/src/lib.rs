//! Step extraction, verification, mistake detection, simplification, and
//! LaTeX export for worked algebraic derivations (spec component C2).
//!
//! Built on top of `cogni-ast`'s parser/evaluator and `cogni-rewrite`'s
//! simplifier/comparator; this crate adds nothing to the expression
//! language itself, only the derivation-chain layer above it.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod derivative;
mod extract;
mod latex;
mod mistakes;
mod simplify_derivation;
mod step;
mod suggest;
mod verify;

pub use extract::extract_steps;
pub use latex::{derivation_to_latex, expression_to_latex, LatexEnvironment, LatexOptions};
pub use mistakes::{detect_common_mistakes, DetectedMistake, MistakeDetectionResult, MistakeKind};
pub use simplify_derivation::{simplify_derivation, SimplifiedStep, SimplifyDerivationResult};
pub use step::DerivationStep;
pub use suggest::{suggest_next_step, suggest_simplification_path, NextStepSuggestion, SimplificationPath, SuggestedRule};
pub use verify::{verify_derivation, DerivationResult, StepVerification};
