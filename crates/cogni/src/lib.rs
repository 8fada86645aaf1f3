//! Public facade over the local compute engine and the prompt compression
//! engine. Wires `cogni-solvers`, `cogni-compress`, `cogni-tokencount`, and
//! `cogni-derivation` together behind the entry points described in the
//! external-interfaces section of the design: `try_local_compute`,
//! `extract_and_compute`, `context_aware_compute`, `compress`,
//! `quick_compress`, `needs_compression`, `estimate_tokens`, and the five
//! derivation pass-throughs.
//!
//! Every function here is infallible: input-driven failure modes resolve to
//! an ordinary value (`solved: false`, `{valid: false, ..}`, best-effort),
//! never a `Result`. `cogni-solvers` and `cogni-derivation` keep their own
//! internal error types private to their crates.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod extract;

pub use extract::{context_aware_compute, extract_and_compute, AugmentedResult, ComputeContext, Computation, ContextAwareResult};

pub use cogni_compress::{CompressionAnalysis, CompressionConfig, CompressionResult};
pub use cogni_derivation::{
    derivation_to_latex, detect_common_mistakes, simplify_derivation, suggest_next_step, verify_derivation, DerivationResult,
    DerivationStep, DetectedMistake, LatexOptions, MistakeDetectionResult, NextStepSuggestion, SimplifiedStep,
    SimplifyDerivationResult, StepVerification,
};
pub use cogni_solvers::{ComputeResult, Solver};

use tracing::instrument;

/// Cache-check, classify, and run solvers over `text` (spec "tryLocalCompute").
///
/// When `use_cache` is `false`, the process-wide result cache is bypassed
/// entirely: the answer is neither read from nor written to it.
#[instrument(skip(text))]
#[must_use]
pub fn try_local_compute(text: &str, use_cache: bool) -> ComputeResult {
    if !use_cache {
        let classified = cogni_solvers::classify(text);
        if classified.mask == 0 {
            return ComputeResult::unsolved();
        }
        return cogni_solvers::run_solvers(text, &classified.lower, classified.mask);
    }
    cogni_solvers::try_compute(text)
}

/// Run the full prompt compression pipeline.
#[instrument(skip(context, query, options))]
#[must_use]
pub fn compress(context: &str, query: &str, options: CompressionConfig) -> CompressionResult {
    cogni_compress::compress(context, query, &options)
}

/// Compress `context` to roughly fit within `max_tokens`, returning just the
/// resulting string.
#[must_use]
pub fn quick_compress(context: &str, query: &str, max_tokens: usize) -> String {
    cogni_compress::quick_compress(context, query, Some(max_tokens))
}

/// Decide whether `text` is worth compressing, optionally biased by `query`.
#[must_use]
pub fn needs_compression(text: &str, query: Option<&str>) -> CompressionAnalysis {
    cogni_compress::needs_compression(text, query.unwrap_or(""))
}

/// Estimate `text`'s token count without invoking a real BPE tokenizer.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    cogni_tokencount::estimate_tokens(text)
}
