//! Classifier, priority-dispatched solver registry, result cache, and
//! domain filter for local computation (spec §4.4/§4.5).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod cache;
mod classifier;
mod domain;
mod registry;
mod solvers;
mod types;

pub use cache::{clear as clear_cache, get as cache_get, len as cache_len, put as cache_put};
pub use classifier::{classify, ClassifierResult};
pub use domain::{detect_domain, solver_type_for_method};
pub use registry::{all as all_solvers, for_mask as solvers_for_mask, run as run_solvers};
pub use types::{solver_type, ComputeResult, Solver};

use std::time::Instant;

/// Classify `text`, consult the cache, and run the first matching solver
/// that reports success, caching a successful result keyed by the raw text
/// (spec §4.5 "tryLocalCompute").
#[must_use]
pub fn try_compute(text: &str) -> ComputeResult {
    if let Some(cached) = cache_get(text) {
        return cached;
    }
    let start = Instant::now();
    let classified = classify(text);
    if classified.mask == 0 {
        return ComputeResult::unsolved();
    }
    let mut result = registry::run(text, &classified.lower, classified.mask);
    if result.solved {
        result.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        cache_put(text, result.clone());
    }
    result
}

/// Restrict dispatch to solvers compatible with `method` before running
/// (spec §4.5 "contextAwareCompute" domain filter).
#[must_use]
pub fn try_compute_for_method(text: &str, method: &str) -> ComputeResult {
    let mask = solver_type_for_method(method);
    if mask == 0 {
        return try_compute(text);
    }
    if let Some(cached) = cache_get(text) {
        return cached;
    }
    let classified = classify(text);
    let effective_mask = classified.mask & mask;
    if effective_mask == 0 {
        return ComputeResult::unsolved();
    }
    let result = registry::run(text, &classified.lower, effective_mask);
    if result.solved {
        cache_put(text, result.clone());
    }
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn try_compute_solves_plain_arithmetic() {
        let result = try_compute("what is 12 * 12?");
        assert!(result.solved);
    }

    #[test]
    fn try_compute_caches_successful_results() {
        cache_put_clears_between_tests();
        let first = try_compute("what is 9 * 9?");
        assert!(first.solved);
        let second = try_compute("what is 9 * 9?");
        assert_eq!(second.time_ms, 0);
    }

    fn cache_put_clears_between_tests() {
        clear_cache();
    }

    #[test]
    fn try_compute_for_method_restricts_to_the_methods_solver_types() {
        let result = try_compute_for_method("2 + 2", "formula_t1_percentage");
        assert!(!result.solved); // arithmetic text, but method only allows formula tiers
    }

    #[test]
    fn unrelated_prose_is_unsolved() {
        let result = try_compute("what a nice day it is today");
        assert!(!result.solved);
    }

    #[test]
    fn solves_every_curated_solver_case_with_an_expected_answer() {
        for case in cogni_corpus::all_cases() {
            let Some(expected) = case.expected else { continue };
            let result = try_compute(case.input);
            assert!(result.solved, "case {} did not solve", case.id);
            assert_eq!(result.result.as_deref(), Some(expected), "case {}", case.id);
        }
    }
}
