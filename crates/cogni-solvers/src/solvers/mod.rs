//! Individual solver implementations (spec §4.4).

pub mod arithmetic;
pub mod calculus;
pub mod crt_word_problems;
pub mod derivation;
pub mod facts;
pub mod formula;
pub mod logic;
pub mod multi_step_word;
pub mod probability;
pub mod word_problem;

use std::time::Instant;

use crate::types::ComputeResult;

/// Run `f`, stamping the returned `ComputeResult` with the elapsed wall
/// time. Every solver's public entry point is built from this so `time_ms`
/// is never hand-computed twice the same way.
pub(crate) fn timed(f: impl FnOnce() -> ComputeResult) -> ComputeResult {
    let start = Instant::now();
    let mut result = f();
    if result.solved {
        result.time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    }
    result
}
