//! Curated test corpus and seeded generators shared across the workspace's
//! own test suites. Not part of the public `cogni` facade; `dev-dependencies`
//! only.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod cases;
mod generators;

pub use cases::{all_cases, find_by_id, find_by_tag, CorpusCase, ARITHMETIC_CASES, CALCULUS_CASES, COMPRESSION_PASSAGES, WORD_PROBLEM_CASES};
pub use generators::{generate_arithmetic_expr_with_seed, generate_arithmetic_exprs, ExprGenOptions};
