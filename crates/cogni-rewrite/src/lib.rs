//! Transformation registry, simplifier, and equivalence checker over the
//! `cogni-ast` tree (spec component C1's rewrite half).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod compare;
mod registry;
mod rules;

pub use compare::compare;
pub use registry::{applicable_rules, simplify, simplify_with_steps, sorted_rules, SimplifyStep};
pub use rules::{Rule, RULES};
