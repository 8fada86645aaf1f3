//! The solver registry: priority-sorted dispatch over every registered
//! solver, filtered by classifier mask (spec §4.4/§4.5).

use once_cell::sync::Lazy;

use crate::solvers;
use crate::types::{ComputeResult, Solver};

/// Every solver this crate knows about, declaration order (dispatch order
/// is by `priority`, not this order).
pub static SOLVERS: &[Solver] = &[
    solvers::facts::SOLVER,
    solvers::arithmetic::SOLVER,
    solvers::probability::SOLVER,
    solvers::logic::SOLVER,
    solvers::formula::SOLVER,
    solvers::crt_word_problems::SOLVER,
    solvers::word_problem::SOLVER,
    solvers::multi_step_word::SOLVER,
    solvers::calculus::SOLVER,
    solvers::derivation::SOLVER,
];

/// `SOLVERS`, sorted by ascending priority (lower runs first), computed once.
#[must_use]
pub fn all() -> &'static [Solver] {
    static SORTED: Lazy<Vec<Solver>> = Lazy::new(|| {
        let mut sorted: Vec<Solver> = SOLVERS.to_vec();
        sorted.sort_by_key(|s| s.priority);
        sorted
    });
    &SORTED
}

/// Every solver whose `types` mask intersects `mask`, already in priority order.
#[must_use]
pub fn for_mask(mask: u32) -> Vec<Solver> {
    all().iter().filter(|s| s.types & mask != 0).copied().collect()
}

/// Run the first solver (in priority order) whose mask intersects `mask`
/// that reports `solved: true`. Returns `ComputeResult::unsolved()` if none do.
#[must_use]
pub fn run(text: &str, lower: &str, mask: u32) -> ComputeResult {
    for solver in for_mask(mask) {
        let result = (solver.solve)(text, lower);
        if result.solved {
            return result;
        }
    }
    ComputeResult::unsolved()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::solver_type;

    #[test]
    fn all_is_sorted_by_priority() {
        let sorted = all();
        for pair in sorted.windows(2) {
            assert!(pair[0].priority <= pair[1].priority);
        }
    }

    #[test]
    fn for_mask_only_returns_matching_solvers() {
        let arithmetic_only = for_mask(solver_type::ARITHMETIC);
        assert!(arithmetic_only.iter().all(|s| s.types & solver_type::ARITHMETIC != 0));
        assert!(!arithmetic_only.is_empty());
    }

    #[test]
    fn run_falls_back_to_unsolved_when_nothing_matches() {
        let result = run("asdf", "asdf", 0);
        assert!(!result.solved);
    }

    #[test]
    fn run_dispatches_arithmetic() {
        let result = run("2 + 2", "2 + 2", solver_type::ARITHMETIC);
        assert!(result.solved);
        assert_eq!(result.method, Some("arithmetic"));
    }
}
