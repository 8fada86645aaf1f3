//! Curated, hand-written cases covering the solver and compression engines'
//! main scenarios. Each case carries tags so tests can pull a themed subset
//! (`find_by_tag(cases, "calculus")`) instead of hardcoding indices.

/// One curated test case: an input string, the tags that describe it, and
/// (for solver cases) the expected rendered answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorpusCase {
    /// Stable identifier, dotted like `arithmetic.basic.add`.
    pub id: &'static str,
    /// Free-form tags used for filtering (`"arithmetic"`, `"word-problem"`, …).
    pub tags: &'static [&'static str],
    /// The raw text a solver or the compression pipeline would receive.
    pub input: &'static str,
    /// Expected solved answer, when the case targets a solver.
    pub expected: Option<&'static str>,
}

/// Arithmetic and formula-tier cases (spec §4.2/§4.3).
pub const ARITHMETIC_CASES: &[CorpusCase] = &[
    CorpusCase { id: "arithmetic.basic.add", tags: &["arithmetic"], input: "2 + 2", expected: Some("4") },
    CorpusCase { id: "arithmetic.precedence.mul_add", tags: &["arithmetic", "precedence"], input: "2 + 3 * 4", expected: Some("14") },
    CorpusCase { id: "arithmetic.parens", tags: &["arithmetic", "precedence"], input: "(2 + 3) * 4", expected: Some("20") },
    CorpusCase { id: "formula.percentage.basic", tags: &["formula", "percentage"], input: "what is 20% of 50", expected: Some("10") },
];

/// Word-problem and multi-step-word-problem cases (spec §4.4).
pub const WORD_PROBLEM_CASES: &[CorpusCase] = &[
    CorpusCase {
        id: "word_problem.multi_step.direct_and_multiple",
        tags: &["word-problem", "multi-step"],
        input: "Alice has 4 apples. Bob has twice as many apples as Alice. How many apples does Bob have?",
        expected: Some("8"),
    },
    CorpusCase {
        id: "word_problem.multi_step.total",
        tags: &["word-problem", "multi-step"],
        input: "Alice has 4 apples. Bob has twice as many apples as Alice. How many apples do they have in total?",
        expected: Some("12"),
    },
    // The spec's own literal end-to-end examples (spec §8, scenarios 1 and 3).
    CorpusCase {
        id: "word_problem.crt.bat_and_ball",
        tags: &["word-problem", "crt"],
        input: "A bat and ball cost $1.10. The bat costs $1.00 more than the ball. How much does the ball cost (in cents)?",
        expected: Some("5"),
    },
    CorpusCase {
        id: "word_problem.crt.lily_pad",
        tags: &["word-problem", "crt"],
        input: "lily pad doubles every day; 48 days to cover the lake; how many days to cover half?",
        expected: Some("47"),
    },
];

/// Probability cases (spec §4.4 "probability").
pub const PROBABILITY_CASES: &[CorpusCase] = &[
    // spec §8, scenario 2.
    CorpusCase {
        id: "probability.fair_coin.streak",
        tags: &["probability"],
        input: "A fair coin has landed heads 10 times in a row. What's the probability the next flip is heads?",
        expected: Some("0.5"),
    },
];

/// Calculus and derivation cases (spec §4.6).
pub const CALCULUS_CASES: &[CorpusCase] = &[
    CorpusCase { id: "calculus.derivative.power", tags: &["calculus", "derivative"], input: "differentiate x^3", expected: Some("3 * x ^ 2") },
    CorpusCase {
        id: "derivation.valid_chain",
        tags: &["derivation"],
        input: "2x + 4 = 2(x + 2) = 2x + 4, please verify this derivation.",
        expected: Some("valid: every step follows from the previous one"),
    },
];

/// Passages used to exercise the compression pipeline (spec §4.8). These are
/// not solver cases, so `expected` is always `None`; tests assert on
/// structural properties instead (ratio, sentence counts).
pub const COMPRESSION_PASSAGES: &[CorpusCase] = &[
    CorpusCase {
        id: "compression.redundant.server_restart",
        tags: &["compression", "redundant"],
        input: "Let me think about this carefully. The server restarts every night at midnight. \
                 The server restarts every night at midnight, which is expected behavior. \
                 Okay, in order to fix the bug we need to patch the scheduler.",
        expected: None,
    },
    CorpusCase {
        id: "compression.code_heavy",
        tags: &["compression", "code"],
        input: "Here is the fix. ```rust\nfn main() {}\n``` That should work.",
        expected: None,
    },
];

/// All curated cases across every category.
#[must_use]
pub fn all_cases() -> Vec<CorpusCase> {
    ARITHMETIC_CASES.iter().chain(WORD_PROBLEM_CASES).chain(PROBABILITY_CASES).chain(CALCULUS_CASES).chain(COMPRESSION_PASSAGES).copied().collect()
}

/// Filter `cases` down to those carrying `tag`.
#[must_use]
pub fn find_by_tag<'a>(cases: &'a [CorpusCase], tag: &str) -> Vec<&'a CorpusCase> {
    cases.iter().filter(|case| case.tags.contains(&tag)).collect()
}

/// Look up a single case by its stable id.
#[must_use]
pub fn find_by_id<'a>(cases: &'a [CorpusCase], id: &str) -> Option<&'a CorpusCase> {
    cases.iter().find(|case| case.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_case_has_a_unique_id() {
        let cases = all_cases();
        let mut ids: Vec<&str> = cases.iter().map(|c| c.id).collect();
        let before = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn find_by_tag_returns_only_matching_cases() {
        let cases = all_cases();
        let calculus = find_by_tag(&cases, "calculus");
        assert!(!calculus.is_empty());
        assert!(calculus.iter().all(|c| c.tags.contains(&"calculus")));
    }

    #[test]
    fn find_by_id_finds_a_known_case() {
        let cases = all_cases();
        assert!(find_by_id(&cases, "arithmetic.basic.add").is_some());
    }

    #[test]
    fn find_by_id_returns_none_for_unknown_id() {
        let cases = all_cases();
        assert!(find_by_id(&cases, "does.not.exist").is_none());
    }
}
