//! Maps a solver's `method` tag back to the `SolverType` that produced it,
//! and detects which solver types are relevant to a given conversational
//! context (spec §4.5 "Domain filter").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::solver_type;

/// The `SolverType` bit(s) associated with a solver's `method` tag. Unknown
/// methods map to `0` (never filtered in, never filtered out implicitly —
/// callers should treat `0` as "no domain claims this").
#[must_use]
pub fn solver_type_for_method(method: &str) -> u32 {
    match method {
        "math_fact_rationality" | "math_fact_known_irrational" | "math_fact_integer" | "math_fact_fraction" => solver_type::FACTS,
        "arithmetic" | "inline_arithmetic" => solver_type::ARITHMETIC,
        "probability" | "fair_coin_independence" => solver_type::PROBABILITY,
        "logic" => solver_type::LOGIC,
        m if m.starts_with("formula_t1") => solver_type::FORMULA_T1,
        m if m.starts_with("formula_t2") => solver_type::FORMULA_T2,
        m if m.starts_with("formula_t3") => solver_type::FORMULA_T3,
        m if m.starts_with("formula_t4") => solver_type::FORMULA_T4,
        m if m.starts_with("crt_") => solver_type::WORD_PROBLEM,
        "word_problem" => solver_type::WORD_PROBLEM,
        "multi_step_word" => solver_type::MULTI_STEP,
        "calculus" => solver_type::CALCULUS,
        "derivation" => solver_type::DERIVATION,
        _ => 0,
    }
}

static FINANCIAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(interest|loan|invest|mortgage|apr|compound|principal|budget|tax)\b").expect("static regex"));
static ENGINEERING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(calculus|derivative|integral|engineering|velocity|acceleration|matrix|determinant)\b").expect("static regex"));
static LOGIC_DOMAIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(logic|syllogism|proof|theorem)\b").expect("static regex"));
static STATS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(probability|statistics|odds|random|dice|coin)\b").expect("static regex"));

/// Detect which solver types are relevant given a piece of context text
/// (system prompt, user query, or model "thought" scratchpad).
#[must_use]
fn relevant_mask_for(text: &str) -> u32 {
    let mut mask = 0;
    if FINANCIAL_RE.is_match(text) {
        mask |= solver_type::FORMULA_T1 | solver_type::FORMULA_T2 | solver_type::FORMULA_T4;
    }
    if ENGINEERING_RE.is_match(text) {
        mask |= solver_type::CALCULUS | solver_type::FORMULA_T2 | solver_type::FORMULA_T4;
    }
    if LOGIC_DOMAIN_RE.is_match(text) {
        mask |= solver_type::LOGIC | solver_type::DERIVATION;
    }
    if STATS_RE.is_match(text) {
        mask |= solver_type::PROBABILITY;
    }
    mask
}

/// Detect the relevant solver-type mask from whichever context is
/// available, preferring the strongest signal: system prompt, then user
/// query, then the model's own "thought" text. A mask of `0` (nothing
/// matched, or no context given) means "no domain filtering" — callers
/// should treat that as "keep everything".
#[must_use]
pub fn detect_domain(system_prompt: Option<&str>, user_query: Option<&str>, thought: &str) -> u32 {
    for candidate in [system_prompt, user_query, Some(thought)].into_iter().flatten() {
        let mask = relevant_mask_for(candidate);
        if mask != 0 {
            return mask;
        }
    }
    0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn financial_context_maps_to_formula_bits() {
        let mask = detect_domain(Some("You are a financial planning assistant."), None, "");
        assert_eq!(mask, solver_type::FORMULA_T1 | solver_type::FORMULA_T2 | solver_type::FORMULA_T4);
    }

    #[test]
    fn engineering_context_includes_calculus() {
        let mask = detect_domain(None, Some("help me with this calculus homework"), "");
        assert_ne!(mask & solver_type::CALCULUS, 0);
    }

    #[test]
    fn system_prompt_outranks_query_and_thought() {
        let mask = detect_domain(Some("financial advisor"), Some("calculus problem"), "probability game");
        assert_eq!(mask, solver_type::FORMULA_T1 | solver_type::FORMULA_T2 | solver_type::FORMULA_T4);
    }

    #[test]
    fn falls_through_to_weaker_signals_when_stronger_ones_are_silent() {
        let mask = detect_domain(Some("hello"), None, "rolling dice for a probability game");
        assert_eq!(mask, solver_type::PROBABILITY);
    }

    #[test]
    fn no_signal_anywhere_returns_zero() {
        assert_eq!(detect_domain(None, None, ""), 0);
    }

    #[test]
    fn method_mapping_covers_formula_tiers() {
        assert_eq!(solver_type_for_method("formula_t1_percentage"), solver_type::FORMULA_T1);
        assert_eq!(solver_type_for_method("formula_t4_compound_interest"), solver_type::FORMULA_T4);
        assert_eq!(solver_type_for_method("unknown_method"), 0);
    }
}
