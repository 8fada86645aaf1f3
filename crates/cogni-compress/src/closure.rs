//! Constraint closure (spec §4.8 step 7): force-include a sentence's
//! antecedent when the sentence itself is kept and opens with a pronoun or a
//! causal/contrastive connective. Runs to a fixed point, bounded by
//! [`cogni_error::IterationBudget::rounds`].

use cogni_error::IterationBudget;

use crate::metadata::SentenceMeta;

const MIN_FORCE_INCLUDE_RELEVANCE: f64 = 0.02;

/// Apply coreference/causal-chain closure to an initial `kept` selection.
///
/// For every kept sentence that starts with a pronoun ([`SentenceMeta::starts_with_pronoun`])
/// or a connective ([`SentenceMeta::has_connective`]), its immediate
/// predecessor is forced into the result, provided that predecessor clears a
/// minimal relevance floor (so closure cannot drag in e.g. a zero-relevance
/// sentence). Returns the updated keep set and how many inclusions closure
/// forced.
#[must_use]
pub fn apply_closure(metas: &[SentenceMeta], relevances: &[f64], mut kept: Vec<bool>, enforce_coref: bool, enforce_causal_chains: bool) -> (Vec<bool>, usize) {
    if !enforce_coref && !enforce_causal_chains {
        return (kept, 0);
    }
    let mut forced = 0;
    let mut budget = IterationBudget::rounds();
    loop {
        if !budget.tick() {
            break;
        }
        let mut changed = false;
        for (i, meta) in metas.iter().enumerate() {
            if !kept[i] || i == 0 {
                continue;
            }
            let wants_predecessor = (enforce_coref && meta.starts_with_pronoun) || (enforce_causal_chains && meta.has_connective);
            if !wants_predecessor {
                continue;
            }
            let predecessor = i - 1;
            if kept[predecessor] {
                continue;
            }
            if relevances.get(predecessor).copied().unwrap_or(0.0) < MIN_FORCE_INCLUDE_RELEVANCE {
                continue;
            }
            kept[predecessor] = true;
            forced += 1;
            changed = true;
        }
        if !changed {
            break;
        }
    }
    (kept, forced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::build_metadata;

    #[test]
    fn pulls_in_the_antecedent_of_a_kept_pronoun_sentence() {
        let metas = vec![
            build_metadata(0, "The server crashed at midnight.", "query", false),
            build_metadata(1, "It was restarted automatically.", "query", false),
        ];
        let relevances = vec![0.3, 0.9];
        let kept = vec![false, true];
        let (kept, forced) = apply_closure(&metas, &relevances, kept, true, true);
        assert!(kept[0]);
        assert_eq!(forced, 1);
    }

    #[test]
    fn leaves_unrelated_predecessor_out_when_disabled() {
        let metas = vec![
            build_metadata(0, "The server crashed at midnight.", "query", false),
            build_metadata(1, "It was restarted automatically.", "query", false),
        ];
        let relevances = vec![0.3, 0.9];
        let kept = vec![false, true];
        let (kept, forced) = apply_closure(&metas, &relevances, kept, false, false);
        assert!(!kept[0]);
        assert_eq!(forced, 0);
    }

    #[test]
    fn does_not_force_a_near_zero_relevance_predecessor() {
        let metas = vec![
            build_metadata(0, "Cats are nice.", "query", false),
            build_metadata(1, "It was restarted automatically.", "query", false),
        ];
        let relevances = vec![0.0, 0.9];
        let kept = vec![false, true];
        let (kept, forced) = apply_closure(&metas, &relevances, kept, true, true);
        assert!(!kept[0]);
        assert_eq!(forced, 0);
    }

    #[test]
    fn chains_through_multiple_predecessors() {
        let metas = vec![
            build_metadata(0, "Revenue grew in Q3.", "query", false),
            build_metadata(1, "This was driven by new contracts.", "query", false),
            build_metadata(2, "Therefore margins improved too.", "query", false),
        ];
        let relevances = vec![0.5, 0.5, 0.9];
        let kept = vec![false, false, true];
        let (kept, forced) = apply_closure(&metas, &relevances, kept, true, true);
        assert!(kept[0]);
        assert!(kept[1]);
        assert_eq!(forced, 2);
    }
}
