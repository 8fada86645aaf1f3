//! Repetition detection: Jaccard/ROUGE-L similarity against earlier
//! sentences, boosted when a sentence repeats without introducing any new
//! entity (spec §4.8 step 4).

use std::collections::HashSet;

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "at", "for", "with", "is", "are", "was", "were", "be", "been", "it", "this", "that",
    "as", "by", "from",
];

fn tokenize(sentence: &str) -> Vec<String> {
    sentence
        .split(|c: char| !c.is_alphanumeric())
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > 2 && !STOPWORDS.contains(&w.as_str()))
        .collect()
}

fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.union(b).count();
    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}

fn lcs_len(a: &[String], b: &[String]) -> usize {
    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 1..=a.len() {
        for j in 1..=b.len() {
            dp[i][j] = if a[i - 1] == b[j - 1] { dp[i - 1][j - 1] + 1 } else { dp[i - 1][j].max(dp[i][j - 1]) };
        }
    }
    dp[a.len()][b.len()]
}

/// ROUGE-L: LCS-based F1 between two token sequences.
fn rouge_l(a: &[String], b: &[String]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let lcs = lcs_len(a, b) as f64;
    let precision = lcs / a.len() as f64;
    let recall = lcs / b.len() as f64;
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Max similarity of `sentence` against every earlier non-code sentence,
/// boosted to >= 0.81 when no new entity is introduced and the raw
/// similarity already exceeds 0.25.
#[must_use]
pub fn repeat_similarity(sentence: &str, entities: &[String], earlier_sentences: &[&str], prior_entities: &HashSet<String>) -> f64 {
    let tokens: Vec<String> = tokenize(sentence);
    let token_set: HashSet<String> = tokens.iter().cloned().collect();

    let mut max_similarity: f64 = 0.0;
    for &earlier in earlier_sentences {
        let earlier_tokens = tokenize(earlier);
        let earlier_set: HashSet<String> = earlier_tokens.iter().cloned().collect();
        let jaccard_similarity = jaccard(&token_set, &earlier_set);
        let similarity = if (0.2..0.5).contains(&jaccard_similarity) { jaccard_similarity.max(rouge_l(&tokens, &earlier_tokens)) } else { jaccard_similarity };
        max_similarity = max_similarity.max(similarity);
    }

    let introduces_new_entity = entities.iter().any(|e| !prior_entities.contains(e));
    if !introduces_new_entity && max_similarity > 0.25 {
        return max_similarity.max(0.81);
    }
    max_similarity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_duplicate_sentences_score_high_similarity() {
        let earlier = ["The server restarts every night at midnight."];
        let similarity = repeat_similarity("The server restarts every night at midnight.", &[], &earlier, &HashSet::new());
        assert!(similarity > 0.5, "similarity was {similarity}");
    }

    #[test]
    fn unrelated_sentences_score_low_similarity() {
        let earlier = ["The weather today is sunny and warm."];
        let similarity = repeat_similarity("Quantum computers use superconducting qubits.", &[], &earlier, &HashSet::new());
        assert!(similarity < 0.25, "similarity was {similarity}");
    }

    #[test]
    fn repeating_with_no_new_entity_is_force_penalized() {
        let earlier = ["Revenue grew substantially across every region this quarter."];
        let mut prior = HashSet::new();
        prior.insert("Q3".to_string());
        let similarity = repeat_similarity("Revenue grew substantially across most regions this quarter too.", &["Q3".to_string()], &earlier, &prior);
        assert!(similarity >= 0.81);
    }

    #[test]
    fn first_sentence_has_no_earlier_context() {
        let similarity = repeat_similarity("Anything at all.", &[], &[], &HashSet::new());
        assert_eq!(similarity, 0.0);
    }
}
