//! Per-sentence scoring: TF-IDF query overlap, position/NCD bonuses, and a
//! battery of multiplicative modifiers, plus a separate noise score used by
//! selection (spec §4.8 step 5).

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fillers::FillerTier;
use crate::metadata::SentenceMeta;

static REASONING_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(because|therefore|thus|hence|since|due\s+to|results?\s+in|leads?\s+to|causes?)\b").expect("static regex"));
static VALUE_STARTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(the\s+key|importantly|note\s+that|crucially|specifically|in\s+summary|finally|first|second|third)\b").expect("static regex"));

const STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "of", "to", "in", "on", "at", "for", "with", "is", "are", "was", "were", "be", "been", "it", "this", "that",
    "as", "by", "from",
];

fn terms(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric()).map(str::to_lowercase).filter(|w| w.len() > 2 && !STOPWORDS.contains(&w.as_str())).collect()
}

/// Document-level inverse document frequency across the whole sentence set.
#[must_use]
pub fn build_idf(sentences: &[&str]) -> HashMap<String, f64> {
    let n = sentences.len().max(1) as f64;
    let mut document_frequency: HashMap<String, usize> = HashMap::new();
    for sentence in sentences {
        let unique: HashSet<String> = terms(sentence).into_iter().collect();
        for term in unique {
            *document_frequency.entry(term).or_insert(0) += 1;
        }
    }
    document_frequency.into_iter().map(|(term, df)| (term, (n / (1.0 + df as f64)).ln() + 1.0)).collect()
}

fn tf_idf_overlap(sentence: &str, query_terms: &HashSet<String>, idf: &HashMap<String, f64>) -> f64 {
    let mut term_frequency: HashMap<String, usize> = HashMap::new();
    for term in terms(sentence) {
        *term_frequency.entry(term).or_insert(0) += 1;
    }
    let mut overlap = 0.0;
    for (term, count) in &term_frequency {
        if query_terms.contains(term) {
            let log_tf = 1.0 + (*count as f64).ln();
            let weight = idf.get(term).copied().unwrap_or(1.0);
            overlap += log_tf * weight;
        }
    }
    overlap
}

fn information_density(sentence: &str, entity_count: usize) -> f64 {
    let sentence_terms = terms(sentence);
    if sentence_terms.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&String> = sentence_terms.iter().collect();
    (unique.len() + entity_count) as f64 / sentence_terms.len() as f64
}

/// Relevance and noise scores for one sentence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceScore {
    /// How relevant/valuable this sentence is to keep.
    pub relevance: f64,
    /// How much this sentence reads as noise (filler/repetition/low density).
    pub noise: f64,
}

/// Score one sentence. `repeat_similarity` comes from [`crate::repetition`];
/// `required_by` is whether a later sentence's pronoun/connective opener
/// treats this sentence as its antecedent.
#[must_use]
#[allow(clippy::too_many_arguments)]
pub fn score_sentence(
    meta: &SentenceMeta,
    index: usize,
    total: usize,
    query_terms: &HashSet<String>,
    idf: &HashMap<String, f64>,
    repeat_similarity: f64,
    required_by: bool,
    use_ncd: bool,
    boost_reasoning: bool,
    repeat_threshold: f64,
) -> SentenceScore {
    let mut relevance = tf_idf_overlap(&meta.text, query_terms, idf);
    if index == 0 {
        relevance += 0.3;
    }
    if total > 0 && index == total - 1 {
        relevance += 0.2;
    }
    if use_ncd {
        relevance += (1.0 - meta.ncd) * 0.5;
    }

    if boost_reasoning && REASONING_KEYWORD_RE.is_match(&meta.text) {
        relevance *= 1.5;
    }
    if VALUE_STARTER_RE.is_match(&meta.text) {
        relevance *= 1.3;
    }
    if meta.text.chars().count() < 20 {
        relevance *= 0.5;
    }
    match meta.filler_tier {
        FillerTier::Tier1 => relevance *= 0.01,
        FillerTier::Tier2 => relevance *= 0.2,
        FillerTier::None => {}
    }
    if repeat_similarity > repeat_threshold {
        relevance *= 0.3;
    }
    let density = information_density(&meta.text, meta.entities.len());
    relevance *= 0.8 + 0.4 * density;
    if required_by {
        relevance *= 1.2;
    }
    if meta.filler_tier == FillerTier::None {
        relevance += 0.15 + 0.05 * meta.entities.len() as f64;
    }

    let filler_noise = match meta.filler_tier {
        FillerTier::Tier1 => 1.0,
        FillerTier::Tier2 => 0.5,
        FillerTier::None => 0.0,
    };
    let noise = 0.4 * filler_noise + 0.3 * repeat_similarity + 0.3 * (1.0 - density.min(1.0));

    SentenceScore { relevance: relevance.max(0.0), noise: noise.clamp(0.0, 1.0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::build_metadata;

    fn query_term_set(query: &str) -> HashSet<String> {
        terms(query).into_iter().collect()
    }

    #[test]
    fn query_matching_sentence_scores_higher_than_unrelated() {
        let sentences = ["The database migration completed successfully.", "Cats are popular household pets."];
        let idf = build_idf(&sentences);
        let query_terms = query_term_set("database migration status");

        let relevant_meta = build_metadata(0, sentences[0], "database migration status", false);
        let relevant = score_sentence(&relevant_meta, 0, 2, &query_terms, &idf, 0.0, false, false, true, 0.5);

        let unrelated_meta = build_metadata(1, sentences[1], "database migration status", false);
        let unrelated = score_sentence(&unrelated_meta, 1, 2, &query_terms, &idf, 0.0, false, false, true, 0.5);

        assert!(relevant.relevance > unrelated.relevance);
    }

    #[test]
    fn tier1_filler_is_heavily_penalized() {
        let meta = build_metadata(0, "Let me think about the database migration carefully.", "database migration", false);
        let query_terms = query_term_set("database migration");
        let idf = build_idf(&["Let me think about the database migration carefully."]);
        let score = score_sentence(&meta, 0, 1, &query_terms, &idf, 0.0, false, false, true, 0.5);
        assert!(score.noise > 0.0);
    }

    #[test]
    fn high_repetition_reduces_relevance() {
        let meta = build_metadata(0, "The database migration completed successfully today.", "database migration", false);
        let query_terms = query_term_set("database migration");
        let idf = build_idf(&["The database migration completed successfully today."]);
        let low_repeat = score_sentence(&meta, 0, 1, &query_terms, &idf, 0.0, false, false, true, 0.5);
        let high_repeat = score_sentence(&meta, 0, 1, &query_terms, &idf, 0.9, false, false, true, 0.5);
        assert!(high_repeat.relevance < low_repeat.relevance);
    }
}
