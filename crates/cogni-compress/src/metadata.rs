//! Per-sentence metadata assembly (spec §4.8 step 3): auto-keep detection,
//! filler classification, NCD against the query, pronoun/connective flags,
//! and entity extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::code_blocks::contains_placeholder;
use crate::entities::extract_entities;
use crate::fillers::{classify_filler, FillerTier};
use crate::ncd::normalized_compression_distance;

static BACKTICK_SPAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]*`").expect("static regex"));
static PRONOUN_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*(he|she|it|they|this|that|these|those|such)\b").expect("static regex"));
static CONNECTIVE_START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(therefore|thus|hence|so,|however|but|although|yet|consequently|while|whereas)\b").expect("static regex"));

/// Everything computed about one sentence ahead of scoring.
#[derive(Debug, Clone)]
pub struct SentenceMeta {
    /// Position in the original sentence sequence.
    pub index: usize,
    /// The sentence as split (code placeholders still inline, if any).
    pub text: String,
    /// Auto-keep: this sentence is never dropped.
    pub auto_keep: bool,
    /// Filler strength.
    pub filler_tier: FillerTier,
    /// Normalized compression distance against the query (`1.0` if NCD is disabled).
    pub ncd: f64,
    /// Starts with a pronoun.
    pub starts_with_pronoun: bool,
    /// Starts with a causal/contrastive connective.
    pub has_connective: bool,
    /// Extracted entity spans.
    pub entities: Vec<String>,
}

fn backtick_coverage(sentence: &str, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let covered: usize = BACKTICK_SPAN_RE.find_iter(sentence).map(|m| m.as_str().chars().count()).sum();
    covered as f64 / len as f64
}

fn symbol_density(sentence: &str, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    sentence.chars().filter(|c| !c.is_alphanumeric() && !c.is_whitespace()).count() as f64 / len as f64
}

fn is_code_heavy(sentence: &str) -> bool {
    let len = sentence.chars().count();
    if backtick_coverage(sentence, len) > 0.40 {
        return true;
    }
    len >= 20 && symbol_density(sentence, len) > 0.25
}

/// Build metadata for one sentence at `index`.
#[must_use]
pub fn build_metadata(index: usize, sentence: &str, query: &str, use_ncd: bool) -> SentenceMeta {
    let auto_keep = contains_placeholder(sentence) || is_code_heavy(sentence);
    let ncd = if use_ncd { normalized_compression_distance(sentence, query) } else { 1.0 };
    SentenceMeta {
        index,
        text: sentence.to_string(),
        auto_keep,
        filler_tier: classify_filler(sentence),
        ncd,
        starts_with_pronoun: PRONOUN_START_RE.is_match(sentence),
        has_connective: CONNECTIVE_START_RE.is_match(sentence),
        entities: extract_entities(sentence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_with_code_placeholder_is_auto_kept() {
        let meta = build_metadata(0, "see \u{0}CODE0\u{0} above", "how does it work", true);
        assert!(meta.auto_keep);
    }

    #[test]
    fn symbol_heavy_sentence_is_auto_kept() {
        let meta = build_metadata(0, "x = a && b || !c ^ d % e * f / g - h + i", "what is x", true);
        assert!(meta.auto_keep);
    }

    #[test]
    fn plain_sentence_is_not_auto_kept() {
        let meta = build_metadata(0, "The weather today is quite pleasant.", "what is the weather", true);
        assert!(!meta.auto_keep);
    }

    #[test]
    fn detects_a_leading_pronoun() {
        let meta = build_metadata(0, "It was raining all day.", "query", true);
        assert!(meta.starts_with_pronoun);
    }

    #[test]
    fn detects_a_leading_connective() {
        let meta = build_metadata(0, "Therefore the system must restart.", "query", true);
        assert!(meta.has_connective);
    }

    #[test]
    fn extracts_entities_into_metadata() {
        let meta = build_metadata(0, "Revenue grew 12% in Q3.", "query", true);
        assert!(!meta.entities.is_empty());
    }
}
