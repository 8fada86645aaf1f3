//! Filler-tier classification and cleaning (spec §4.8 step 3).

use once_cell::sync::Lazy;
use regex::Regex;

/// How strongly a sentence reads as throwaway scaffolding rather than content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillerTier {
    /// Not filler.
    None,
    /// Stylistic wrapper (`okay,`, `that said`, …) — mildly penalized.
    Tier2,
    /// Strong filler (`let me think`, `hmm`, self-reassurance) — heavily penalized.
    Tier1,
}

static TIER1_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(let\s+me\s+(think|check|verify)|hmm+|i\s+(think|believe)\s+(this|that)\s+is\s+(right|correct)|the\s+question\s+asks|i\s+(can|will)\s+.*?\b(mention|note|add)\b)")
        .expect("static regex")
});
static TIER2_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(okay|ok|well|so|alright|right)\b|\bthat\s+said\b|\blet\s+me\s+explain\b|\bit\s+is\s+worth\b").expect("static regex"));

static LEADING_META_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(let\s+me\s+(think|check|verify)[,.]?\s*|hmm+[,.]?\s*|okay|ok|well|so|alright|right)[,.:]?\s*").expect("static regex")
});
static INLINE_HEDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(basically|literally|actually|you\s+know|i\s+mean|really|very|quite|rather|somewhat)\b\s*").expect("static regex"));

/// Classify a sentence's filler strength.
#[must_use]
pub fn classify_filler(sentence: &str) -> FillerTier {
    if TIER1_RE.is_match(sentence) {
        return FillerTier::Tier1;
    }
    if TIER2_RE.is_match(sentence) {
        return FillerTier::Tier2;
    }
    FillerTier::None
}

/// Strip leading meta-phrases and inline hedges from a sentence.
#[must_use]
pub fn clean_fillers(sentence: &str) -> String {
    let without_leading = LEADING_META_RE.replace(sentence, "");
    let without_hedges = INLINE_HEDGE_RE.replace_all(&without_leading, "");
    without_hedges.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_tier1_let_me_think() {
        assert_eq!(classify_filler("Let me think about this carefully."), FillerTier::Tier1);
    }

    #[test]
    fn detects_tier1_hmm() {
        assert_eq!(classify_filler("Hmm, that's an interesting point."), FillerTier::Tier1);
    }

    #[test]
    fn detects_tier2_leading_okay() {
        assert_eq!(classify_filler("Okay, here's the plan."), FillerTier::Tier2);
    }

    #[test]
    fn detects_tier2_that_said() {
        assert_eq!(classify_filler("That said, we should proceed."), FillerTier::Tier2);
    }

    #[test]
    fn plain_sentence_is_not_filler() {
        assert_eq!(classify_filler("The server restarts every night."), FillerTier::None);
    }

    #[test]
    fn cleans_a_leading_meta_phrase() {
        assert_eq!(clean_fillers("Let me think, the answer is 42."), "the answer is 42.");
    }

    #[test]
    fn cleans_inline_hedges() {
        assert_eq!(clean_fillers("This is basically very simple."), "This is simple.");
    }
}
