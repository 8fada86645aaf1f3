//! User-tunable knobs for the compression pipeline (spec §4.8, §6).

/// Configuration for [`crate::compress`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionConfig {
    /// Target fraction of sentences to keep (before adaptive adjustment).
    pub target_ratio: f64,
    /// Minimum number of sentences to always keep, regardless of ratio.
    pub min_sentences: usize,
    /// Whether reasoning keywords/value-starters get a relevance multiplier.
    pub boost_reasoning: bool,
    /// Whether to compute NCD against the query as a scoring signal.
    pub use_ncd: bool,
    /// Whether to force-include a kept sentence's pronoun antecedent.
    pub enforce_coref: bool,
    /// Whether to force-include a kept sentence's causal-connective antecedent.
    pub enforce_causal_chains: bool,
    /// Whether to strip filler phrasing during rewrite.
    pub remove_fillers: bool,
    /// Jaccard/ROUGE similarity above which a sentence is treated as repetitive.
    pub repeat_threshold: f64,
    /// Whether to compute the target ratio adaptively from entropy/length
    /// instead of using `target_ratio` verbatim.
    pub adaptive_compression: bool,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            target_ratio: 0.5,
            min_sentences: 1,
            boost_reasoning: true,
            use_ncd: true,
            enforce_coref: true,
            enforce_causal_chains: true,
            remove_fillers: true,
            repeat_threshold: 0.5,
            adaptive_compression: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = CompressionConfig::default();
        assert_eq!(config.target_ratio, 0.5);
        assert_eq!(config.min_sentences, 1);
        assert!(config.boost_reasoning);
        assert!(config.use_ncd);
        assert!(config.enforce_coref);
        assert!(config.enforce_causal_chains);
        assert!(config.remove_fillers);
        assert_eq!(config.repeat_threshold, 0.5);
        assert!(config.adaptive_compression);
    }
}
