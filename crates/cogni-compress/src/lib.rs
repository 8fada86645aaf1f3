//! Query-aware prompt compression: sentence scoring, dual-threshold
//! selection, constraint closure, and telegraphic rewrite.
//!
//! [`compress`] runs the full eleven-step pipeline described at the module
//! level of each stage file; [`needs_compression`] answers whether it's
//! worth running at all.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod adaptive;
mod closure;
mod code_blocks;
mod config;
mod entities;
mod fillers;
mod metadata;
mod ncd;
mod reassembly;
mod repetition;
mod rewrite;
mod scoring;
mod selection;
mod sentences;
mod types;

use std::collections::HashSet;

use tracing::instrument;

pub use adaptive::{adaptive_target_ratio, needs_compression, shannon_entropy, uniqueness_ratio, CompressionAnalysis};
pub use config::CompressionConfig;
pub use types::CompressionResult;

/// Run the full compression pipeline over `text`, using `query` to drive
/// relevance scoring.
#[instrument(skip(text, query, config))]
#[must_use]
pub fn compress(text: &str, query: &str, config: &CompressionConfig) -> CompressionResult {
    let original = text.to_string();
    let original_tokens = cogni_tokencount::estimate_tokens(text);

    let (placeholdered, blocks) = code_blocks::extract_code_blocks(text);
    let raw_sentences = sentences::split_sentences(&placeholdered);
    let original_sentence_count = raw_sentences.len();

    if raw_sentences.is_empty() {
        return CompressionResult {
            compressed: original.clone(),
            original,
            original_sentence_count: 0,
            kept_sentence_count: 0,
            closure_forced_count: 0,
            original_tokens,
            compressed_tokens: original_tokens,
            ratio: 1.0,
        };
    }

    let metas: Vec<metadata::SentenceMeta> =
        raw_sentences.iter().enumerate().map(|(i, s)| metadata::build_metadata(i, s, query, config.use_ncd)).collect();

    let sentence_refs: Vec<&str> = raw_sentences.iter().map(String::as_str).collect();
    let idf = scoring::build_idf(&sentence_refs);
    let query_terms: HashSet<String> = query.split_whitespace().map(|w| w.to_lowercase()).collect();

    let mut prior_entities: HashSet<String> = HashSet::new();
    let mut repeat_similarities = Vec::with_capacity(metas.len());
    for (i, meta) in metas.iter().enumerate() {
        let earlier: Vec<&str> = sentence_refs[..i].to_vec();
        let similarity = repetition::repeat_similarity(&meta.text, &meta.entities, &earlier, &prior_entities);
        repeat_similarities.push(similarity);
        for entity in &meta.entities {
            prior_entities.insert(entity.clone());
        }
    }

    let required_by: Vec<bool> = (0..metas.len())
        .map(|i| metas.get(i + 1).is_some_and(|next| next.starts_with_pronoun || next.has_connective))
        .collect();

    let scores: Vec<scoring::SentenceScore> = metas
        .iter()
        .enumerate()
        .map(|(i, meta)| {
            scoring::score_sentence(
                meta,
                i,
                metas.len(),
                &query_terms,
                &idf,
                repeat_similarities[i],
                required_by[i],
                config.use_ncd,
                config.boost_reasoning,
                config.repeat_threshold,
            )
        })
        .collect();

    let target_ratio = if config.adaptive_compression { adaptive::adaptive_target_ratio(text, query) } else { config.target_ratio };

    let auto_keep: Vec<bool> = metas.iter().map(|m| m.auto_keep).collect();
    let initial_kept = selection::select_sentences(&scores, &auto_keep, target_ratio, config.min_sentences);
    let mut kept_flags = vec![false; metas.len()];
    for &i in &initial_kept {
        kept_flags[i] = true;
    }

    let relevances: Vec<f64> = scores.iter().map(|s| s.relevance).collect();
    let (kept_flags, closure_forced_count) =
        closure::apply_closure(&metas, &relevances, kept_flags, config.enforce_coref, config.enforce_causal_chains);

    let kept_sentences: Vec<String> = raw_sentences
        .iter()
        .enumerate()
        .filter(|(i, _)| kept_flags[*i])
        .map(|(_, s)| if config.remove_fillers { rewrite::telegraphic_rewrite(&fillers::clean_fillers(s)) } else { s.clone() })
        .collect();
    let kept_sentence_count = kept_sentences.len();

    let compressed = reassembly::reassemble(&kept_sentences, &blocks);
    let compressed_tokens = cogni_tokencount::estimate_tokens(&compressed);
    let ratio = if original_tokens == 0 { 1.0 } else { compressed_tokens as f64 / original_tokens as f64 };

    CompressionResult {
        compressed,
        original,
        original_sentence_count,
        kept_sentence_count,
        closure_forced_count,
        original_tokens,
        compressed_tokens,
        ratio,
    }
}

/// Compress `text` with default settings and return just the compressed string.
#[must_use]
pub fn quick_compress(text: &str, query: &str, max_tokens: Option<usize>) -> String {
    let mut config = CompressionConfig::default();
    if let Some(max_tokens) = max_tokens {
        let tokens = cogni_tokencount::estimate_tokens(text).max(1);
        config.target_ratio = (max_tokens as f64 / tokens as f64).clamp(0.1, 1.0);
        config.adaptive_compression = false;
    }
    compress(text, query, &config).compressed
}
