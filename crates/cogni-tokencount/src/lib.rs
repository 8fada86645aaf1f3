//! Fast, calibrated token-count estimation (spec §4.7). Never invokes a
//! real BPE tokenizer; trades exactness for speed while staying within the
//! spec's monotonicity/safety bounds (never underestimate by more than
//! 20%, typically overestimate by at most 2x).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::must_use_candidate)]

mod cache;
mod classify;
mod estimate;

pub use classify::{classify, ContentType};
pub use estimate::estimate_tokens_uncached;

/// Estimate the token count of `text`, consulting and updating the
/// process-wide size-gated cache.
#[must_use]
pub fn estimate_tokens(text: &str) -> usize {
    if let Some(cached) = cache::get(text) {
        return cached;
    }
    let estimate = estimate_tokens_uncached(text);
    cache::put(text, estimate);
    estimate
}

/// Number of entries currently cached.
#[must_use]
pub fn cache_len() -> usize {
    cache::len()
}

/// Drop every cached entry.
pub fn clear_cache() {
    cache::clear();
}
