//! Calibrated char/word-blend token estimate (spec §4.7).

use crate::classify::{classify, cjk_char_count, url_char_coverage, ContentType};

fn chars_per_token(content_type: ContentType) -> f64 {
    match content_type {
        ContentType::Prose => 5.0,
        ContentType::Code => 3.0,
        ContentType::Url => 4.1,
        ContentType::Number => 3.0,
        ContentType::Cjk => 1.5,
        ContentType::Mixed => 3.8,
    }
}

fn blend_weights(content_type: ContentType) -> (f64, f64) {
    match content_type {
        ContentType::Prose => (0.35, 0.65),
        ContentType::Code => (0.65, 0.35),
        _ => (0.5, 0.5),
    }
}

const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', ')', ']', '}', '"', '\''];

fn word_token_estimate(word: &str) -> f64 {
    let trailing = word.chars().rev().take_while(|c| TRAILING_PUNCTUATION.contains(c)).count();
    let core_len = word.chars().count() - trailing;
    let core_tokens = if core_len == 0 {
        0.0
    } else if core_len <= 5 {
        1.0
    } else if core_len <= 10 {
        1.3
    } else {
        (core_len as f64 / 5.0).ceil()
    };
    core_tokens + trailing as f64 * 0.7
}

fn word_based_estimate(text: &str) -> f64 {
    text.split_whitespace().map(word_token_estimate).sum()
}

/// Estimate the token count of `text` without consulting any cache.
#[must_use]
pub fn estimate_tokens_uncached(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    let content_type = classify(text);
    let char_len = text.chars().count();
    let ratio = chars_per_token(content_type);
    let char_estimate = char_len as f64 / ratio;
    let word_estimate = word_based_estimate(text);
    let (char_weight, word_weight) = blend_weights(content_type);
    let mut blended = char_estimate * char_weight + word_estimate * word_weight;

    if content_type != ContentType::Url {
        let url_chars = url_char_coverage(text);
        if url_chars > 0 {
            blended += url_chars as f64 * (1.0 / chars_per_token(ContentType::Url) - 1.0 / ratio);
        }
    }
    if content_type != ContentType::Cjk {
        let cjk_chars = cjk_char_count(text);
        if cjk_chars > 0 {
            blended += cjk_chars as f64 * (1.0 / chars_per_token(ContentType::Cjk) - 1.0 / ratio);
        }
    }

    let with_safety_margin = blended * 1.03;
    (with_safety_margin.ceil() as usize).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_zero_tokens() {
        assert_eq!(estimate_tokens_uncached(""), 0);
    }

    #[test]
    fn short_prose_gets_a_reasonable_estimate() {
        let tokens = estimate_tokens_uncached("The quick brown fox jumps over the lazy dog.");
        assert!((8..=15).contains(&tokens), "got {tokens}");
    }

    #[test]
    fn never_returns_zero_for_nonempty_text() {
        assert!(estimate_tokens_uncached("a") >= 1);
    }

    #[test]
    fn longer_text_yields_more_tokens() {
        let short = estimate_tokens_uncached("hello world");
        let long = estimate_tokens_uncached(&"hello world ".repeat(50));
        assert!(long > short * 10);
    }

    #[test]
    fn embedded_url_in_prose_adds_a_delta() {
        let without_url = estimate_tokens_uncached("Please check out the documentation for more information.");
        let with_url = estimate_tokens_uncached("Please check out https://example.com/docs for more information.");
        assert!(with_url >= without_url);
    }
}
