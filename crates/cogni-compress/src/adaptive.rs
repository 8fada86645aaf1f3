//! Adaptive target ratio and the `needsCompression` heuristic (spec §4.8
//! steps 10-11).

use std::collections::HashSet;

use cogni_tokencount::estimate_tokens;

/// Shannon entropy in bits per character.
#[must_use]
pub fn shannon_entropy(text: &str) -> f64 {
    if text.is_empty() {
        return 0.0;
    }
    let mut counts = std::collections::HashMap::new();
    for ch in text.chars() {
        *counts.entry(ch).or_insert(0usize) += 1;
    }
    let len = text.chars().count() as f64;
    -counts.values().map(|&count| {
        let p = count as f64 / len;
        p * p.log2()
    }).sum::<f64>()
}

/// Fraction of word tokens that occur exactly once.
#[must_use]
pub fn uniqueness_ratio(text: &str) -> f64 {
    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if words.is_empty() {
        return 1.0;
    }
    let unique: HashSet<&String> = words.iter().collect();
    unique.len() as f64 / words.len() as f64
}

/// Pick a target compression ratio from the text's entropy, length, and the
/// query's brevity, clamped to `[0.25, 0.9]`.
#[must_use]
pub fn adaptive_target_ratio(text: &str, query: &str) -> f64 {
    let entropy = shannon_entropy(text);
    let mut ratio = if entropy < 4.0 {
        0.35
    } else if entropy < 4.5 {
        0.45
    } else if entropy < 5.0 {
        0.55
    } else if entropy < 5.5 {
        0.65
    } else if entropy < 6.0 {
        0.75
    } else {
        0.85
    };

    let tokens = estimate_tokens(text);
    if tokens > 1000 {
        ratio *= 0.85;
    } else if tokens > 500 {
        ratio *= 0.9;
    } else if tokens < 150 {
        ratio *= 1.1;
    }

    if query.split_whitespace().count() <= 3 {
        ratio *= 1.05;
    }

    ratio.clamp(0.25, 0.9)
}

/// Why `needs_compression` decided what it did, and the measurements behind
/// the decision.
#[derive(Debug, Clone)]
pub struct CompressionAnalysis {
    /// Whether compression is recommended.
    pub should_compress: bool,
    /// Shannon entropy (bits/char) of the text.
    pub entropy: f64,
    /// Fraction of distinct word tokens.
    pub uniqueness_ratio: f64,
    /// The adaptive target ratio that would be used if compressed.
    pub estimated_ratio: f64,
    /// Estimated token count of the text.
    pub tokens: usize,
    /// Human-readable reasons behind the decision.
    pub reasons: Vec<String>,
}

/// Decide whether `text` is worth compressing given `query`.
#[must_use]
pub fn needs_compression(text: &str, query: &str) -> CompressionAnalysis {
    let tokens = estimate_tokens(text);
    let entropy = shannon_entropy(text);
    let uniqueness = uniqueness_ratio(text);
    let estimated_ratio = adaptive_target_ratio(text, query);
    let mut reasons = Vec::new();

    let should_compress = if tokens <= 100 {
        reasons.push("too short to be worth compressing".to_string());
        false
    } else if entropy < 4.0 {
        reasons.push("low entropy: highly repetitive text".to_string());
        true
    } else if uniqueness < 0.3 {
        reasons.push("low lexical uniqueness".to_string());
        true
    } else if tokens > 500 && entropy < 5.5 {
        reasons.push("long and moderately repetitive".to_string());
        true
    } else if entropy > 6.5 {
        reasons.push("high entropy: little redundancy to remove".to_string());
        false
    } else if (1.0 - estimated_ratio) < 0.2 && tokens < 300 {
        reasons.push("estimated savings too small to bother".to_string());
        false
    } else {
        reasons.push("moderate length and entropy: compression likely helps".to_string());
        true
    };

    CompressionAnalysis { should_compress, entropy, uniqueness_ratio: uniqueness, estimated_ratio, tokens, reasons }
}
