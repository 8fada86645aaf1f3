//! Normalized compression distance between a sentence and the query, used
//! as a redundancy signal in scoring (spec §4.8 step 3). `flate2`'s DEFLATE
//! writer stands in for "any monotone, size-stable compressor" the spec
//! allows.

use std::collections::HashMap;
use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;
use once_cell::sync::Lazy;
use parking_lot::Mutex;

static GZIP_SIZE_CACHE: Lazy<Mutex<HashMap<String, usize>>> = Lazy::new(|| Mutex::new(HashMap::new()));

fn gzip_len(text: &str) -> usize {
    if let Some(&cached) = GZIP_SIZE_CACHE.lock().get(text) {
        return cached;
    }
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    // Writing to an in-memory `Vec` never fails.
    #[allow(clippy::unwrap_used)]
    encoder.write_all(text.as_bytes()).unwrap();
    #[allow(clippy::unwrap_used)]
    let compressed = encoder.finish().unwrap();
    let len = compressed.len();
    GZIP_SIZE_CACHE.lock().insert(text.to_string(), len);
    len
}

/// `NCD(a,b) = (C(ab) - min(C(a),C(b))) / max(C(a),C(b))`, bounded to `[0,1]`.
#[must_use]
pub fn normalized_compression_distance(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 1.0;
    }
    let c_a = gzip_len(a) as f64;
    let c_b = gzip_len(b) as f64;
    let joined = format!("{a}{b}");
    let c_ab = gzip_len(&joined) as f64;
    let max_c = c_a.max(c_b);
    if max_c == 0.0 {
        return 0.0;
    }
    ((c_ab - c_a.min(c_b)) / max_c).clamp(0.0, 1.0)
}

/// Clear the process-wide gzip-length cache (test isolation).
pub fn clear_cache() {
    GZIP_SIZE_CACHE.lock().clear();
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings_have_near_zero_distance() {
        clear_cache();
        let distance = normalized_compression_distance("the quick brown fox", "the quick brown fox");
        assert!(distance < 0.2, "distance was {distance}");
    }

    #[test]
    fn unrelated_strings_have_higher_distance() {
        clear_cache();
        let related = normalized_compression_distance("the quick brown fox jumps", "the quick brown fox leaps");
        let unrelated = normalized_compression_distance("the quick brown fox jumps", "quantum entanglement experiments in superconductors");
        assert!(unrelated > related);
    }

    #[test]
    fn distance_is_bounded_to_zero_one() {
        clear_cache();
        let distance = normalized_compression_distance("a", "completely different and much longer text here");
        assert!((0.0..=1.0).contains(&distance));
    }

    #[test]
    fn empty_input_is_maximally_distant() {
        assert_eq!(normalized_compression_distance("", "something"), 1.0);
    }
}
