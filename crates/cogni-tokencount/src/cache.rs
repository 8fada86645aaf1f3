//! Size-gated token-estimate cache: a plain map that bulk-clears on
//! overflow rather than tracking true LRU order (spec §4.7/§5 — "simpler
//! than true LRU; matches token cache behavior").

use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

const CAPACITY: usize = 4096;

static CACHE: Lazy<Mutex<HashMap<String, usize>>> = Lazy::new(|| Mutex::new(HashMap::with_capacity(CAPACITY)));

/// Look up a cached estimate for `text`, if any.
#[must_use]
pub fn get(text: &str) -> Option<usize> {
    CACHE.lock().get(text).copied()
}

/// Store `estimate` for `text`, bulk-clearing the whole cache first if it's
/// already at capacity.
pub fn put(text: &str, estimate: usize) {
    let mut cache = CACHE.lock();
    if cache.len() >= CAPACITY {
        cache.clear();
    }
    cache.insert(text.to_string(), estimate);
}

/// Number of entries currently cached.
#[must_use]
pub fn len() -> usize {
    CACHE.lock().len()
}

/// Drop every cached entry.
pub fn clear() {
    CACHE.lock().clear();
}
