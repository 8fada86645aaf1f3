//! Thread-safe LRU cache of successful `ComputeResult`s, keyed by raw input
//! text (spec §4.5 "LRU cache").

use std::collections::{HashMap, VecDeque};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::types::ComputeResult;

const CAPACITY: usize = 2048;

struct LruCache {
    entries: HashMap<String, ComputeResult>,
    order: VecDeque<String>,
}

impl LruCache {
    fn new() -> Self {
        LruCache { entries: HashMap::new(), order: VecDeque::new() }
    }

    fn get(&mut self, key: &str) -> Option<ComputeResult> {
        if let Some(hit) = self.entries.get(key).cloned() {
            self.touch(key);
            Some(hit)
        } else {
            None
        }
    }

    fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key.to_string());
    }

    fn put(&mut self, key: String, value: ComputeResult) {
        if self.entries.contains_key(&key) {
            self.entries.insert(key.clone(), value);
            self.touch(&key);
            return;
        }
        while self.entries.len() >= CAPACITY {
            let Some(oldest) = self.order.pop_front() else { break };
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, value);
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

static CACHE: Lazy<Mutex<LruCache>> = Lazy::new(|| Mutex::new(LruCache::new()));

/// Look up a previously computed result for `text`. A hit always reports
/// `time_ms: 0`, per the spec's cache contract.
#[must_use]
pub fn get(text: &str) -> Option<ComputeResult> {
    let mut hit = CACHE.lock().get(text)?;
    hit.time_ms = 0;
    Some(hit)
}

/// Store a successful result for `text`. Failures (`solved: false`) are
/// never cached — callers should not call this for an unsolved result.
pub fn put(text: &str, result: ComputeResult) {
    debug_assert!(result.solved, "only successful results are cached");
    if !result.solved {
        return;
    }
    CACHE.lock().put(text.to_string(), result);
}

/// Current number of cached entries (test/diagnostic use).
#[must_use]
pub fn len() -> usize {
    CACHE.lock().len()
}

/// Drop every cached entry (test/diagnostic use).
pub fn clear() {
    CACHE.lock().clear();
}
