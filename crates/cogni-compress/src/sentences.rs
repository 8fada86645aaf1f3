//! Abbreviation-aware sentence splitting (spec §4.8 step 2). `regex` has no
//! lookbehind, so the boundary pattern matches the punctuation+whitespace
//! run itself and merge decisions look at what the accumulated segment
//! ends with.

use once_cell::sync::Lazy;
use regex::Regex;

static BOUNDARY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s+").expect("static regex"));
static DOTTED_ABBREVIATION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:[a-z]\.){2,}$").expect("static regex"));

const KNOWN_ABBREVIATIONS: &[&str] = &[
    "dr.", "mr.", "mrs.", "ms.", "prof.", "st.", "etc.", "e.g.", "i.e.", "fig.", "approx.", "no.", "vs.", "jan.", "feb.", "mar.", "apr.", "jun.", "jul.",
    "aug.", "sep.", "sept.", "oct.", "nov.", "dec.",
];

fn ends_with_abbreviation(segment: &str) -> bool {
    let trimmed = segment.trim_end();
    let lower = trimmed.to_lowercase();
    if KNOWN_ABBREVIATIONS.iter().any(|abbr| lower.ends_with(abbr)) {
        return true;
    }
    DOTTED_ABBREVIATION_RE.is_match(trimmed)
}

/// Split `text` into sentences, merging segments ending in a known
/// abbreviation or dotted-abbreviation pattern back into the next segment.
#[must_use]
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut buffer = String::new();
    let mut last_end = 0;

    for m in BOUNDARY_RE.find_iter(text) {
        buffer.push_str(&text[last_end..m.end()]);
        last_end = m.end();
        if ends_with_abbreviation(&buffer) {
            continue;
        }
        let trimmed = buffer.trim();
        if !trimmed.is_empty() {
            sentences.push(trimmed.to_string());
        }
        buffer.clear();
    }
    buffer.push_str(&text[last_end..]);
    let trimmed = buffer.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    sentences
}
