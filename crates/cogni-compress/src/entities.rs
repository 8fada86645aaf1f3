//! Entity extraction used both for scoring (entity count/density) and for
//! repetition detection's "introduces no new entity" check (spec §4.8
//! steps 3-4).

use once_cell::sync::Lazy;
use regex::Regex;

static CURRENCY_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[$€£]\s?\d[\d,]*(?:\.\d+)?").expect("static regex"));
static NUMBER_WITH_UNIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\s?(?:kg|km|mb|gb|tb|ms|sec|secs|hours?|hrs?|days?|mph|px|cm|mm|x)\b").expect("static regex"));
static PERCENTAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?\s?%").expect("static regex"));
static PROPER_NOUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)\b").expect("static regex"));
static CAMEL_CASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]+(?:[A-Z][a-z0-9]*)+\b").expect("static regex"));
static ALL_CAPS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{2,}\b").expect("static regex"));
static SNAKE_CASE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z][a-z0-9]*(?:_[a-z0-9]+)+\b").expect("static regex"));
static ALNUM_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[A-Z]{1,3}\d{1,4}\b").expect("static regex"));

/// Extract every recognized entity span's text, deduplicated, in first-seen
/// order.
#[must_use]
pub fn extract_entities(sentence: &str) -> Vec<String> {
    let mut entities = Vec::new();
    let mut seen = std::collections::HashSet::new();
    let mut push_matches = |re: &Regex| {
        for m in re.find_iter(sentence) {
            let text = m.as_str().to_string();
            if seen.insert(text.clone()) {
                entities.push(text);
            }
        }
    };
    push_matches(&CURRENCY_RE);
    push_matches(&NUMBER_WITH_UNIT_RE);
    push_matches(&PERCENTAGE_RE);
    push_matches(&ALNUM_CODE_RE);
    push_matches(&SNAKE_CASE_RE);
    push_matches(&CAMEL_CASE_RE);
    push_matches(&ALL_CAPS_RE);
    push_matches(&PROPER_NOUN_RE);
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_a_currency_amount() {
        let entities = extract_entities("The invoice was for $1,250.00 total.");
        assert!(entities.iter().any(|e| e == "$1,250.00"));
    }

    #[test]
    fn extracts_a_percentage() {
        let entities = extract_entities("Revenue grew 12.5% year over year.");
        assert!(entities.iter().any(|e| e == "12.5%"));
    }

    #[test]
    fn extracts_a_proper_noun() {
        let entities = extract_entities("Sarah Connor visited the facility.");
        assert!(entities.iter().any(|e| e == "Sarah Connor"));
    }

    #[test]
    fn extracts_camel_case_and_snake_case() {
        let entities = extract_entities("The parseInput function reads max_retry_count.");
        assert!(entities.iter().any(|e| e == "parseInput"));
        assert!(entities.iter().any(|e| e == "max_retry_count"));
    }

    #[test]
    fn extracts_an_alphanumeric_code() {
        let entities = extract_entities("Growth is expected in Q3 this year.");
        assert!(entities.iter().any(|e| e == "Q3"));
    }

    #[test]
    fn plain_sentence_has_no_entities() {
        let entities = extract_entities("the cat sat on the mat");
        assert!(entities.is_empty());
    }
}
