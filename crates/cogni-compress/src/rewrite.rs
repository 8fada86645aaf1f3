//! Telegraphic rewrite (spec §4.8 step 8): phrase replacement and filler-word
//! stripping, protecting code/URLs/paths/dates/identifiers/numbers and
//! reasoning connectives from deletion.

use once_cell::sync::Lazy;
use regex::Regex;

const PHRASE_REPLACEMENTS: &[(&str, &str)] = &[
    ("in order to", "to"),
    ("due to the fact that", "because"),
    ("is able to", "can"),
    ("are able to", "can"),
    ("with regard to", "regarding"),
    ("in the event that", "if"),
    ("at this point in time", "now"),
    ("in spite of the fact that", "although"),
    ("a large number of", "many"),
    ("a majority of", "most"),
    ("in the process of", "while"),
    ("make use of", "use"),
    ("take into consideration", "consider"),
    ("for the purpose of", "for"),
    ("in close proximity to", "near"),
];

const FILLER_WORDS: &[&str] = &["very", "really", "quite", "rather", "just", "simply", "actually", "basically", "literally", "somewhat", "kind of", "sort of"];

const ARTICLES: &[&str] = &["a", "an", "the"];

static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:https?://|www\.)\S+$").expect("static regex"));
static PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:[./~][\w./-]*|[\w-]+(?:/[\w.-]+)+)$").expect("static regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$|^\d{1,2}/\d{1,2}/\d{2,4}$").expect("static regex"));
static VERSION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^v?\d+\.\d+(?:\.\d+)?$").expect("static regex"));
static MODEL_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w-]+-\d+(?:\.\d+)*$").expect("static regex"));
static NUMBER_UNIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(?:\.\d+)?[a-zA-Z%]*$").expect("static regex"));
static SLASH_TERM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\w]+/[\w/]+$").expect("static regex"));
static CAMEL_OR_SNAKE_OR_CAPS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[a-z]+(?:[A-Z][a-z0-9]*)+|[a-z][a-z0-9]*(?:_[a-z0-9]+)+|[A-Z]{2,})$").expect("static regex"));
static HEADER_OR_LIST_MARKER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,6}|[-*+]|\d+\.)$").expect("static regex"));
static INLINE_BACKTICK_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`[^`]*`").expect("static regex"));
static REASONING_CONNECTIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(because|therefore|thus|hence|since|so|however|although|but|consequently)$").expect("static regex"));
static EXTRA_SPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]{2,}").expect("static regex"));
static SPACE_BEFORE_PUNCT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+([,.!?;:])").expect("static regex"));

fn apply_phrase_replacements(sentence: &str) -> String {
    let mut result = sentence.to_string();
    for (from, to) in PHRASE_REPLACEMENTS {
        let pattern = regex::escape(from);
        if let Ok(re) = Regex::new(&format!("(?i){pattern}")) {
            result = re.replace_all(&result, *to).into_owned();
        }
    }
    result
}

fn is_protected_token(token: &str) -> bool {
    if token.is_empty() {
        return true;
    }
    if token.contains('\u{0}') {
        return true;
    }
    URL_RE.is_match(token)
        || PATH_RE.is_match(token)
        || DATE_RE.is_match(token)
        || VERSION_RE.is_match(token)
        || MODEL_ID_RE.is_match(token)
        || NUMBER_UNIT_RE.is_match(token)
        || SLASH_TERM_RE.is_match(token)
        || CAMEL_OR_SNAKE_OR_CAPS_RE.is_match(token)
        || HEADER_OR_LIST_MARKER_RE.is_match(token)
        || INLINE_BACKTICK_RE.is_match(token)
        || REASONING_CONNECTIVE_RE.is_match(token)
}

fn strip_fillers(sentence: &str) -> String {
    let words: Vec<&str> = sentence.split_whitespace().collect();
    let mut kept = Vec::with_capacity(words.len());
    for word in words {
        let bare = word.trim_matches(|c: char| c.is_ascii_punctuation());
        let lower = bare.to_lowercase();
        if is_protected_token(word) {
            kept.push(word.to_string());
            continue;
        }
        if FILLER_WORDS.contains(&lower.as_str()) {
            continue;
        }
        if ARTICLES.contains(&lower.as_str()) {
            continue;
        }
        kept.push(word.to_string());
    }
    kept.join(" ")
}

fn cleanup_punctuation_spacing(sentence: &str) -> String {
    let collapsed = EXTRA_SPACE_RE.replace_all(sentence, " ");
    let fixed = SPACE_BEFORE_PUNCT_RE.replace_all(&collapsed, "$1");
    fixed.trim().to_string()
}

/// Rewrite one sentence telegraphically: phrase replacement, then
/// filler/article stripping outside protected tokens, then punctuation
/// cleanup.
#[must_use]
pub fn telegraphic_rewrite(sentence: &str) -> String {
    let replaced = apply_phrase_replacements(sentence);
    let stripped = strip_fillers(&replaced);
    cleanup_punctuation_spacing(&stripped)
}
