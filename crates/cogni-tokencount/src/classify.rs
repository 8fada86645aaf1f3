//! Content-type classification used to pick a calibrated chars/token ratio
//! (spec §4.7).

use once_cell::sync::Lazy;
use regex::Regex;

/// The six content types the estimator calibrates separately for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Ordinary natural-language prose.
    Prose,
    /// Source code or code-adjacent text.
    Code,
    /// Dominated by URLs.
    Url,
    /// Dominated by digits.
    Number,
    /// Dominated by CJK (Chinese/Japanese/Korean) characters.
    Cjk,
    /// None of the above dominates.
    Mixed,
}

static CODE_KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(fn|function|def|class|import|export|const|let|var|return|public|private|static|struct|impl|pub|require|void|int|bool)\b|=>|::|->").expect("static regex"));

pub(crate) static URL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"https?://[^\s]+|www\.[^\s]+").expect("static regex"));

fn is_cjk(ch: char) -> bool {
    matches!(ch as u32,
        0x3040..=0x30FF   // hiragana + katakana
        | 0x3400..=0x4DBF // CJK extension A
        | 0x4E00..=0x9FFF // CJK unified ideographs
        | 0xAC00..=0xD7A3 // hangul syllables
    )
}

fn bracket_density(text: &str, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let brackets = text.chars().filter(|c| matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '<' | '>')).count();
    brackets as f64 / len as f64
}

fn symbol_density(text: &str, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let symbols = text.chars().filter(|c| !c.is_alphanumeric() && !c.is_whitespace()).count();
    symbols as f64 / len as f64
}

fn cjk_density(text: &str, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    text.chars().filter(|&c| is_cjk(c)).count() as f64 / len as f64
}

fn url_coverage(text: &str, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let covered: usize = URL_RE.find_iter(text).map(|m| m.as_str().chars().count()).sum();
    covered as f64 / len as f64
}

fn digit_density(text: &str, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    text.chars().filter(char::is_ascii_digit).count() as f64 / len as f64
}

fn alphabetic_density(text: &str, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    text.chars().filter(|c| c.is_alphabetic()).count() as f64 / len as f64
}

/// Classify `text` into one dominant content type, in priority order:
/// code, cjk, url, number, prose, else mixed.
#[must_use]
pub fn classify(text: &str) -> ContentType {
    let len = text.chars().count();
    if len == 0 {
        return ContentType::Prose;
    }
    if (bracket_density(text, len) > 0.03 && CODE_KEYWORD_RE.is_match(text)) || symbol_density(text, len) > 0.08 {
        return ContentType::Code;
    }
    if cjk_density(text, len) > 0.30 {
        return ContentType::Cjk;
    }
    if url_coverage(text, len) > 0.50 {
        return ContentType::Url;
    }
    if digit_density(text, len) > 0.50 {
        return ContentType::Number;
    }
    if alphabetic_density(text, len) > 0.60 {
        return ContentType::Prose;
    }
    ContentType::Mixed
}

/// Fraction of `text` (by char count) covered by URL matches.
#[must_use]
pub(crate) fn url_char_coverage(text: &str) -> usize {
    URL_RE.find_iter(text).map(|m| m.as_str().chars().count()).sum()
}

/// Count of CJK characters in `text`.
#[must_use]
pub(crate) fn cjk_char_count(text: &str) -> usize {
    text.chars().filter(|&c| is_cjk(c)).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_sentence_is_prose() {
        assert_eq!(classify("The quick brown fox jumps over the lazy dog."), ContentType::Prose);
    }

    #[test]
    fn rust_snippet_is_code() {
        let text = "pub fn main() -> i32 { let x: i32 = 1; return x; }";
        assert_eq!(classify(text), ContentType::Code);
    }

    #[test]
    fn mostly_digits_is_number() {
        assert_eq!(classify("1234567890 42 007"), ContentType::Number);
    }

    #[test]
    fn mostly_cjk_is_cjk() {
        assert_eq!(classify("这是一个测试这是一个测试这是一个测试"), ContentType::Cjk);
    }

    #[test]
    fn mostly_url_is_url() {
        // A long alphanumeric path keeps symbol density under the code
        // threshold while the URL itself still covers the whole string.
        let url = format!("https://example.com/{}", "a".repeat(300));
        assert_eq!(classify(&url), ContentType::Url);
    }

    #[test]
    fn symbol_heavy_text_is_code() {
        assert_eq!(classify("&&||==!=<<>>++--%%^^"), ContentType::Code);
    }
}
