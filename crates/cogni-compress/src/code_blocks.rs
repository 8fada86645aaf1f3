//! Fenced-code extraction: replace each ```` ```…``` ```` / `~~~…~~~` block
//! with an opaque placeholder so the rest of the pipeline never rewrites
//! code (spec §4.8 step 1).

use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)(```.*?```|~~~.*?~~~)").expect("static regex"));

/// A placeholder is `\x00CODEk\x00` for the `k`-th extracted block
/// (0-based), matching the raw NUL-delimited marker the spec names.
#[must_use]
pub fn placeholder(index: usize) -> String {
    format!("\u{0}CODE{index}\u{0}")
}

/// Replace every fenced block in `text` with its placeholder, returning the
/// rewritten text and the original block contents in extraction order.
#[must_use]
pub fn extract_code_blocks(text: &str) -> (String, Vec<String>) {
    let mut blocks = Vec::new();
    let rewritten = FENCE_RE
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let index = blocks.len();
            blocks.push(caps[0].to_string());
            placeholder(index)
        })
        .into_owned();
    (rewritten, blocks)
}

/// Reverse [`extract_code_blocks`]: substitute each placeholder back with
/// its original block content.
#[must_use]
pub fn restore_code_blocks(text: &str, blocks: &[String]) -> String {
    let mut restored = text.to_string();
    for (index, block) in blocks.iter().enumerate() {
        restored = restored.replace(&placeholder(index), block);
    }
    restored
}

/// Whether `text` contains a code placeholder (used by the auto-keep rule).
#[must_use]
pub fn contains_placeholder(text: &str) -> bool {
    text.contains('\u{0}')
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn extracts_a_single_fenced_block() {
        let text = "before\n```rust\nfn main() {}\n```\nafter";
        let (rewritten, blocks) = extract_code_blocks(text);
        assert_eq!(blocks.len(), 1);
        assert!(rewritten.contains(&placeholder(0)));
        assert!(!rewritten.contains("fn main"));
    }

    #[test]
    fn extracts_multiple_blocks_in_order() {
        let text = "```a\nfirst\n```\ntext\n~~~b\nsecond\n~~~";
        let (rewritten, blocks) = extract_code_blocks(text);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].contains("first"));
        assert!(blocks[1].contains("second"));
        assert!(rewritten.contains(&placeholder(0)));
        assert!(rewritten.contains(&placeholder(1)));
    }

    #[test]
    fn restore_round_trips_exactly() {
        let text = "before\n```rust\nfn main() {}\n```\nafter";
        let (rewritten, blocks) = extract_code_blocks(text);
        assert_eq!(restore_code_blocks(&rewritten, &blocks), text);
    }

    #[test]
    fn text_without_fences_is_unchanged() {
        let text = "just plain prose, nothing fenced here.";
        let (rewritten, blocks) = extract_code_blocks(text);
        assert!(blocks.is_empty());
        assert_eq!(rewritten, text);
    }
}
