//! Extracts an ordered step chain out of free-form prose (spec §4.2
//! "Extract steps").

use once_cell::sync::Lazy;
use regex::Regex;

use crate::step::DerivationStep;

static VERBAL_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(?:prove|show\s+that|verify\s+that|derive|simplify)\s*:?\s*").expect("static regex"));

static LEADING_NOISE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:\s*(?:\d+[.)]|[-*•]))*\s*").expect("static regex"));

static LEADING_CONNECTIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*\b(?:then|so|therefore|hence)\b[,:]?\s*").expect("static regex"));

static SEGMENT_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[.!?]+\s+|\s*,\s*|\s*\b(?:then|so|therefore|hence)\b\s*").expect("static regex"));

/// Strip a leading verbal prefix (`"prove:"`, `"show that"`, …), a leading
/// connective left over from a sentence boundary the splitter didn't
/// consume (`"Then 2x..."`), and any leading list-marker/bullet noise from
/// a single segment.
fn clean_segment(segment: &str) -> String {
    let without_prefix = VERBAL_PREFIX.replace(segment, "");
    let without_connective = LEADING_CONNECTIVE.replace(&without_prefix, "");
    let without_noise = LEADING_NOISE.replace(&without_connective, "");
    without_noise.trim().trim_end_matches('.').trim().to_string()
}

/// Turn one segment containing `a = b = c ...` into consecutive steps
/// `(a,b)`, `(b,c)`, ... Segments with fewer than two `=`-separated sides
/// (no equality at all, or only one side) contribute nothing.
fn steps_from_chain(segment: &str) -> Vec<DerivationStep> {
    let sides: Vec<&str> = segment.split('=').map(str::trim).filter(|s| !s.is_empty()).collect();
    if sides.len() < 2 {
        return Vec::new();
    }
    sides.windows(2).map(|pair| DerivationStep::new(pair[0], pair[1])).collect()
}

/// Extract an ordered chain of `{lhs, rhs}` steps from free-form text.
///
/// Text is split on sentence boundaries and on the connectives `then | so |
/// therefore | hence`, each segment has verbal prefixes and leading
/// list-marker noise stripped, and any segment containing a chained
/// equality `a = b = c ...` is expanded into consecutive pairwise steps.
/// Segments without an `=` (plain narration) contribute nothing.
#[must_use]
pub fn extract_steps(text: &str) -> Vec<DerivationStep> {
    let cleaned_whole = VERBAL_PREFIX.replace(text, "");
    SEGMENT_SPLIT.split(&cleaned_whole).flat_map(|segment| steps_from_chain(&clean_segment(segment))).collect()
}
