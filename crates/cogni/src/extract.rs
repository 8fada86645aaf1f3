//! Finds computable spans inside free-form text, runs each through the
//! solver registry, and splices the answer back in with an inline marker
//! (spec §4.6 "extractAndCompute" / "contextAwareCompute").
//!
//! Spans are found one sentence at a time; each solver already knows how to
//! pull a sub-expression out of a prose sentence (see `cogni-solvers`'s
//! arithmetic solver), so sentence-granularity spans are enough to catch
//! the computable ones without a second expression-finding pass here.

use once_cell::sync::Lazy;
use regex::Regex;

use cogni_solvers::ComputeResult;

static SENTENCE_SPAN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^.!?\n]+[.!?]*").expect("static regex"));

/// One computation spliced into an [`AugmentedResult`]: the originating span
/// of text and the result the registry produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    /// The exact span of `text` that triggered this computation.
    pub span: String,
    /// What the solver registry returned for `span`.
    pub result: ComputeResult,
}

/// Output of [`extract_and_compute`]: the original text with answers inlined,
/// plus the individual computations that were found.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedResult {
    /// `text` with ` [=<answer>]` spliced in after every solved span.
    pub augmented: String,
    /// Every computation that was found and solved, in left-to-right order.
    pub computations: Vec<Computation>,
    /// `true` iff at least one span was solved.
    pub has_computations: bool,
}

/// Context `contextAwareCompute` uses to decide which solver types are
/// relevant before re-injecting computations (spec §4.6).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputeContext {
    /// The assistant's system prompt, if any.
    pub system_prompt: Option<String>,
    /// The user's query, if any.
    pub user_query: Option<String>,
    /// The model's own scratchpad text; this is what gets extracted from.
    pub thought: String,
}

/// Output of [`context_aware_compute`]: like [`AugmentedResult`], plus the
/// domain mask that was used to filter computations.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextAwareResult {
    /// `thought` with ` [=<answer>]` spliced in after every surviving span.
    pub augmented: String,
    /// Computations that survived the domain filter, in left-to-right order.
    pub computations: Vec<Computation>,
    /// `true` iff at least one computation survived.
    pub has_computations: bool,
    /// The solver-type mask detected from context; `0` means no filtering.
    pub domain_mask: u32,
}

fn find_and_compute(text: &str, mask_filter: Option<u32>) -> AugmentedResult {
    let mut computations = Vec::new();
    let mut solved_spans: Vec<(usize, ComputeResult)> = Vec::new();

    for m in SENTENCE_SPAN_RE.find_iter(text) {
        let trimmed = m.as_str().trim();
        if trimmed.is_empty() {
            continue;
        }
        let result = cogni_solvers::try_compute(trimmed);
        if !result.solved {
            continue;
        }
        if let Some(mask) = mask_filter {
            let method_mask = result.method.map(cogni_solvers::solver_type_for_method).unwrap_or(0);
            if method_mask & mask == 0 {
                continue;
            }
        }
        computations.push(Computation { span: trimmed.to_string(), result: result.clone() });
        solved_spans.push((m.end(), result));
    }

    let mut augmented = text.to_string();
    for (end, result) in solved_spans.iter().rev() {
        if let Some(value) = &result.result {
            augmented.insert_str(*end, &format!(" [={value}]"));
        }
    }

    let has_computations = !computations.is_empty();
    AugmentedResult { augmented, computations, has_computations }
}

/// Find every computable span in `text`, solve each, and inline the answers.
#[must_use]
pub fn extract_and_compute(text: &str) -> AugmentedResult {
    find_and_compute(text, None)
}

/// Detect the relevant solver domain from `ctx` (prompt > query > thought,
/// strongest signal wins), extract computations from `ctx.thought`, and drop
/// any whose solver type doesn't intersect the detected domain.
#[must_use]
pub fn context_aware_compute(ctx: ComputeContext) -> ContextAwareResult {
    let domain_mask = cogni_solvers::detect_domain(ctx.system_prompt.as_deref(), ctx.user_query.as_deref(), &ctx.thought);
    let filter = if domain_mask == 0 { None } else { Some(domain_mask) };
    let result = find_and_compute(&ctx.thought, filter);
    ContextAwareResult {
        augmented: result.augmented,
        computations: result.computations,
        has_computations: result.has_computations,
        domain_mask,
    }
}
