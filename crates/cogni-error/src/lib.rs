//! Shared error taxonomy for the `cogni` local-compute and compression engines.
//!
//! Every crate in this workspace uses these types (or wraps them) internally;
//! the public `cogni` facade is infallible, so none of these escape past it
//! (see `ComputeResult`/`DerivationResult` for how failures are represented
//! as ordinary values instead).

use thiserror::Error;

/// Errors produced while tokenizing or parsing a math expression.
///
/// These are non-fatal by design (per the spec's tokenizer contract): a
/// caller that sees a non-empty error list should treat the expression as
/// unparsed and fall back, not propagate the error further.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AstError {
    /// Input ended while a token was still being read (e.g. `"2 +"`).
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// A character could not be classified as the start of any token.
    #[error("unexpected character {ch:?} at byte {pos}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Byte offset of the character within the source.
        pos: usize,
    },

    /// A numeric literal failed to parse as `f64`.
    #[error("invalid number literal {literal:?} at byte {pos}")]
    InvalidNumber {
        /// The raw text that failed to parse.
        literal: String,
        /// Byte offset where the literal starts.
        pos: usize,
    },

    /// A `(` was never matched by a closing `)`.
    #[error("unclosed parenthesis opened at byte {pos}")]
    UnclosedParen {
        /// Byte offset of the unmatched `(`.
        pos: usize,
    },

    /// The parser produced a tree but tokens remained unconsumed.
    #[error("unexpected token {found:?} at byte {pos}, expected end of expression")]
    TrailingTokens {
        /// Text of the first unconsumed token.
        found: String,
        /// Byte offset of the first unconsumed token.
        pos: usize,
    },

    /// A primary expression was expected but the next token couldn't start one.
    #[error("expected a number, variable, or '(' at byte {pos}, found {found:?}")]
    ExpectedPrimary {
        /// Text of the token actually found.
        found: String,
        /// Byte offset of that token.
        pos: usize,
    },
}

/// Result alias for fallible AST operations internal to `cogni-ast`.
pub type AstResult<T> = Result<T, AstError>;

/// Why a derivation step failed to verify.
///
/// Mirrors the two discriminators called for in the spec: a step that is
/// not itself an equivalence (`InvalidTransformation`), versus a step whose
/// left-hand side doesn't continue the previous step's right-hand side
/// (`Discontinuity`).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DerivationError {
    /// `lhs_i` and `rhs_i` are not equivalent expressions.
    #[error("step {step}: {lhs} is not equivalent to {rhs}")]
    InvalidTransformation {
        /// One-based step index.
        step: usize,
        /// Left-hand side as written.
        lhs: String,
        /// Right-hand side as written.
        rhs: String,
    },

    /// `rhs_{i-1}` and `lhs_i` are not equivalent, so the chain is broken.
    #[error("step {step}: {prev_rhs} does not continue into {lhs}")]
    Discontinuity {
        /// One-based step index of the discontinuous step.
        step: usize,
        /// Right-hand side of the previous step.
        prev_rhs: String,
        /// Left-hand side of the current step.
        lhs: String,
    },
}

/// Result alias for derivation verification.
pub type DerivationResult<T> = Result<T, DerivationError>;

/// Bounded-iteration budget shared by the simplifier, derivation engine, and
/// compression constraint closure, all of which must terminate in bounded
/// time on adversarial input (spec §5).
///
/// A budget is consumed by calling [`IterationBudget::tick`] once per loop
/// iteration; the loop must stop as soon as it returns `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IterationBudget {
    max_iterations: usize,
    consumed: usize,
}

impl IterationBudget {
    /// Create a budget allowing at most `max_iterations` loop bodies.
    #[must_use]
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations, consumed: 0 }
    }

    /// The simplifier's fixed-point cap (spec §4.1/§4.3: 50 iterations).
    #[must_use]
    pub fn simplify() -> Self {
        Self::new(50)
    }

    /// The dependency-resolution / constraint-closure cap (spec §4.4/§4.8: 10 rounds).
    #[must_use]
    pub fn rounds() -> Self {
        Self::new(10)
    }

    /// Consume one iteration; returns `false` once the budget is exhausted.
    #[must_use]
    pub fn tick(&mut self) -> bool {
        if self.consumed >= self.max_iterations {
            return false;
        }
        self.consumed += 1;
        true
    }

    /// Number of iterations consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Whether the budget was fully consumed (cap reached rather than the
    /// loop converging on its own).
    #[must_use]
    pub fn exhausted(&self) -> bool {
        self.consumed >= self.max_iterations
    }
}
