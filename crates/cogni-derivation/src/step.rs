//! The wire/data format for a derivation: plain text with `=` separators,
//! chained equalities allowed (spec §6 "Data format").

use std::fmt;

/// One step of a derivation chain: a claim that `lhs` equals `rhs`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivationStep {
    /// Left-hand side, as written (not yet parsed).
    pub lhs: String,
    /// Right-hand side, as written.
    pub rhs: String,
}

impl DerivationStep {
    /// Build a step from its two sides, trimming surrounding whitespace.
    #[must_use]
    pub fn new(lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self { lhs: lhs.into().trim().to_string(), rhs: rhs.into().trim().to_string() }
    }
}

impl fmt::Display for DerivationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.lhs, self.rhs)
    }
}
