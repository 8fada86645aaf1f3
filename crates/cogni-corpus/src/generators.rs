//! Seeded random generation of small arithmetic expressions, for property
//! tests that want many inputs rather than a fixed curated set.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const OPERATORS: &[char] = &['+', '-', '*', '/'];

/// Options controlling what [`generate_arithmetic_expr_with_seed`] produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExprGenOptions {
    /// Maximum absolute value of any generated operand.
    pub max_operand: i64,
    /// Number of binary operators to chain together.
    pub operator_count: usize,
    /// Whether to wrap the whole expression in parentheses.
    pub parenthesize: bool,
}

impl Default for ExprGenOptions {
    fn default() -> Self {
        Self { max_operand: 20, operator_count: 2, parenthesize: false }
    }
}

/// Generate one arithmetic expression string deterministically from `seed`.
#[must_use]
pub fn generate_arithmetic_expr_with_seed(seed: u64, options: &ExprGenOptions) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut expr = rng.gen_range(1..=options.max_operand).to_string();
    for _ in 0..options.operator_count {
        let op = OPERATORS[rng.gen_range(0..OPERATORS.len())];
        let operand = rng.gen_range(1..=options.max_operand);
        expr.push(' ');
        expr.push(op);
        expr.push(' ');
        expr.push_str(&operand.to_string());
    }
    if options.parenthesize {
        format!("({expr})")
    } else {
        expr
    }
}

/// Generate `count` arithmetic expressions from sequential seeds starting at `base_seed`.
#[must_use]
pub fn generate_arithmetic_exprs(count: usize, base_seed: u64, options: &ExprGenOptions) -> Vec<String> {
    (0..count).map(|i| generate_arithmetic_expr_with_seed(base_seed.wrapping_add(i as u64), options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_the_same_expression() {
        let options = ExprGenOptions::default();
        assert_eq!(generate_arithmetic_expr_with_seed(42, &options), generate_arithmetic_expr_with_seed(42, &options));
    }

    #[test]
    fn different_seeds_usually_produce_different_expressions() {
        let options = ExprGenOptions::default();
        let a = generate_arithmetic_expr_with_seed(1, &options);
        let b = generate_arithmetic_expr_with_seed(2, &options);
        assert_ne!(a, b);
    }

    #[test]
    fn parenthesize_wraps_the_whole_expression() {
        let options = ExprGenOptions { parenthesize: true, ..ExprGenOptions::default() };
        let expr = generate_arithmetic_expr_with_seed(7, &options);
        assert!(expr.starts_with('(') && expr.ends_with(')'));
    }

    #[test]
    fn generates_the_requested_count() {
        let exprs = generate_arithmetic_exprs(10, 0, &ExprGenOptions::default());
        assert_eq!(exprs.len(), 10);
    }
}
