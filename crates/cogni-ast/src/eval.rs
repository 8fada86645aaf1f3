//! Numeric evaluation of an AST under a variable binding.
//!
//! Used by the arithmetic solver (direct evaluation) and by the comparator
//! in `cogni-rewrite` (numerical probing as a fallback to structural
//! equality). Evaluation is total in the sense that it never panics;
//! anything that would be undefined (division by zero, `0^0`, a NaN/∞
//! result, an unbound variable) yields `None` so callers can retry with a
//! different probe point or fall back to "not equal".

use std::collections::HashMap;

use crate::node::{BinaryOp, Node, UnaryOp};

/// Named irrational constants recognized when a variable isn't explicitly
/// bound (callers can still shadow these by providing an explicit binding).
#[must_use]
pub fn named_constant(name: &str) -> Option<f64> {
    match name {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        "phi" => Some((1.0 + 5f64.sqrt()) / 2.0),
        _ => None,
    }
}

/// Evaluate `node` under `bindings`, falling back to [`named_constant`] for
/// any variable not present in `bindings`. Returns `None` on an unbound
/// non-constant variable, a division by zero, an indeterminate `0^0`, or
/// any operation that would produce a non-finite result.
#[must_use]
pub fn eval(node: &Node, bindings: &HashMap<String, f64>) -> Option<f64> {
    match node {
        Node::Number(value) => Some(*value),
        Node::Variable(name) => bindings.get(name).copied().or_else(|| named_constant(name)),
        Node::Unary { op, operand } => {
            let v = eval(operand, bindings)?;
            match op {
                UnaryOp::Neg => Some(-v),
                UnaryOp::Pos => Some(v),
            }
        }
        Node::Binary { op, left, right } => {
            let l = eval(left, bindings)?;
            let r = eval(right, bindings)?;
            let result = match op {
                BinaryOp::Add => l + r,
                BinaryOp::Sub => l - r,
                BinaryOp::Mul => l * r,
                BinaryOp::Div => {
                    if r == 0.0 {
                        return None;
                    }
                    l / r
                }
                BinaryOp::Pow => {
                    if l == 0.0 && r == 0.0 {
                        return None;
                    }
                    l.powf(r)
                }
            };
            if result.is_finite() {
                Some(result)
            } else {
                None
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::parser::parse;

    fn eval_str(src: &str, bindings: &HashMap<String, f64>) -> Option<f64> {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty());
        let ast = parse(&tokens).unwrap();
        eval(&ast, bindings)
    }

    #[test]
    fn evaluates_arithmetic() {
        assert_eq!(eval_str("2 + 3 * 4", &HashMap::new()), Some(14.0));
    }

    #[test]
    fn division_by_zero_is_none() {
        assert_eq!(eval_str("1 / 0", &HashMap::new()), None);
    }

    #[test]
    fn zero_to_the_zero_is_indeterminate() {
        assert_eq!(eval_str("0^0", &HashMap::new()), None);
    }

    #[test]
    fn named_constants_resolve_when_unbound() {
        let v = eval_str("2*pi", &HashMap::new()).unwrap();
        assert!((v - 2.0 * std::f64::consts::PI).abs() < 1e-9);
    }

    #[test]
    fn explicit_binding_shadows_named_constant() {
        let mut b = HashMap::new();
        b.insert("pi".to_string(), 3.0);
        assert_eq!(eval_str("pi", &b), Some(3.0));
    }

    #[test]
    fn unbound_variable_is_none() {
        assert_eq!(eval_str("x + 1", &HashMap::new()), None);
    }
}
