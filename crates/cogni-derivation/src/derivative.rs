//! Minimal symbolic differentiation for a restricted class of expressions
//! (spec §4.2: "monomials, sin/cos, e^x, ln"), used only to power the
//! power/chain/product-rule mistake detectors — not exposed as a general
//! calculus facility (that lives in the `cogni-solvers` crate).
//!
//! Function application has no dedicated AST node (per the math parser's
//! juxtaposition treatment: `sin(x)` parses as `Variable("sin")` implicitly
//! multiplied by `(x)`). A multiplicative chain with other factors to its
//! left, e.g. `x*sin(x)`, parses left-associatively as `(x*sin)*x` rather
//! than `x*(sin*x)` — so recognizing "sin applied to an argument" requires
//! flattening the whole `*`-chain first and re-pairing adjacent factors,
//! not just pattern-matching the immediate `Mul` node.

use cogni_ast::{BinaryOp, Node, UnaryOp};

fn is_constant_wrt(node: &Node, var: &str) -> bool {
    !node.free_variables().iter().any(|name| name == var)
}

/// Fully flatten a left- or right-nested chain of `*` into its factors, in
/// left-to-right order.
fn flatten_mul_chain(node: &Node) -> Vec<Node> {
    match node {
        Node::Binary { op: BinaryOp::Mul, left, right } => {
            let mut factors = flatten_mul_chain(left);
            factors.extend(flatten_mul_chain(right));
            factors
        }
        other => vec![other.clone()],
    }
}

const FUNCTION_NAMES: [&str; 3] = ["sin", "cos", "ln"];

/// Re-pair adjacent `(Variable(name), arg)` factors for a recognized
/// function name back into a single `Mul(Variable(name), arg)` node — the
/// same shape the parser itself produces for a lone `name(arg)`.
fn merge_function_factors(factors: Vec<Node>) -> Vec<Node> {
    let mut merged = Vec::new();
    let mut i = 0;
    while i < factors.len() {
        if let Node::Variable(name) = &factors[i] {
            if FUNCTION_NAMES.contains(&name.as_str()) && i + 1 < factors.len() {
                merged.push(Node::binary(BinaryOp::Mul, factors[i].clone(), factors[i + 1].clone()));
                i += 2;
                continue;
            }
        }
        merged.push(factors[i].clone());
        i += 1;
    }
    merged
}

/// The merged multiplicative factors of `node` (a singleton for anything
/// that isn't itself a `*`-chain).
fn factors_of(node: &Node) -> Vec<Node> {
    merge_function_factors(flatten_mul_chain(node))
}

fn function_marker(node: &Node) -> Option<(&str, &Node)> {
    if let Node::Binary { op: BinaryOp::Mul, left, right } = node {
        if let Node::Variable(name) = left.as_ref() {
            if FUNCTION_NAMES.contains(&name.as_str()) {
                return Some((name.as_str(), right.as_ref()));
            }
        }
    }
    None
}

/// Differentiate a single merged factor (never itself a bare `*`-chain,
/// other than the `sin`/`cos`/`ln` application shape `function_marker`
/// recognizes).
fn differentiate_factor(factor: &Node, var: &str) -> Option<Node> {
    if let Some((name, arg)) = function_marker(factor) {
        let d_arg = derivative(arg, var)?;
        return Some(match name {
            "sin" => Node::binary(BinaryOp::Mul, Node::binary(BinaryOp::Mul, Node::var("cos"), arg.clone()), d_arg),
            "cos" => Node::unary(UnaryOp::Neg, Node::binary(BinaryOp::Mul, Node::binary(BinaryOp::Mul, Node::var("sin"), arg.clone()), d_arg)),
            "ln" => Node::binary(BinaryOp::Div, d_arg, arg.clone()),
            _ => unreachable!("function_marker only recognizes sin/cos/ln"),
        });
    }
    derivative(factor, var)
}

/// Differentiate `node` with respect to `var`. Returns `None` for anything
/// outside the restricted class (an `a^g(x)` with a non-`e` base whose
/// exponent depends on `var`, or an unrecognized function name, are not
/// supported).
#[must_use]
pub fn derivative(node: &Node, var: &str) -> Option<Node> {
    if let Node::Binary { op: BinaryOp::Mul, .. } = node {
        let factors = factors_of(node);
        if factors.len() > 1 {
            let mut terms = Vec::with_capacity(factors.len());
            for (i, factor) in factors.iter().enumerate() {
                let d_i = differentiate_factor(factor, var)?;
                let rest = factors.iter().enumerate().filter(|(j, _)| *j != i).map(|(_, f)| f.clone());
                let term = rest.fold(d_i, |acc, f| Node::binary(BinaryOp::Mul, acc, f));
                terms.push(term);
            }
            return terms.into_iter().reduce(|a, b| Node::binary(BinaryOp::Add, a, b));
        }
        // A lone function application (`sin(x)` etc.) flattens to a single
        // merged factor equal to `node` itself; fall through below rather
        // than recursing into `differentiate_factor` -> `derivative` -> here.
        if let Some((name, arg)) = function_marker(node) {
            let d_arg = derivative(arg, var)?;
            return Some(match name {
                "sin" => Node::binary(BinaryOp::Mul, Node::binary(BinaryOp::Mul, Node::var("cos"), arg.clone()), d_arg),
                "cos" => Node::unary(UnaryOp::Neg, Node::binary(BinaryOp::Mul, Node::binary(BinaryOp::Mul, Node::var("sin"), arg.clone()), d_arg)),
                "ln" => Node::binary(BinaryOp::Div, d_arg, arg.clone()),
                _ => unreachable!(),
            });
        }
    }

    match node {
        Node::Number(_) => Some(Node::num(0.0)),
        Node::Variable(name) => Some(if name == var { Node::num(1.0) } else { Node::num(0.0) }),
        Node::Unary { op, operand } => {
            let d = derivative(operand, var)?;
            Some(match op {
                UnaryOp::Neg => Node::unary(UnaryOp::Neg, d),
                UnaryOp::Pos => d,
            })
        }
        Node::Binary { op: BinaryOp::Add, left, right } => Some(Node::binary(BinaryOp::Add, derivative(left, var)?, derivative(right, var)?)),
        Node::Binary { op: BinaryOp::Sub, left, right } => Some(Node::binary(BinaryOp::Sub, derivative(left, var)?, derivative(right, var)?)),
        Node::Binary { op: BinaryOp::Mul, .. } => unreachable!("Mul is handled above via factors_of"),
        Node::Binary { op: BinaryOp::Div, left, right } => {
            if is_constant_wrt(right, var) {
                return Some(Node::binary(BinaryOp::Div, derivative(left, var)?, (**right).clone()));
            }
            let d_left = derivative(left, var)?;
            let d_right = derivative(right, var)?;
            let numerator = Node::binary(
                BinaryOp::Sub,
                Node::binary(BinaryOp::Mul, d_left, (**right).clone()),
                Node::binary(BinaryOp::Mul, (**left).clone(), d_right),
            );
            let denominator = Node::binary(BinaryOp::Pow, (**right).clone(), Node::num(2.0));
            Some(Node::binary(BinaryOp::Div, numerator, denominator))
        }
        Node::Binary { op: BinaryOp::Pow, left, right } => {
            if let Node::Variable(name) = left.as_ref() {
                if name == var {
                    if let Node::Number(n) = right.as_ref() {
                        let new_exp = Node::signed_number(n - 1.0);
                        return Some(Node::binary(BinaryOp::Mul, Node::num(*n), Node::binary(BinaryOp::Pow, (**left).clone(), new_exp)));
                    }
                }
                if name == "e" {
                    let d_exp = derivative(right, var)?;
                    return Some(Node::binary(BinaryOp::Mul, node.clone(), d_exp));
                }
            }
            None
        }
    }
}

/// Whether differentiating `node` would require the chain rule — a
/// `sin`/`cos`/`ln`/`e^u` application whose inner argument isn't just the
/// bare variable.
#[must_use]
pub fn needs_chain_rule(node: &Node, var: &str) -> bool {
    for factor in factors_of(node) {
        if let Some((_, arg)) = function_marker(&factor) {
            if !matches!(arg, Node::Variable(name) if name == var) {
                return true;
            }
        }
    }
    if let Node::Binary { op: BinaryOp::Pow, left, right } = node {
        if matches!(left.as_ref(), Node::Variable(name) if name == "e") {
            return !matches!(right.as_ref(), Node::Variable(name) if name == var);
        }
    }
    false
}

/// Whether `node` is a product of two or more factors that each depend on
/// `var` (product-rule territory, as opposed to a constant multiple).
#[must_use]
pub fn needs_product_rule(node: &Node, var: &str) -> bool {
    let factors = factors_of(node);
    factors.len() > 1 && factors.iter().filter(|f| !is_constant_wrt(f, var)).count() > 1
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cogni_ast::parse_expression;
    use cogni_rewrite::compare;

    #[test]
    fn differentiates_a_monomial() {
        let d = derivative(&parse_expression("x^3").unwrap(), "x").unwrap();
        assert!(compare(&d.to_string(), "3*x^2"));
    }

    #[test]
    fn differentiates_a_sum_of_monomials() {
        let d = derivative(&parse_expression("x^2 + x").unwrap(), "x").unwrap();
        assert!(compare(&d.to_string(), "2*x + 1"));
    }

    #[test]
    fn differentiates_sin_with_chain_rule() {
        let ast = parse_expression("sin(2*x)").unwrap();
        assert!(needs_chain_rule(&ast, "x"));
        let d = derivative(&ast, "x").unwrap();
        assert!(compare(&d.to_string(), "cos(2*x)*2"));
    }

    #[test]
    fn bare_sin_needs_no_chain_rule() {
        let ast = parse_expression("sin(x)").unwrap();
        assert!(!needs_chain_rule(&ast, "x"));
        let d = derivative(&ast, "x").unwrap();
        assert!(compare(&d.to_string(), "cos(x)"));
    }

    #[test]
    fn differentiates_ln() {
        let d = derivative(&parse_expression("ln(x)").unwrap(), "x").unwrap();
        assert!(compare(&d.to_string(), "1/x"));
    }

    #[test]
    fn differentiates_exponential() {
        let d = derivative(&parse_expression("e^x").unwrap(), "x").unwrap();
        assert!(compare(&d.to_string(), "e^x"));
    }

    #[test]
    fn product_rule_is_detected_and_computed() {
        let ast = parse_expression("x*sin(x)").unwrap();
        assert!(needs_product_rule(&ast, "x"));
        let d = derivative(&ast, "x").unwrap();
        assert!(compare(&d.to_string(), "sin(x) + x*cos(x)"));
    }

    #[test]
    fn constant_multiple_is_not_product_rule() {
        let ast = parse_expression("3*x^2").unwrap();
        assert!(!needs_product_rule(&ast, "x"));
    }
}
