//! Symbolic derivatives and numerical definite integrals (spec §4.4
//! "calculus"). The symbolic side is grounded on the same power/sum-rule
//! differentiation `cogni-derivation` uses internally for its mistake
//! detectors, reimplemented here over the handful of forms this solver
//! actually needs to present back as text.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use cogni_ast::{eval, parse_expression, BinaryOp, Node, UnaryOp};

use crate::types::{solver_type, ComputeResult, Solver};

use super::timed;

static DERIVATIVE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:differentiate|derivative\s+of|d/dx)\s*(?:of)?:?\s*(.+?)\s*(?:with\s+respect\s+to\s+x)?[.?!]?$").expect("static regex"));
static DEFINITE_INTEGRAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)integrate\s+(.+?)\s+from\s+(-?\d+(?:\.\d+)?)\s+to\s+(-?\d+(?:\.\d+)?)").expect("static regex"));

fn is_constant_wrt(node: &Node, var: &str) -> bool {
    !node.free_variables().iter().any(|name| name == var)
}

/// Power rule, sum/difference rule, constant-multiple rule, and `sin`/`cos`/
/// `ln`/`e^x` forms (the bare-function-of-`x` case only — no chain rule,
/// matching the narrow textual surface this solver targets).
fn differentiate(node: &Node, var: &str) -> Option<Node> {
    match node {
        Node::Number(_) => Some(Node::num(0.0)),
        Node::Variable(name) if name == var => Some(Node::num(1.0)),
        Node::Variable(_) => Some(Node::num(0.0)),
        Node::Unary { op: UnaryOp::Neg, operand } => Some(Node::unary(UnaryOp::Neg, differentiate(operand, var)?)),
        Node::Unary { op: UnaryOp::Pos, operand } => differentiate(operand, var),
        Node::Binary { op: BinaryOp::Add, left, right } => Some(Node::binary(BinaryOp::Add, differentiate(left, var)?, differentiate(right, var)?)),
        Node::Binary { op: BinaryOp::Sub, left, right } => Some(Node::binary(BinaryOp::Sub, differentiate(left, var)?, differentiate(right, var)?)),
        Node::Binary { op: BinaryOp::Mul, left, right } => {
            if is_constant_wrt(left, var) {
                return Some(Node::binary(BinaryOp::Mul, (**left).clone(), differentiate(right, var)?));
            }
            if is_constant_wrt(right, var) {
                return Some(Node::binary(BinaryOp::Mul, (**right).clone(), differentiate(left, var)?));
            }
            function_derivative(left, right, var)
        }
        Node::Binary { op: BinaryOp::Pow, left, right } => {
            let Node::Variable(name) = left.as_ref() else { return None };
            if name != var {
                return None;
            }
            let Node::Number(n) = right.as_ref() else { return None };
            // d/dx x^n = n * x^(n-1)
            Some(Node::binary(BinaryOp::Mul, Node::num(*n), Node::binary(BinaryOp::Pow, (**left).clone(), Node::num(n - 1.0))))
        }
        _ => None,
    }
}

/// `sin(x)`/`cos(x)`/`ln(x)` arrive as `Mul(Variable(name), arg)` per the
/// parser's juxtaposition treatment of function application.
fn function_derivative(left: &Node, right: &Node, var: &str) -> Option<Node> {
    let Node::Variable(name) = left else { return None };
    let Node::Variable(arg_name) = right else { return None };
    if arg_name != var {
        return None;
    }
    match name.as_str() {
        "sin" => Some(Node::binary(BinaryOp::Mul, Node::var("cos"), (*right).clone())),
        "cos" => Some(Node::unary(UnaryOp::Neg, Node::binary(BinaryOp::Mul, Node::var("sin"), (*right).clone()))),
        "ln" => Some(Node::binary(BinaryOp::Div, Node::num(1.0), (*right).clone())),
        _ => None,
    }
}

fn solve_derivative(lower: &str, text: &str) -> Option<ComputeResult> {
    let caps = DERIVATIVE_RE.captures(lower).or_else(|| DERIVATIVE_RE.captures(text))?;
    let expr_text = caps[1].trim();
    let expr = parse_expression(expr_text)?;
    let derivative = differentiate(&expr, "x")?;
    Some(ComputeResult::solved("calculus_derivative", derivative.to_string(), 0.85, 0))
}

/// Composite Simpson's rule over an even number of subintervals.
fn simpson(f: impl Fn(f64) -> Option<f64>, a: f64, b: f64, subintervals: usize) -> Option<f64> {
    let n = if subintervals % 2 == 0 { subintervals } else { subintervals + 1 };
    let h = (b - a) / n as f64;
    let mut sum = f(a)? + f(b)?;
    for i in 1..n {
        let x = a + i as f64 * h;
        let weight = if i % 2 == 0 { 2.0 } else { 4.0 };
        sum += weight * f(x)?;
    }
    Some(sum * h / 3.0)
}

fn solve_definite_integral(lower: &str) -> Option<ComputeResult> {
    let caps = DEFINITE_INTEGRAL_RE.captures(lower)?;
    let expr = parse_expression(caps[1].trim())?;
    let a: f64 = caps[2].parse().ok()?;
    let b: f64 = caps[3].parse().ok()?;
    let value = simpson(|x| eval(&expr, &HashMap::from([("x".to_string(), x)])), a, b, 100)?;
    if !value.is_finite() {
        return None;
    }
    Some(ComputeResult::solved("calculus_integral", format!("{value:.6}"), 0.85, 0))
}

fn solve(text: &str, lower: &str) -> ComputeResult {
    timed(|| solve_derivative(lower, text).or_else(|| solve_definite_integral(lower)).unwrap_or_else(ComputeResult::unsolved))
}

/// The registry entry for this solver.
pub const SOLVER: Solver =
    Solver { name: "calculus", description: "Symbolic derivatives of simple forms and Simpson's-rule definite integrals", types: solver_type::CALCULUS, priority: 35, solve };
