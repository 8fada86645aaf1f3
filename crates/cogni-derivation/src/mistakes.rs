//! Mistake detection: for each non-equivalent step, run an ordered list of
//! pattern+AST detectors and report the first match (spec §4.2 "Mistake
//! detection", closed kind set from §3).

use once_cell::sync::Lazy;
use regex::Regex;

use cogni_ast::{eval, parse_expression, BinaryOp, Node, UnaryOp};
use cogni_rewrite::compare;

use crate::derivative::{derivative, needs_chain_rule, needs_product_rule};
use crate::step::DerivationStep;

/// The closed set of mistake kinds this detector recognizes (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MistakeKind {
    /// `rhs` is `lhs` with a flipped sign.
    SignError,
    /// `a*(b±c)` distributed to only one of the two terms.
    DistributionError,
    /// `a - (b - c)` mis-distributed as `a - b - c`.
    SubtractionDistributionError,
    /// An invalid additive cancellation, e.g. `(a+b)/a → b`.
    CancellationError,
    /// Coefficients of like terms summed incorrectly.
    CoefficientError,
    /// An exponent combined incorrectly (e.g. under `multiply_powers`).
    ExponentError,
    /// Operator precedence applied left-to-right instead of by precedence.
    OrderOfOperationsError,
    /// The `a/b + c/d = (a+c)/(b+d)` fraction-addition fallacy.
    FractionError,
    /// Unlike terms combined as though they were like terms.
    LikeTermsError,
    /// A derivative power rule applied incorrectly or not at all.
    PowerRuleError,
    /// A derivative chain-rule factor dropped.
    ChainRuleError,
    /// A derivative product rule replaced with multiplying the factors' derivatives.
    ProductRuleError,
}

/// One detected mistake.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedMistake {
    /// One-based step index.
    pub step: usize,
    /// The kind of mistake.
    pub kind: MistakeKind,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// A fully-formed correct step (`"lhs = rhs"`) fixing the mistake.
    pub suggested_fix: String,
}

/// Result of running mistake detection over a chain.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MistakeDetectionResult {
    /// Every mistake found, in step order (at most one per step).
    pub mistakes: Vec<DetectedMistake>,
}

static DERIVATIVE_NOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^\s*d\s*/\s*dx|derivative\s+of").expect("static regex"));

/// Run the full ordered detector chain over a single step's parsed sides,
/// skipping pairs that are themselves equivalent (no mistake to find).
fn detect_in_step(lhs_text: &str, rhs_text: &str) -> Option<(MistakeKind, f64, String)> {
    if DERIVATIVE_NOTATION.is_match(lhs_text) {
        return detect_derivative_mistake(lhs_text, rhs_text);
    }
    let lhs = parse_expression(lhs_text)?;
    let rhs = parse_expression(rhs_text)?;

    detect_sign_error(&lhs, &rhs, rhs_text)
        .or_else(|| detect_distribution_error(&lhs, &rhs))
        .or_else(|| detect_subtraction_distribution_error(&lhs, &rhs))
        .or_else(|| detect_fraction_error(&lhs, &rhs))
        .or_else(|| detect_cancellation_error(&lhs, &rhs))
        .or_else(|| detect_coefficient_error(&lhs, &rhs))
        .or_else(|| detect_like_terms_error(&lhs, &rhs))
        .or_else(|| detect_exponent_error(&lhs, &rhs))
        .or_else(|| detect_order_of_operations_error(lhs_text, &rhs))
}

/// Run mistake detection over every step, skipping equivalent pairs.
#[must_use]
pub fn detect_common_mistakes(steps: &[DerivationStep]) -> MistakeDetectionResult {
    let mut mistakes = Vec::new();
    for (index, step) in steps.iter().enumerate() {
        if compare(&step.lhs, &step.rhs) {
            continue;
        }
        if let Some((kind, confidence, suggested_fix)) = detect_in_step(&step.lhs, &step.rhs) {
            mistakes.push(DetectedMistake { step: index + 1, kind, confidence, suggested_fix });
        }
    }
    MistakeDetectionResult { mistakes }
}

// ---- sign_error ----

fn detect_sign_error(lhs: &Node, rhs: &Node, rhs_text: &str) -> Option<(MistakeKind, f64, String)> {
    let negated_rhs = Node::unary(UnaryOp::Neg, rhs.clone());
    if compare(&negated_rhs.to_string(), &lhs.to_string()) {
        let fix = format!("{} = -({})", lhs, rhs_text.trim());
        return Some((MistakeKind::SignError, 0.85, fix));
    }
    None
}

// ---- distribution_error ----

fn detect_distribution_error(lhs: &Node, rhs: &Node) -> Option<(MistakeKind, f64, String)> {
    let Node::Binary { op: BinaryOp::Mul, left: a, right: inner } = lhs else { return None };
    let Node::Binary { op: inner_op @ (BinaryOp::Add | BinaryOp::Sub), left: b, right: c } = inner.as_ref() else { return None };
    let fully_distributed = Node::binary(
        *inner_op,
        Node::binary(BinaryOp::Mul, (**a).clone(), (**b).clone()),
        Node::binary(BinaryOp::Mul, (**a).clone(), (**c).clone()),
    );
    // The student's rhs looks like `a*b <op> c`: the first term was
    // distributed, the second was left bare.
    let Node::Binary { op: rhs_op, left: rhs_first, right: rhs_second } = rhs else { return None };
    if *rhs_op != *inner_op {
        return None;
    }
    let first_distributed = compare(&rhs_first.to_string(), &Node::binary(BinaryOp::Mul, (**a).clone(), (**b).clone()).to_string());
    let second_bare = compare(&rhs_second.to_string(), &c.to_string());
    if first_distributed && second_bare {
        return Some((MistakeKind::DistributionError, 0.85, format!("{lhs} = {fully_distributed}")));
    }
    None
}

// ---- subtraction_distribution_error ----

/// Flatten a `+`/`-` chain into signed terms, e.g. `a - (b - c)` flattens to
/// `[(+,a), (-,b), (+,c)]`.
fn signed_flatten(node: &Node, sign: f64, out: &mut Vec<(f64, Node)>) {
    match node {
        Node::Binary { op: BinaryOp::Add, left, right } => {
            signed_flatten(left, sign, out);
            signed_flatten(right, sign, out);
        }
        Node::Binary { op: BinaryOp::Sub, left, right } => {
            signed_flatten(left, sign, out);
            signed_flatten(right, -sign, out);
        }
        Node::Unary { op: UnaryOp::Neg, operand } => signed_flatten(operand, -sign, out),
        Node::Unary { op: UnaryOp::Pos, operand } => signed_flatten(operand, sign, out),
        other => out.push((sign, other.clone())),
    }
}

fn detect_subtraction_distribution_error(lhs: &Node, rhs: &Node) -> Option<(MistakeKind, f64, String)> {
    let Node::Binary { op: BinaryOp::Sub, left: _, right } = lhs else { return None };
    if !matches!(right.as_ref(), Node::Binary { op: BinaryOp::Add | BinaryOp::Sub, .. }) {
        return None;
    }
    let mut correct = Vec::new();
    signed_flatten(lhs, 1.0, &mut correct);
    let mut written = Vec::new();
    signed_flatten(rhs, 1.0, &mut written);
    if correct.len() != written.len() {
        return None;
    }
    // Same terms (by text), but with at least one sign flipped — the
    // textbook "forgot to flip the sign inside the parentheses" mistake.
    let same_terms = correct.iter().zip(&written).all(|((_, a), (_, b))| a.to_string() == b.to_string());
    let any_sign_flipped = correct.iter().zip(&written).any(|((sa, _), (sb, _))| (sa - sb).abs() > f64::EPSILON);
    if same_terms && any_sign_flipped {
        let rebuilt = correct.into_iter().fold(None, |acc: Option<Node>, (sign, term)| {
            let signed_term = if sign < 0.0 { Node::unary(UnaryOp::Neg, term) } else { term };
            Some(match acc {
                None => signed_term,
                Some(prev) => Node::binary(BinaryOp::Add, prev, signed_term),
            })
        });
        if let Some(fix_rhs) = rebuilt {
            return Some((MistakeKind::SubtractionDistributionError, 0.8, format!("{lhs} = {fix_rhs}")));
        }
    }
    None
}

// ---- fraction_error ----

fn detect_fraction_error(lhs: &Node, rhs: &Node) -> Option<(MistakeKind, f64, String)> {
    let Node::Binary { op: BinaryOp::Add, left, right } = lhs else { return None };
    let Node::Binary { op: BinaryOp::Div, left: a, right: b } = left.as_ref() else { return None };
    let Node::Binary { op: BinaryOp::Div, left: c, right: d } = right.as_ref() else { return None };
    let Node::Binary { op: BinaryOp::Div, left: rhs_num, right: rhs_den } = rhs else { return None };
    let claimed_num = Node::binary(BinaryOp::Add, (**a).clone(), (**c).clone());
    let claimed_den = Node::binary(BinaryOp::Add, (**b).clone(), (**d).clone());
    if compare(&rhs_num.to_string(), &claimed_num.to_string()) && compare(&rhs_den.to_string(), &claimed_den.to_string()) {
        let correct = Node::binary(
            BinaryOp::Div,
            Node::binary(BinaryOp::Add, Node::binary(BinaryOp::Mul, (**a).clone(), (**d).clone()), Node::binary(BinaryOp::Mul, (**c).clone(), (**b).clone())),
            Node::binary(BinaryOp::Mul, (**b).clone(), (**d).clone()),
        );
        return Some((MistakeKind::FractionError, 0.9, format!("{lhs} = {correct}")));
    }
    None
}

// ---- cancellation_error ----

fn detect_cancellation_error(lhs: &Node, rhs: &Node) -> Option<(MistakeKind, f64, String)> {
    let Node::Binary { op: BinaryOp::Div, left, right: denom } = lhs else { return None };
    let Node::Binary { op: BinaryOp::Add, left: a, right: b } = left.as_ref() else { return None };
    // (a+b)/denom "simplified" to just the addend that isn't textually the
    // denominator — the invalid additive-cancellation fallacy.
    let cancels_a = compare(&a.to_string(), &denom.to_string());
    let cancels_b = compare(&b.to_string(), &denom.to_string());
    let student_kept = if cancels_a { b.as_ref() } else if cancels_b { a.as_ref() } else { return None };
    if compare(&rhs.to_string(), &student_kept.to_string()) {
        let correct = Node::binary(BinaryOp::Add, Node::num(1.0), Node::binary(BinaryOp::Div, student_kept.clone(), (**denom).clone()));
        return Some((MistakeKind::CancellationError, 0.75, format!("{lhs} = {correct}")));
    }
    None
}

// ---- coefficient_error ----

static TERM_COEFFICIENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-?\d+(?:\.\d+)?)\s*\*?\s*([A-Za-z_][A-Za-z0-9_]*)$").expect("static regex"));

fn term_coefficient(text: &str) -> Option<(f64, String)> {
    let trimmed = text.trim();
    if let Some(caps) = TERM_COEFFICIENT.captures(trimmed) {
        let coeff: f64 = caps[1].parse().ok()?;
        return Some((coeff, caps[2].to_string()));
    }
    if trimmed.chars().all(|c| c.is_alphabetic() || c == '_') && !trimmed.is_empty() {
        return Some((1.0, trimmed.to_string()));
    }
    None
}

fn detect_coefficient_error(lhs: &Node, rhs: &Node) -> Option<(MistakeKind, f64, String)> {
    let Node::Binary { op: BinaryOp::Add, left, right } = lhs else { return None };
    let (c1, base1) = term_coefficient(&left.to_string())?;
    let (c2, base2) = term_coefficient(&right.to_string())?;
    if base1 != base2 {
        return None;
    }
    let (rc, rbase) = term_coefficient(&rhs.to_string())?;
    if rbase != base1 {
        return None;
    }
    let expected = c1 + c2;
    if (rc - expected).abs() > 1e-9 {
        let fix = if expected == 1.0 { format!("{lhs} = {base1}") } else { format!("{lhs} = {expected}*{base1}") };
        return Some((MistakeKind::CoefficientError, 0.8, fix));
    }
    None
}

// ---- like_terms_error ----

fn detect_like_terms_error(lhs: &Node, rhs: &Node) -> Option<(MistakeKind, f64, String)> {
    let Node::Binary { op: BinaryOp::Add, left, right } = lhs else { return None };
    let vars_left = left.free_variables();
    let vars_right = right.free_variables();
    if vars_left.is_empty() || vars_right.is_empty() || vars_left == vars_right {
        return None; // either a constant side, or genuinely like terms
    }
    // Unlike terms (different variable sets) can't legally combine into a
    // single term; if the student's rhs did exactly that, it's a mistake.
    if rhs.free_variables().len() < vars_left.len() + vars_right.len() && rhs.free_variables() != vars_left {
        return Some((MistakeKind::LikeTermsError, 0.7, format!("{lhs} = {lhs}")));
    }
    None
}

// ---- exponent_error ----

fn detect_exponent_error(lhs: &Node, rhs: &Node) -> Option<(MistakeKind, f64, String)> {
    let Node::Binary { op: BinaryOp::Mul, left, right } = lhs else { return None };
    let Node::Binary { op: BinaryOp::Pow, left: base_a, right: exp_a } = left.as_ref() else { return None };
    let Node::Binary { op: BinaryOp::Pow, left: base_b, right: exp_b } = right.as_ref() else { return None };
    if !compare(&base_a.to_string(), &base_b.to_string()) {
        return None;
    }
    let (Node::Number(a), Node::Number(b)) = (exp_a.as_ref(), exp_b.as_ref()) else { return None };
    let Node::Binary { op: BinaryOp::Pow, right: rhs_exp, .. } = rhs else { return None };
    let Node::Number(claimed) = rhs_exp.as_ref() else { return None };
    let expected = a + b;
    if (claimed - expected).abs() > 1e-9 {
        let correct = Node::binary(BinaryOp::Pow, (**base_a).clone(), Node::signed_number(expected));
        return Some((MistakeKind::ExponentError, 0.8, format!("{lhs} = {correct}")));
    }
    None
}

// ---- order_of_operations ----

/// Evaluate `lhs_text`'s tokens strictly left-to-right, ignoring operator
/// precedence (the mistake this detector looks for), falling back to
/// `None` on anything it can't evaluate this way.
fn left_to_right_eval(lhs: &Node) -> Option<f64> {
    fn collect(node: &Node, out: &mut Vec<(f64, char)>) -> bool {
        match node {
            Node::Number(v) => {
                out.push((*v, '#'));
                true
            }
            Node::Binary { op, left, right } => {
                let ch = match op {
                    BinaryOp::Add => '+',
                    BinaryOp::Sub => '-',
                    BinaryOp::Mul => '*',
                    BinaryOp::Div => '/',
                    BinaryOp::Pow => return false,
                };
                if !collect(left, out) {
                    return false;
                }
                let before = out.len();
                if !collect(right, out) || out.len() != before + 1 {
                    return false;
                }
                out.last_mut().expect("just pushed").1 = ch;
                true
            }
            _ => false,
        }
    }
    let mut flat = Vec::new();
    if !collect(lhs, &mut flat) || flat.is_empty() {
        return None;
    }
    let (mut acc, _) = flat[0];
    for (value, op) in &flat[1..] {
        acc = match op {
            '+' => acc + value,
            '-' => acc - value,
            '*' => acc * value,
            '/' if *value != 0.0 => acc / value,
            _ => return None,
        };
    }
    Some(acc)
}

fn detect_order_of_operations_error(lhs_text: &str, rhs: &Node) -> Option<(MistakeKind, f64, String)> {
    let lhs = parse_expression(lhs_text)?;
    let correct = eval(&lhs, &std::collections::HashMap::new())?;
    let wrong = left_to_right_eval(&lhs)?;
    if (wrong - correct).abs() < 1e-9 {
        return None; // precedence didn't actually matter for this expression
    }
    let claimed = eval(rhs, &std::collections::HashMap::new())?;
    if (claimed - wrong).abs() < 1e-9 {
        return Some((MistakeKind::OrderOfOperationsError, 0.85, format!("{lhs_text} = {correct}")));
    }
    None
}

// ---- derivative mistakes: power_rule / chain_rule / product_rule ----

fn strip_derivative_notation(text: &str) -> String {
    DERIVATIVE_NOTATION.replace(text, "").trim().trim_start_matches('(').trim_end_matches(')').to_string()
}

fn detect_derivative_mistake(lhs_text: &str, rhs_text: &str) -> Option<(MistakeKind, f64, String)> {
    let inner_text = strip_derivative_notation(lhs_text);
    let inner = parse_expression(&inner_text)?;
    let correct = derivative(&inner, "x")?;
    let rhs = parse_expression(rhs_text)?;
    if compare(&rhs.to_string(), &correct.to_string()) {
        return None;
    }
    let fix = format!("{lhs_text} = {correct}");
    if needs_product_rule(&inner, "x") {
        return Some((MistakeKind::ProductRuleError, 0.75, fix));
    }
    if needs_chain_rule(&inner, "x") {
        return Some((MistakeKind::ChainRuleError, 0.75, fix));
    }
    Some((MistakeKind::PowerRuleError, 0.75, fix))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn chain(pairs: &[(&str, &str)]) -> Vec<DerivationStep> {
        pairs.iter().map(|(l, r)| DerivationStep::new(*l, *r)).collect()
    }

    #[test]
    fn detects_a_coefficient_error() {
        let result = detect_common_mistakes(&chain(&[("x + x", "3x")]));
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::CoefficientError);
        assert_eq!(result.mistakes[0].step, 1);
    }

    #[test]
    fn detects_a_sign_error() {
        let result = detect_common_mistakes(&chain(&[("-(x + 1)", "x + 1")]));
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::SignError);
    }

    #[test]
    fn detects_a_distribution_error() {
        let result = detect_common_mistakes(&chain(&[("2*(x + 3)", "2*x + 3")]));
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::DistributionError);
    }

    #[test]
    fn detects_a_fraction_addition_error() {
        let result = detect_common_mistakes(&chain(&[("1/2 + 1/3", "2/5")]));
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::FractionError);
    }

    #[test]
    fn detects_a_power_rule_error() {
        let result = detect_common_mistakes(&chain(&[("d/dx(x^3)", "x^2")]));
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::PowerRuleError);
    }

    #[test]
    fn detects_a_chain_rule_error() {
        let result = detect_common_mistakes(&chain(&[("d/dx(sin(2*x))", "cos(2*x)")]));
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::ChainRuleError);
    }

    #[test]
    fn detects_a_product_rule_error() {
        // The fallacy: d/dx(x*sin(x)) "computed" as derivative(x)*derivative(sin(x)) = 1*cos(x).
        let result = detect_common_mistakes(&chain(&[("d/dx(x*sin(x))", "cos(x)")]));
        assert_eq!(result.mistakes.len(), 1);
        assert_eq!(result.mistakes[0].kind, MistakeKind::ProductRuleError);
    }

    #[test]
    fn equivalent_steps_report_no_mistake() {
        let result = detect_common_mistakes(&chain(&[("x + x", "2*x")]));
        assert!(result.mistakes.is_empty());
    }
}
