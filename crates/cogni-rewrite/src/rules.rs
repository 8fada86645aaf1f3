//! The canonical transformation registry (spec §4.3).
//!
//! Each [`Rule`] is a plain function-pointer pair (`applies`/`apply`) rather
//! than a trait object, per the design notes' preference for a table of
//! function pointers over dynamic dispatch for this kind of small,
//! closed predicate/applier set.

use std::collections::HashMap;

use cogni_ast::{eval, BinaryOp, Node, UnaryOp};

/// One entry in the transformation registry.
#[derive(Clone, Copy)]
pub struct Rule {
    /// Stable identifier, also used as the `method`/`transformation` tag in
    /// derivation step logs.
    pub name: &'static str,
    /// Human-readable description surfaced in simplification step logs.
    pub description: &'static str,
    /// Higher runs first. Ties break by registration order (table order).
    pub priority: u8,
    /// Cheap predicate: does this rule match at the root of `node`
    /// (not its children — the registry walks the tree itself)?
    pub applies: fn(&Node) -> bool,
    /// Rewrite the matched root. Only called when `applies` returned
    /// `true`. Returns the replacement and whether anything actually
    /// changed (the indeterminate guard returns `false` here on purpose).
    pub apply: fn(&Node) -> (Node, bool),
}

/// The full, priority-ordered rule table (spec §4.3).
pub const RULES: &[Rule] = &[
    Rule { name: "constant_fold", description: "evaluate a numeric operation", priority: 100, applies: constant_fold_applies, apply: constant_fold_apply },
    Rule { name: "indeterminate_zero_power_zero", description: "0^0 is indeterminate; simplification stops", priority: 95, applies: indeterminate_applies, apply: indeterminate_apply },
    Rule { name: "add_zero", description: "x + 0 = x", priority: 90, applies: add_zero_applies, apply: add_zero_apply },
    Rule { name: "multiply_one", description: "x * 1 = x", priority: 90, applies: multiply_one_applies, apply: multiply_one_apply },
    Rule { name: "multiply_zero", description: "x * 0 = 0", priority: 90, applies: multiply_zero_applies, apply: multiply_zero_apply },
    Rule { name: "power_one", description: "x^1 = x", priority: 90, applies: power_one_applies, apply: power_one_apply },
    Rule { name: "power_zero", description: "x^0 = 1", priority: 90, applies: power_zero_applies, apply: power_zero_apply },
    Rule { name: "base_one", description: "1^x = 1", priority: 90, applies: base_one_applies, apply: base_one_apply },
    Rule { name: "subtract_self", description: "x - x = 0", priority: 85, applies: subtract_self_applies, apply: subtract_self_apply },
    Rule { name: "subtract_from_zero", description: "0 - x = -x", priority: 85, applies: subtract_from_zero_applies, apply: subtract_from_zero_apply },
    Rule { name: "divide_self", description: "x / x = 1", priority: 85, applies: divide_self_applies, apply: divide_self_apply },
    Rule { name: "double_negation", description: "-(-x) = x", priority: 80, applies: double_negation_applies, apply: double_negation_apply },
    Rule { name: "combine_like_terms", description: "ax + bx = (a+b)x", priority: 70, applies: combine_like_terms_applies, apply: combine_like_terms_apply },
    Rule { name: "distribute", description: "a(b \u{00B1} c) = ab \u{00B1} ac", priority: 60, applies: distribute_applies, apply: distribute_apply },
    Rule { name: "factor_common", description: "ab + ac = a(b + c)", priority: 55, applies: factor_common_applies, apply: factor_common_apply },
    Rule { name: "simplify_fraction", description: "reduce an integer fraction by its gcd", priority: 50, applies: simplify_fraction_applies, apply: simplify_fraction_apply },
    Rule { name: "power_of_power", description: "(x^a)^b = x^(a*b)", priority: 45, applies: power_of_power_applies, apply: power_of_power_apply },
    Rule { name: "multiply_powers", description: "x^a * x^b = x^(a+b)", priority: 45, applies: multiply_powers_applies, apply: multiply_powers_apply },
];

fn is_zero(n: &Node) -> bool {
    matches!(n, Node::Number(v) if *v == 0.0)
}

fn is_one(n: &Node) -> bool {
    matches!(n, Node::Number(v) if *v == 1.0)
}

// ---- constant_fold ----

fn constant_fold_applies(node: &Node) -> bool {
    match node {
        Node::Binary { left, right, .. } => {
            matches!(left.as_ref(), Node::Number(_)) && matches!(right.as_ref(), Node::Number(_)) && eval(node, &HashMap::new()).is_some()
        }
        Node::Unary { operand, .. } => matches!(operand.as_ref(), Node::Number(_)),
        _ => false,
    }
}

fn constant_fold_apply(node: &Node) -> (Node, bool) {
    match eval(node, &HashMap::new()) {
        Some(value) => (Node::signed_number(value), true),
        None => (node.clone(), false),
    }
}

// ---- indeterminate_zero_power_zero (terminal guard) ----

fn indeterminate_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Pow, left, right } if is_zero(left) && is_zero(right))
}

fn indeterminate_apply(node: &Node) -> (Node, bool) {
    (node.clone(), false)
}

// ---- add_zero ----

fn add_zero_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Add, left, right } if is_zero(left) || is_zero(right))
}

fn add_zero_apply(node: &Node) -> (Node, bool) {
    if let Node::Binary { left, right, .. } = node {
        if is_zero(left) {
            return ((**right).clone(), true);
        }
        return ((**left).clone(), true);
    }
    (node.clone(), false)
}

// ---- multiply_one ----

fn multiply_one_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Mul, left, right } if is_one(left) || is_one(right))
}

fn multiply_one_apply(node: &Node) -> (Node, bool) {
    if let Node::Binary { left, right, .. } = node {
        if is_one(left) {
            return ((**right).clone(), true);
        }
        return ((**left).clone(), true);
    }
    (node.clone(), false)
}

// ---- multiply_zero ----

fn multiply_zero_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Mul, left, right } if is_zero(left) || is_zero(right))
}

fn multiply_zero_apply(_node: &Node) -> (Node, bool) {
    (Node::num(0.0), true)
}

// ---- power_one ----

fn power_one_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Pow, right, .. } if is_one(right))
}

fn power_one_apply(node: &Node) -> (Node, bool) {
    if let Node::Binary { left, .. } = node {
        return ((**left).clone(), true);
    }
    (node.clone(), false)
}

// ---- power_zero (guarded against 0^0 by the higher-priority guard rule) ----

fn power_zero_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Pow, left, right } if is_zero(right) && !is_zero(left))
}

fn power_zero_apply(_node: &Node) -> (Node, bool) {
    (Node::num(1.0), true)
}

// ---- base_one ----

fn base_one_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Pow, left, .. } if is_one(left))
}

fn base_one_apply(_node: &Node) -> (Node, bool) {
    (Node::num(1.0), true)
}

// ---- subtract_self ----

fn subtract_self_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Sub, left, right } if left == right)
}

fn subtract_self_apply(_node: &Node) -> (Node, bool) {
    (Node::num(0.0), true)
}

// ---- subtract_from_zero ----

fn subtract_from_zero_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Sub, left, right } if is_zero(left) && !is_zero(right))
}

fn subtract_from_zero_apply(node: &Node) -> (Node, bool) {
    if let Node::Binary { right, .. } = node {
        return (Node::unary(UnaryOp::Neg, (**right).clone()), true);
    }
    (node.clone(), false)
}

// ---- divide_self ----

fn divide_self_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Div, left, right } if left == right && !is_zero(left))
}

fn divide_self_apply(_node: &Node) -> (Node, bool) {
    (Node::num(1.0), true)
}

// ---- double_negation ----

fn double_negation_applies(node: &Node) -> bool {
    matches!(node, Node::Unary { op: UnaryOp::Neg, operand } if matches!(operand.as_ref(), Node::Unary { op: UnaryOp::Neg, .. }))
}

fn double_negation_apply(node: &Node) -> (Node, bool) {
    if let Node::Unary { operand, .. } = node {
        if let Node::Unary { operand: inner, .. } = operand.as_ref() {
            return ((**inner).clone(), true);
        }
    }
    (node.clone(), false)
}

// ---- combine_like_terms ----

/// Decompose `node` into `(coefficient, base)` so `ax + bx` can be spotted
/// regardless of whether the coefficient is spelled on the left or right of
/// a `*`, or omitted entirely (coefficient 1).
fn as_term(node: &Node) -> (f64, Node) {
    match node {
        Node::Unary { op: UnaryOp::Neg, operand } => {
            let (c, b) = as_term(operand);
            (-c, b)
        }
        Node::Binary { op: BinaryOp::Mul, left, right } => match (left.as_ref(), right.as_ref()) {
            (Node::Number(n), _) => (*n, (**right).clone()),
            (_, Node::Number(n)) => (*n, (**left).clone()),
            _ => (1.0, node.clone()),
        },
        _ => (1.0, node.clone()),
    }
}

fn combine_like_terms_applies(node: &Node) -> bool {
    let Node::Binary { op: BinaryOp::Add, left, right } = node else { return false };
    let (_, b1) = as_term(left);
    let (_, b2) = as_term(right);
    !matches!(b1, Node::Number(_)) && b1 == b2
}

fn combine_like_terms_apply(node: &Node) -> (Node, bool) {
    let Node::Binary { left, right, .. } = node else { return (node.clone(), false) };
    let (c1, b1) = as_term(left);
    let (c2, _) = as_term(right);
    let coeff = c1 + c2;
    let result = if coeff == 0.0 {
        Node::num(0.0)
    } else if coeff == 1.0 {
        b1
    } else {
        Node::binary(BinaryOp::Mul, Node::signed_number(coeff), b1)
    };
    (result, true)
}

// ---- distribute ----

fn distribute_applies(node: &Node) -> bool {
    let Node::Binary { op: BinaryOp::Mul, left, right } = node else { return false };
    matches!(right.as_ref(), Node::Binary { op: BinaryOp::Add | BinaryOp::Sub, .. })
        || matches!(left.as_ref(), Node::Binary { op: BinaryOp::Add | BinaryOp::Sub, .. })
}

fn distribute_apply(node: &Node) -> (Node, bool) {
    let Node::Binary { left, right, .. } = node else { return (node.clone(), false) };
    if let Node::Binary { op: inner_op, left: b, right: c } = right.as_ref() {
        if matches!(inner_op, BinaryOp::Add | BinaryOp::Sub) {
            let ab = Node::binary(BinaryOp::Mul, (**left).clone(), (**b).clone());
            let ac = Node::binary(BinaryOp::Mul, (**left).clone(), (**c).clone());
            return (Node::binary(*inner_op, ab, ac), true);
        }
    }
    if let Node::Binary { op: inner_op, left: b, right: c } = left.as_ref() {
        if matches!(inner_op, BinaryOp::Add | BinaryOp::Sub) {
            let ba = Node::binary(BinaryOp::Mul, (**b).clone(), (**right).clone());
            let ca = Node::binary(BinaryOp::Mul, (**c).clone(), (**right).clone());
            return (Node::binary(*inner_op, ba, ca), true);
        }
    }
    (node.clone(), false)
}

// ---- factor_common ----

/// The two multiplicand factors of a bare `Mul` node, or `(node, 1)` for
/// anything else (so a non-`Mul` term can still match a shared factor of
/// itself times a literal `1`, matching `factor_common`'s symmetry with
/// `distribute`).
fn mul_factors(node: &Node) -> (Node, Node) {
    match node {
        Node::Binary { op: BinaryOp::Mul, left, right } => ((**left).clone(), (**right).clone()),
        _ => (node.clone(), Node::num(1.0)),
    }
}

fn common_factor(left: &Node, right: &Node) -> Option<(Node, Node, Node)> {
    let (l1, l2) = mul_factors(left);
    let (r1, r2) = mul_factors(right);
    if l1 == r1 {
        return Some((l1, l2, r2));
    }
    if l1 == r2 {
        return Some((l1, l2, r1));
    }
    if l2 == r1 {
        return Some((l2, l1, r2));
    }
    if l2 == r2 {
        return Some((l2, l1, r1));
    }
    None
}

fn factor_common_applies(node: &Node) -> bool {
    let Node::Binary { op: BinaryOp::Add, left, right } = node else { return false };
    common_factor(left, right).is_some()
}

fn factor_common_apply(node: &Node) -> (Node, bool) {
    let Node::Binary { left, right, .. } = node else { return (node.clone(), false) };
    if let Some((factor, rest_left, rest_right)) = common_factor(left, right) {
        let sum = Node::binary(BinaryOp::Add, rest_left, rest_right);
        return (Node::binary(BinaryOp::Mul, factor, sum), true);
    }
    (node.clone(), false)
}

// ---- simplify_fraction ----

fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

fn as_integer(node: &Node) -> Option<i64> {
    match node {
        Node::Number(v) if *v == v.trunc() => Some(*v as i64),
        _ => None,
    }
}

fn simplify_fraction_applies(node: &Node) -> bool {
    let Node::Binary { op: BinaryOp::Div, left, right } = node else { return false };
    let (Some(n), Some(d)) = (as_integer(left), as_integer(right)) else { return false };
    d != 0 && gcd(n, d) > 1
}

fn simplify_fraction_apply(node: &Node) -> (Node, bool) {
    let Node::Binary { left, right, .. } = node else { return (node.clone(), false) };
    let (Some(n), Some(d)) = (as_integer(left), as_integer(right)) else { return (node.clone(), false) };
    let g = gcd(n, d);
    if g <= 1 {
        return (node.clone(), false);
    }
    let (n, d) = (n / g, d / g);
    if d == 1 {
        (Node::signed_number(n as f64), true)
    } else {
        (Node::binary(BinaryOp::Div, Node::signed_number(n as f64), Node::signed_number(d as f64)), true)
    }
}

// ---- power_of_power ----

fn power_of_power_applies(node: &Node) -> bool {
    matches!(node, Node::Binary { op: BinaryOp::Pow, left, .. } if matches!(left.as_ref(), Node::Binary { op: BinaryOp::Pow, .. }))
}

fn power_of_power_apply(node: &Node) -> (Node, bool) {
    let Node::Binary { op: BinaryOp::Pow, left, right: outer_exp } = node else { return (node.clone(), false) };
    let Node::Binary { op: BinaryOp::Pow, left: base, right: inner_exp } = left.as_ref() else { return (node.clone(), false) };
    let new_exp = Node::binary(BinaryOp::Mul, (**inner_exp).clone(), (**outer_exp).clone());
    ((Node::binary(BinaryOp::Pow, (**base).clone(), new_exp)), true)
}

// ---- multiply_powers ----

fn power_base_and_exp(node: &Node) -> (Node, Node) {
    match node {
        Node::Binary { op: BinaryOp::Pow, left, right } => ((**left).clone(), (**right).clone()),
        _ => (node.clone(), Node::num(1.0)),
    }
}

fn multiply_powers_applies(node: &Node) -> bool {
    let Node::Binary { op: BinaryOp::Mul, left, right } = node else { return false };
    let has_pow = matches!(left.as_ref(), Node::Binary { op: BinaryOp::Pow, .. }) || matches!(right.as_ref(), Node::Binary { op: BinaryOp::Pow, .. });
    if !has_pow {
        return false;
    }
    let (lb, _) = power_base_and_exp(left);
    let (rb, _) = power_base_and_exp(right);
    lb == rb
}

fn multiply_powers_apply(node: &Node) -> (Node, bool) {
    let Node::Binary { left, right, .. } = node else { return (node.clone(), false) };
    let (base, le) = power_base_and_exp(left);
    let (_, re) = power_base_and_exp(right);
    (Node::binary(BinaryOp::Pow, base, Node::binary(BinaryOp::Add, le, re)), true)
}
