//! Drives the rule table in `rules.rs`: priority-ordered, leftmost-outermost,
//! bounded fixed-point application (spec §4.1/§4.3).

use cogni_ast::Node;
use cogni_error::IterationBudget;

use crate::rules::{Rule, RULES};

/// The rule table sorted highest-priority first; ties keep table order
/// (a stable sort over the registration order in `RULES`).
#[must_use]
pub fn sorted_rules() -> Vec<&'static Rule> {
    let mut rules: Vec<&'static Rule> = RULES.iter().collect();
    rules.sort_by(|a, b| b.priority.cmp(&a.priority));
    rules
}

/// One step of a recorded simplification path.
#[derive(Debug, Clone)]
pub struct SimplifyStep {
    /// The rule's stable name (e.g. `"combine_like_terms"`).
    pub transformation: &'static str,
    /// Human-readable description of what the rule does.
    pub description: &'static str,
    /// The whole tree before this step.
    pub before: Node,
    /// The whole tree after this step.
    pub after: Node,
}

/// Find the leftmost-outermost subtree of `node` that `rule` applies to and
/// rewrite just that subtree, rebuilding ancestors. Returns `None` if the
/// rule doesn't apply anywhere in the tree. The returned `bool` is the
/// rule's own `changed` flag (`false` only for the indeterminate guard).
fn replace_first(node: &Node, rule: &Rule) -> Option<(Node, bool)> {
    if (rule.applies)(node) {
        let (replacement, changed) = (rule.apply)(node);
        return Some((replacement, changed));
    }
    match node {
        Node::Unary { op, operand } => replace_first(operand, rule).map(|(new_operand, changed)| (Node::unary(*op, new_operand), changed)),
        Node::Binary { op, left, right } => {
            if let Some((new_left, changed)) = replace_first(left, rule) {
                Some((Node::binary(*op, new_left, (**right).clone()), changed))
            } else {
                replace_first(right, rule).map(|(new_right, changed)| (Node::binary(*op, (**left).clone(), new_right), changed))
            }
        }
        Node::Number(_) | Node::Variable(_) => None,
    }
}

fn applies_anywhere(node: &Node, rule: &Rule) -> bool {
    if (rule.applies)(node) {
        return true;
    }
    match node {
        Node::Unary { operand, .. } => applies_anywhere(operand, rule),
        Node::Binary { left, right, .. } => applies_anywhere(left, rule) || applies_anywhere(right, rule),
        Node::Number(_) | Node::Variable(_) => false,
    }
}

/// Every rule that matches somewhere in `node`, highest priority first —
/// used by `suggestNextStep` to report "all applicable [rules] in
/// descending priority" (spec §4.2).
#[must_use]
pub fn applicable_rules(node: &Node) -> Vec<&'static Rule> {
    sorted_rules().into_iter().filter(|rule| applies_anywhere(node, rule)).collect()
}

/// Run the bounded fixed-point simplification loop, recording each step.
///
/// Stops when no rule applies, the 50-iteration cap (spec §4.1) is
/// reached, or the `0^0` indeterminate guard is hit (in which case the
/// tree as of just before the guard is returned, unmodified by it).
#[must_use]
pub fn simplify_with_steps(node: &Node) -> (Node, Vec<SimplifyStep>) {
    let mut current = node.clone();
    let mut steps = Vec::new();
    let mut budget = IterationBudget::simplify();
    let rules = sorted_rules();

    while budget.tick() {
        let mut progressed = false;
        for rule in &rules {
            if let Some((new_tree, changed)) = replace_first(&current, rule) {
                if !changed {
                    // Indeterminate guard: halt the whole simplification.
                    return (current, steps);
                }
                steps.push(SimplifyStep {
                    transformation: rule.name,
                    description: rule.description,
                    before: current.clone(),
                    after: new_tree.clone(),
                });
                current = new_tree;
                progressed = true;
                break;
            }
        }
        if !progressed {
            break;
        }
    }
    (current, steps)
}

/// Simplify `node` to its canonical form, discarding the step log.
#[must_use]
pub fn simplify(node: &Node) -> Node {
    simplify_with_steps(node).0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cogni_ast::parse_expression;

    fn simplify_str(src: &str) -> Node {
        simplify(&parse_expression(src).unwrap())
    }

    #[test]
    fn folds_constants() {
        assert_eq!(simplify_str("2 + 3"), Node::num(5.0));
    }

    #[test]
    fn add_zero_identity() {
        assert_eq!(simplify_str("x + 0"), Node::var("x"));
    }

    #[test]
    fn combines_like_terms() {
        assert_eq!(simplify_str("x + x"), Node::binary(cogni_ast::BinaryOp::Mul, Node::num(2.0), Node::var("x")));
    }

    #[test]
    fn distributes_then_folds() {
        // 2*(x+3) -> 2*x + 2*3 -> 2*x + 6 (constant_fold has higher priority
        // than distribute, so 2*3 folds before the top-level add is revisited)
        let simplified = simplify_str("2*(x+3)");
        let expected = Node::binary(
            cogni_ast::BinaryOp::Add,
            Node::binary(cogni_ast::BinaryOp::Mul, Node::num(2.0), Node::var("x")),
            Node::num(6.0),
        );
        assert_eq!(simplified, expected);
    }

    #[test]
    fn indeterminate_guard_halts_simplification() {
        let (result, steps) = simplify_with_steps(&parse_expression("0^0 + 1").unwrap());
        // constant_fold can't fold 0^0 (eval returns None), so the guard
        // rule matches it first and simplification halts before touching
        // the outer `+ 1`.
        assert!(steps.is_empty());
        assert_eq!(result, parse_expression("0^0 + 1").unwrap());
    }

    #[test]
    fn simplify_is_idempotent() {
        for src in ["x + x + 0", "2*(x+3) - 6", "(x^2)^3", "6/8"] {
            let once = simplify_str(src);
            let twice = simplify(&once);
            assert_eq!(once, twice, "not idempotent for {src}");
        }
    }

    #[test]
    fn literal_division_folds_to_a_decimal() {
        // constant_fold (100) matches any two-literal binary op, including
        // Div, and outranks simplify_fraction (50) — so a bare `a/b` of two
        // number literals always folds to its decimal value. simplify_fraction
        // only has a chance to fire on fractions that survive simplification
        // with a non-literal operand structure further up the tree; see
        // `rules::tests::simplify_fraction_reduces_by_gcd` for the rule
        // exercised directly.
        assert_eq!(simplify_str("6/8"), Node::num(0.75));
    }

    #[test]
    fn power_of_power_multiplies_exponents() {
        let simplified = simplify_str("(x^2)^3");
        assert_eq!(simplified, Node::binary(cogni_ast::BinaryOp::Pow, Node::var("x"), Node::num(6.0)));
    }
}

#[cfg(test)]
mod proptests {
    use cogni_ast::{BinaryOp, Node, UnaryOp};
    use proptest::prelude::*;

    use super::simplify;

    // Small literals and a 3-variable alphabet keep generated trees within
    // the range `eval` handles cleanly (no overflow, bounded exponents).
    fn arb_node() -> impl Strategy<Value = Node> {
        let leaf = prop_oneof![
            (-5i32..=5).prop_map(|n| Node::num(f64::from(n))),
            prop::sample::select(vec!["x", "y", "z"]).prop_map(Node::var),
        ];
        leaf.prop_recursive(4, 64, 4, |inner| {
            prop_oneof![
                inner.clone().prop_map(|n| Node::unary(UnaryOp::Neg, n)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::binary(BinaryOp::Add, l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::binary(BinaryOp::Sub, l, r)),
                (inner.clone(), inner.clone()).prop_map(|(l, r)| Node::binary(BinaryOp::Mul, l, r)),
            ]
        })
    }

    proptest! {
        #[test]
        fn simplify_is_idempotent_on_generated_trees(tree in arb_node()) {
            let once = simplify(&tree);
            let twice = simplify(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn every_generated_tree_compares_equal_to_itself(tree in arb_node()) {
            let text = tree.to_string();
            prop_assert!(crate::compare::compare(&text, &text));
        }
    }
}
