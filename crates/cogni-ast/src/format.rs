//! Render an AST back into a parseable string.
//!
//! Parenthesization is precedence-aware: a child is wrapped only when
//! omitting the parens would change how [`crate::parser::parse`] re-reads
//! the string (`minimal_parens`), or unconditionally when the caller wants
//! visually unambiguous output.

use crate::node::{BinaryOp, Node, UnaryOp};

/// Formatting knobs for [`format`].
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Insert a space around binary operators (`a + b` vs `a+b`).
    pub spaces: bool,
    /// Omit parentheses that wouldn't change how the string reparses.
    pub minimal_parens: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions { spaces: true, minimal_parens: true }
    }
}

/// Format `node` as a string per `options`.
#[must_use]
pub fn format(node: &Node, options: &FormatOptions) -> String {
    let mut out = String::new();
    write_node(node, 0, options, &mut out);
    out
}

fn write_number(value: f64, out: &mut String) {
    if value == value.trunc() && value.abs() < 1e15 {
        out.push_str(&format!("{}", value as i64));
    } else {
        out.push_str(&format!("{value}"));
    }
}

/// `parent_prec` is the precedence context the node is being written into;
/// `None` semantics are folded into 0 (top level) by callers.
fn write_node(node: &Node, parent_prec: u8, options: &FormatOptions, out: &mut String) {
    match node {
        Node::Number(value) => write_number(*value, out),
        Node::Variable(name) => out.push_str(name),
        Node::Unary { op, operand } => {
            out.push_str(match op {
                UnaryOp::Neg => "-",
                UnaryOp::Pos => "+",
            });
            // Unary precedence sits between `*/` (2) and `^` (4): a binary
            // child needs parens unless it's a power (binds tighter).
            let needs_parens = matches!(
                operand.as_ref(),
                Node::Binary { op: inner, .. } if inner.precedence() < 4
            );
            if needs_parens {
                out.push('(');
                write_node(operand, 0, options, out);
                out.push(')');
            } else {
                write_node(operand, 3, options, out);
            }
        }
        Node::Binary { op, left, right } => {
            let prec = op.precedence();
            let open_paren = !options.minimal_parens && parent_prec > 0 || prec < parent_prec;
            if open_paren {
                out.push('(');
            }
            let left_prec = if op.right_assoc() { prec + 1 } else { prec };
            write_node(left, left_prec, options, out);
            if options.spaces {
                out.push(' ');
                out.push_str(op.as_str());
                out.push(' ');
            } else {
                out.push_str(op.as_str());
            }
            let right_prec = if op.right_assoc() { prec } else { prec + 1 };
            write_node(right, right_prec, options, out);
            if open_paren {
                out.push(')');
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

    fn roundtrip(src: &str) -> String {
        let (tokens, errors) = tokenize(src);
        assert!(errors.is_empty());
        let ast = parse(&tokens).unwrap();
        format(&ast, &FormatOptions::default())
    }

    #[test]
    fn simple_expression_formats_without_extra_parens() {
        assert_eq!(roundtrip("2+3*4"), "2 + 3 * 4");
    }

    #[test]
    fn necessary_parens_are_kept() {
        assert_eq!(roundtrip("(2+3)*4"), "(2 + 3) * 4");
    }

    #[test]
    fn power_right_associativity_reparses_identically() {
        let (tokens, _) = tokenize(&roundtrip("2^3^2"));
        let reparsed = parse(&tokens).unwrap();
        let (orig_tokens, _) = tokenize("2^3^2");
        let orig = parse(&orig_tokens).unwrap();
        assert_eq!(reparsed, orig);
    }

    #[test]
    fn round_trip_is_structurally_equal_for_well_formed_trees() {
        for src in ["1+2", "x*y+z", "(a+b)*(c-d)", "x^2+2*x+1", "-x^2", "a/b/c"] {
            let (tokens, errors) = tokenize(src);
            assert!(errors.is_empty(), "{src}");
            let ast = parse(&tokens).unwrap();
            let printed = format(&ast, &FormatOptions::default());
            let (tokens2, errors2) = tokenize(&printed);
            assert!(errors2.is_empty(), "{printed}");
            let ast2 = parse(&tokens2).unwrap();
            assert_eq!(ast, ast2, "round trip mismatch for {src} -> {printed}");
        }
    }
}
