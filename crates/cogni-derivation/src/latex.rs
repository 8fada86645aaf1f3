//! Render a derivation chain as LaTeX (spec §4.2 "Derivation to LaTeX").

use cogni_ast::{parse_expression, BinaryOp, Node, UnaryOp};

use crate::step::DerivationStep;

const GREEK: &[(&str, &str)] =
    &[("alpha", "\\alpha"), ("beta", "\\beta"), ("gamma", "\\gamma"), ("delta", "\\delta"), ("theta", "\\theta"), ("lambda", "\\lambda"), ("mu", "\\mu"), ("sigma", "\\sigma"), ("omega", "\\omega"), ("pi", "\\pi"), ("phi", "\\varphi")];

const LATEX_FUNCTIONS: &[(&str, &str)] = &[("sin", "\\sin"), ("cos", "\\cos"), ("tan", "\\tan"), ("ln", "\\ln"), ("log", "\\log"), ("sqrt", "\\sqrt")];

fn latex_variable(name: &str) -> String {
    if name == "e" {
        return "e".to_string();
    }
    for (plain, latex) in GREEK {
        if *plain == name {
            return (*latex).to_string();
        }
    }
    name.to_string()
}

/// A `Mul(Variable(fn_name), arg)` shape, the same juxtaposition pattern
/// `cogni-derivation`'s differentiation layer recognizes.
fn function_call(node: &Node) -> Option<(&str, &Node)> {
    if let Node::Binary { op: BinaryOp::Mul, left, right } = node {
        if let Node::Variable(name) = left.as_ref() {
            if let Some((_, latex)) = LATEX_FUNCTIONS.iter().find(|(n, _)| n == name) {
                return Some((latex, right.as_ref()));
            }
        }
    }
    None
}

fn write_number(value: f64, out: &mut String) {
    if value == value.trunc() && value.abs() < 1e15 {
        out.push_str(&format!("{}", value as i64));
    } else {
        out.push_str(&format!("{value}"));
    }
}

fn write_node(node: &Node, parent_prec: u8, out: &mut String) {
    if let Some((latex_fn, arg)) = function_call(node) {
        if latex_fn == "\\sqrt" {
            out.push_str("\\sqrt{");
            write_node(arg, 0, out);
            out.push('}');
        } else {
            out.push_str(latex_fn);
            out.push('(');
            write_node(arg, 0, out);
            out.push(')');
        }
        return;
    }

    match node {
        Node::Number(value) => write_number(*value, out),
        Node::Variable(name) => out.push_str(&latex_variable(name)),
        Node::Unary { op, operand } => {
            out.push_str(match op {
                UnaryOp::Neg => "-",
                UnaryOp::Pos => "+",
            });
            let needs_parens = matches!(operand.as_ref(), Node::Binary { op: inner, .. } if inner.precedence() < 4);
            if needs_parens {
                out.push('(');
                write_node(operand, 0, out);
                out.push(')');
            } else {
                write_node(operand, 3, out);
            }
        }
        Node::Binary { op: BinaryOp::Div, left, right } => {
            out.push_str("\\frac{");
            write_node(left, 0, out);
            out.push_str("}{");
            write_node(right, 0, out);
            out.push('}');
        }
        Node::Binary { op: BinaryOp::Pow, left, right } => {
            let needs_parens = left.precedence_of() < BinaryOp::Pow.precedence();
            if needs_parens {
                out.push('(');
                write_node(left, 0, out);
                out.push(')');
            } else {
                write_node(left, BinaryOp::Pow.precedence() + 1, out);
            }
            out.push_str("^{");
            write_node(right, 0, out);
            out.push('}');
        }
        Node::Binary { op, left, right } => {
            let prec = op.precedence();
            let open_paren = prec < parent_prec;
            if open_paren {
                out.push('(');
            }
            write_node(left, prec, out);
            match op {
                BinaryOp::Add => out.push_str(" + "),
                BinaryOp::Sub => out.push_str(" - "),
                BinaryOp::Mul => out.push_str(" \\cdot "),
                BinaryOp::Div | BinaryOp::Pow => unreachable!("handled above"),
            }
            write_node(right, prec + 1, out);
            if open_paren {
                out.push(')');
            }
        }
    }
}

trait PrecedenceOf {
    fn precedence_of(&self) -> u8;
}

impl PrecedenceOf for Node {
    fn precedence_of(&self) -> u8 {
        match self {
            Node::Binary { op, .. } => op.precedence(),
            Node::Unary { .. } => 3,
            Node::Number(_) | Node::Variable(_) => 5,
        }
    }
}

/// Render a single expression as a LaTeX math string (no surrounding `$`).
#[must_use]
pub fn expression_to_latex(expr: &str) -> String {
    match parse_expression(expr) {
        Some(ast) => {
            let mut out = String::new();
            write_node(&ast, 0, &mut out);
            out
        }
        None => expr.trim().to_string(),
    }
}

/// The LaTeX environment to wrap a derivation chain in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatexEnvironment {
    /// `align` — one row per step, each independently aligned at `&=`.
    Align,
    /// `equation` — the whole chain flattened into a single equality.
    Equation,
}

/// Rendering options for [`derivation_to_latex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatexOptions {
    /// Which environment to emit.
    pub environment: LatexEnvironment,
    /// Attach a `\label{step-N}` to each row (`align` only).
    pub labels: bool,
    /// Append a `% step N` trailing comment to each row.
    pub step_comments: bool,
    /// Prefix the final row with `\therefore` (`align` only).
    pub therefore: bool,
}

impl Default for LatexOptions {
    fn default() -> Self {
        LatexOptions { environment: LatexEnvironment::Align, labels: false, step_comments: false, therefore: true }
    }
}

/// Render a derivation chain as LaTeX per `options`.
#[must_use]
pub fn derivation_to_latex(steps: &[DerivationStep], options: LatexOptions) -> String {
    if steps.is_empty() {
        return String::new();
    }
    match options.environment {
        LatexEnvironment::Align => {
            let mut body = String::new();
            let last_index = steps.len() - 1;
            for (index, step) in steps.iter().enumerate() {
                let one_based = index + 1;
                let lhs = expression_to_latex(&step.lhs);
                let rhs = expression_to_latex(&step.rhs);
                if options.therefore && index == last_index {
                    body.push_str("\\therefore ");
                }
                body.push_str(&lhs);
                body.push_str(" &= ");
                body.push_str(&rhs);
                if options.labels {
                    body.push_str(&format!(" \\label{{step-{one_based}}}"));
                }
                body.push_str(" \\\\");
                if options.step_comments {
                    body.push_str(&format!(" % step {one_based}"));
                }
                body.push('\n');
            }
            format!("\\begin{{align}}\n{body}\\end{{align}}")
        }
        LatexEnvironment::Equation => {
            let mut chain = expression_to_latex(&steps[0].lhs);
            for step in steps {
                chain.push_str(" = ");
                chain.push_str(&expression_to_latex(&step.rhs));
            }
            format!("\\begin{{equation}}\n{chain}\n\\end{{equation}}")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_fraction() {
        assert_eq!(expression_to_latex("a/b"), "\\frac{a}{b}");
    }

    #[test]
    fn renders_a_function_call() {
        assert_eq!(expression_to_latex("sin(x)"), "\\sin(x)");
    }

    #[test]
    fn renders_sqrt_specially() {
        assert_eq!(expression_to_latex("sqrt(x)"), "\\sqrt{x}");
    }

    #[test]
    fn renders_a_named_constant() {
        assert_eq!(expression_to_latex("pi"), "\\pi");
    }

    #[test]
    fn renders_a_power() {
        assert_eq!(expression_to_latex("x^2"), "x^{2}");
    }

    #[test]
    fn parenthesizes_a_sum_raised_to_a_power() {
        assert_eq!(expression_to_latex("(x+1)^2"), "(x + 1)^{2}");
    }

    #[test]
    fn align_environment_renders_one_row_per_step() {
        let steps = vec![DerivationStep::new("x + x", "2*x"), DerivationStep::new("2*x", "2x")];
        let latex = derivation_to_latex(&steps, LatexOptions::default());
        assert!(latex.starts_with("\\begin{align}"));
        assert!(latex.contains("x + x &= 2 \\cdot x"));
        assert_eq!(latex.matches("\\\\").count(), 2);
    }

    #[test]
    fn align_environment_marks_the_final_line_with_therefore() {
        let steps = vec![DerivationStep::new("x + x", "2*x"), DerivationStep::new("2*x", "2x")];
        let latex = derivation_to_latex(&steps, LatexOptions::default());
        assert!(latex.contains("\\therefore 2 \\cdot x &= 2x"));
        assert_eq!(latex.matches("\\therefore").count(), 1);
    }

    #[test]
    fn therefore_marker_is_opt_out() {
        let steps = vec![DerivationStep::new("x", "x")];
        let latex = derivation_to_latex(&steps, LatexOptions { therefore: false, ..LatexOptions::default() });
        assert!(!latex.contains("\\therefore"));
    }

    #[test]
    fn equation_environment_flattens_the_chain() {
        let steps = vec![DerivationStep::new("x + x", "2*x"), DerivationStep::new("2*x", "2x")];
        let latex = derivation_to_latex(&steps, LatexOptions { environment: LatexEnvironment::Equation, ..LatexOptions::default() });
        assert!(latex.starts_with("\\begin{equation}"));
        assert_eq!(latex.matches('=').count(), 2);
    }

    #[test]
    fn labels_and_comments_are_opt_in() {
        let steps = vec![DerivationStep::new("x", "x")];
        let latex = derivation_to_latex(&steps, LatexOptions { labels: true, step_comments: true, ..LatexOptions::default() });
        assert!(latex.contains("\\label{step-1}"));
        assert!(latex.contains("% step 1"));
    }

    #[test]
    fn empty_chain_renders_empty_string() {
        assert_eq!(derivation_to_latex(&[], LatexOptions::default()), "");
    }
}
