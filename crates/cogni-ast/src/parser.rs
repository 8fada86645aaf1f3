//! Recursive-descent, Pratt-style parser for the token stream produced by
//! [`crate::lexer::tokenize`].
//!
//! Precedence ladder (spec §4.1), loosest to tightest:
//! `+ -` then `* /` (implicit multiplication binds like explicit `*`) then
//! unary `- +` then right-associative `^`. `sin(x)`-style calls are parsed
//! as a bare variable juxtaposed against a parenthesized group, i.e.
//! `sin * (x)`, not as a first-class call node (spec §4.1, explicitly
//! optional).

use cogni_error::{AstError, AstResult};
use cogni_token::{Op, Token, TokenKind};

use crate::node::{BinaryOp, Node, UnaryOp};

/// Parse a full expression from `tokens`, requiring every token to be
/// consumed. Returns [`AstError::TrailingTokens`] if not.
pub fn parse(tokens: &[Token]) -> AstResult<Node> {
    let mut parser = Parser { tokens, pos: 0 };
    let node = parser.parse_expr()?;
    if parser.pos != parser.tokens.len() {
        let tok = &parser.tokens[parser.pos];
        return Err(AstError::TrailingTokens { found: tok.text.to_string(), pos: tok.start });
    }
    Ok(node)
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_op(&self) -> Option<Op> {
        self.peek().and_then(Token::operator)
    }

    fn advance(&mut self) -> Option<&Token> {
        let tok = self.tokens.get(self.pos);
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eof_pos(&self) -> usize {
        self.tokens.last().map_or(0, Token::end)
    }

    /// `term (('+'|'-') term)*`
    fn parse_expr(&mut self) -> AstResult<Node> {
        let mut left = self.parse_term()?;
        loop {
            match self.peek_op() {
                Some(Op::Plus) => {
                    self.advance();
                    let right = self.parse_term()?;
                    left = Node::binary(BinaryOp::Add, left, right);
                }
                Some(Op::Minus) => {
                    self.advance();
                    let right = self.parse_term()?;
                    left = Node::binary(BinaryOp::Sub, left, right);
                }
                _ => break,
            }
        }
        Ok(left)
    }

    /// `unary (('*'|'/'|implicit-mul) unary)*`
    fn parse_term(&mut self) -> AstResult<Node> {
        let mut left = self.parse_unary()?;
        loop {
            let is_implicit = matches!(self.peek().map(|t| t.kind), Some(TokenKind::ImplicitMul));
            match self.peek_op() {
                Some(Op::Star) => {
                    self.advance();
                    let right = self.parse_unary()?;
                    left = Node::binary(BinaryOp::Mul, left, right);
                }
                Some(Op::Slash) => {
                    self.advance();
                    let right = self.parse_unary()?;
                    left = Node::binary(BinaryOp::Div, left, right);
                }
                _ if is_implicit => {
                    self.advance();
                    let right = self.parse_unary()?;
                    left = Node::binary(BinaryOp::Mul, left, right);
                }
                _ => break,
            }
        }
        Ok(left)
    }

    /// `('-'|'+') unary | power`
    fn parse_unary(&mut self) -> AstResult<Node> {
        match self.peek_op() {
            Some(Op::Minus) => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Node::unary(UnaryOp::Neg, operand))
            }
            Some(Op::Plus) => {
                self.advance();
                let operand = self.parse_unary()?;
                Ok(Node::unary(UnaryOp::Pos, operand))
            }
            _ => self.parse_power(),
        }
    }

    /// `primary ('^' unary)?`, right-associative via the recursive call
    /// back through `parse_unary`.
    fn parse_power(&mut self) -> AstResult<Node> {
        let base = self.parse_primary()?;
        if self.peek_op() == Some(Op::Caret) {
            self.advance();
            let exponent = self.parse_unary()?;
            Ok(Node::binary(BinaryOp::Pow, base, exponent))
        } else {
            Ok(base)
        }
    }

    /// `number | variable | '(' expr ')'`
    fn parse_primary(&mut self) -> AstResult<Node> {
        let Some(tok) = self.peek().cloned() else {
            return Err(AstError::UnexpectedEof);
        };
        match tok.kind {
            TokenKind::Number => {
                self.advance();
                tok.text.parse::<f64>().map(Node::Number).map_err(|_| AstError::InvalidNumber {
                    literal: tok.text.to_string(),
                    pos: tok.start,
                })
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(Node::var(tok.text.to_string()))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                match self.peek() {
                    Some(t) if t.kind == TokenKind::RParen => {
                        self.advance();
                        Ok(inner)
                    }
                    Some(t) => Err(AstError::ExpectedPrimary { found: t.text.to_string(), pos: t.start }),
                    None => Err(AstError::UnclosedParen { pos: tok.start }),
                }
            }
            _ => Err(AstError::ExpectedPrimary { found: tok.text.to_string(), pos: tok.start }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn parse_str(s: &str) -> Node {
        let (tokens, errors) = tokenize(s);
        assert!(errors.is_empty(), "tokenize errors: {errors:?}");
        parse(&tokens).unwrap()
    }

    #[test]
    fn precedence_mul_before_add() {
        let ast = parse_str("2 + 3 * 4");
        assert_eq!(ast, Node::binary(BinaryOp::Add, Node::num(2.0), Node::binary(BinaryOp::Mul, Node::num(3.0), Node::num(4.0))));
    }

    #[test]
    fn power_is_right_associative() {
        let ast = parse_str("2^3^2");
        let expected = Node::binary(BinaryOp::Pow, Node::num(2.0), Node::binary(BinaryOp::Pow, Node::num(3.0), Node::num(2.0)));
        assert_eq!(ast, expected);
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        let ast = parse_str("-x^2");
        let expected = Node::unary(UnaryOp::Neg, Node::binary(BinaryOp::Pow, Node::var("x"), Node::num(2.0)));
        assert_eq!(ast, expected);
    }

    #[test]
    fn parentheses_override_precedence() {
        let ast = parse_str("(2 + 3) * 4");
        assert_eq!(ast, Node::binary(BinaryOp::Mul, Node::binary(BinaryOp::Add, Node::num(2.0), Node::num(3.0)), Node::num(4.0)));
    }

    #[test]
    fn implicit_multiplication_parses_as_product() {
        let ast = parse_str("2x");
        assert_eq!(ast, Node::binary(BinaryOp::Mul, Node::num(2.0), Node::var("x")));
    }

    #[test]
    fn unclosed_paren_is_an_error() {
        let (tokens, _) = tokenize("(1 + 2");
        assert!(matches!(parse(&tokens), Err(AstError::UnclosedParen { .. })));
    }

    #[test]
    fn trailing_tokens_is_an_error() {
        let (tokens, _) = tokenize("1 + 2 )");
        assert!(matches!(parse(&tokens), Err(_)));
    }
}
