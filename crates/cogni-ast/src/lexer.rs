//! Tokenizer for math expressions.
//!
//! Handles unicode operator spellings, unicode superscripts, decimal
//! numbers (including a leading dot), and identifiers (ASCII or Greek).
//! Juxtaposition (`2x`, `(x+1)(x-1)`, `sin(x)`) is marked with a synthetic
//! [`TokenKind::ImplicitMul`] token inserted in a post-pass, per the
//! tokenizer contract: failures are collected, never fatal.

use cogni_error::AstError;
use cogni_token::{Op, Token, TokenKind};
use std::sync::Arc;

/// Tokenize `source` into a token stream plus any lexical errors encountered.
///
/// Unrecognized characters are skipped (one at a time) so the scan always
/// makes progress and the caller gets a best-effort token stream alongside
/// the error list; callers should treat a non-empty error list as "this
/// input didn't parse" rather than trying to recover token-by-token.
#[must_use]
pub fn tokenize(source: &str) -> (Vec<Token>, Vec<AstError>) {
    let chars: Vec<(usize, char)> = source.char_indices().collect();
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut i = 0usize;
    let len_bytes = source.len();

    while i < chars.len() {
        let (byte_pos, ch) = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() || (ch == '.' && peek_digit(&chars, i + 1)) {
            let (end_idx, end_byte) = scan_number(&chars, i, source);
            let text = &source[byte_pos..end_byte];
            if text.parse::<f64>().is_ok() {
                tokens.push(Token::new(TokenKind::Number, text, byte_pos, end_byte - byte_pos));
            } else {
                errors.push(AstError::InvalidNumber { literal: text.to_string(), pos: byte_pos });
            }
            i = end_idx;
            continue;
        }

        if let Some(digit) = superscript_digit(ch) {
            let (end_idx, end_byte, digits) = scan_superscript_run(&chars, i, digit, source);
            tokens.push(caret_token(byte_pos));
            tokens.push(Token::new(TokenKind::Number, digits.clone(), byte_pos, end_byte - byte_pos));
            i = end_idx;
            continue;
        }

        if ch.is_alphabetic() {
            let (end_idx, end_byte) = scan_identifier(&chars, i);
            let text = &source[byte_pos..end_byte];
            tokens.push(Token::new(TokenKind::Identifier, text, byte_pos, end_byte - byte_pos));
            i = end_idx;
            continue;
        }

        if let Some(op) = normalize_operator(ch) {
            let end_byte = next_byte_pos(&chars, i, len_bytes);
            let text = &source[byte_pos..end_byte];
            tokens.push(Token::new(TokenKind::Operator(op), text, byte_pos, end_byte - byte_pos));
            i += 1;
            continue;
        }

        match ch {
            '(' => {
                let end_byte = next_byte_pos(&chars, i, len_bytes);
                tokens.push(Token::new(TokenKind::LParen, &source[byte_pos..end_byte], byte_pos, end_byte - byte_pos));
                i += 1;
                continue;
            }
            ')' => {
                let end_byte = next_byte_pos(&chars, i, len_bytes);
                tokens.push(Token::new(TokenKind::RParen, &source[byte_pos..end_byte], byte_pos, end_byte - byte_pos));
                i += 1;
                continue;
            }
            '\u{221A}' /* √ */ => {
                tokens.push(Token::new(TokenKind::Identifier, "sqrt", byte_pos, ch.len_utf8()));
                i += 1;
                continue;
            }
            '\u{03C0}' /* π */ => {
                tokens.push(Token::new(TokenKind::Identifier, "pi", byte_pos, ch.len_utf8()));
                i += 1;
                continue;
            }
            '\u{2211}' /* ∑ */ => {
                tokens.push(Token::new(TokenKind::Identifier, "sum", byte_pos, ch.len_utf8()));
                i += 1;
                continue;
            }
            _ => {
                errors.push(AstError::UnexpectedChar { ch, pos: byte_pos });
                i += 1;
            }
        }
    }

    insert_implicit_mul(&mut tokens);
    (tokens, errors)
}

fn next_byte_pos(chars: &[(usize, char)], i: usize, len_bytes: usize) -> usize {
    chars.get(i + 1).map_or(len_bytes, |(p, _)| *p)
}

fn peek_digit(chars: &[(usize, char)], i: usize) -> bool {
    chars.get(i).is_some_and(|(_, c)| c.is_ascii_digit())
}

fn scan_number(chars: &[(usize, char)], start: usize, source: &str) -> (usize, usize) {
    let mut i = start;
    let mut seen_dot = false;
    if chars[i].1 == '.' {
        seen_dot = true;
        i += 1;
    }
    while i < chars.len() && chars[i].1.is_ascii_digit() {
        i += 1;
    }
    if !seen_dot && i < chars.len() && chars[i].1 == '.' {
        i += 1;
        while i < chars.len() && chars[i].1.is_ascii_digit() {
            i += 1;
        }
    }
    let end_byte = chars.get(i).map_or(source.len(), |(p, _)| *p);
    (i, end_byte)
}

fn scan_identifier(chars: &[(usize, char)], start: usize) -> (usize, usize) {
    let mut i = start;
    while i < chars.len() && chars[i].1.is_alphabetic() {
        i += 1;
    }
    let (last_pos, last_ch) = chars[i - 1];
    (i, last_pos + last_ch.len_utf8())
}

fn superscript_digit(ch: char) -> Option<char> {
    match ch {
        '\u{2070}' => Some('0'),
        '\u{00B9}' => Some('1'),
        '\u{00B2}' => Some('2'),
        '\u{00B3}' => Some('3'),
        '\u{2074}' => Some('4'),
        '\u{2075}' => Some('5'),
        '\u{2076}' => Some('6'),
        '\u{2077}' => Some('7'),
        '\u{2078}' => Some('8'),
        '\u{2079}' => Some('9'),
        _ => None,
    }
}

fn scan_superscript_run(
    chars: &[(usize, char)],
    start: usize,
    first_digit: char,
    _source: &str,
) -> (usize, usize, String) {
    let mut digits = String::new();
    digits.push(first_digit);
    let mut i = start + 1;
    while let Some((_, ch)) = chars.get(i) {
        if let Some(d) = superscript_digit(*ch) {
            digits.push(d);
            i += 1;
        } else {
            break;
        }
    }
    let (last_pos, last_ch) = chars[i - 1];
    let end_byte = last_pos + last_ch.len_utf8();
    (i, end_byte, digits)
}

fn normalize_operator(ch: char) -> Option<Op> {
    match ch {
        '+' => Some(Op::Plus),
        '-' | '\u{2212}' => Some(Op::Minus),
        '*' | '\u{00D7}' | '\u{00B7}' => Some(Op::Star),
        '/' | '\u{00F7}' => Some(Op::Slash),
        '^' => Some(Op::Caret),
        _ => None,
    }
}

fn caret_token(pos: usize) -> Token {
    Token::new(TokenKind::Operator(Op::Caret), Arc::from("^"), pos, 0)
}

/// Whether a token kind can end a juxtaposable value (`2x`, `(x)(y)`).
fn ends_value(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Number | TokenKind::Identifier | TokenKind::RParen)
}

/// Whether a token kind can start a juxtaposable value.
fn starts_value(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Number | TokenKind::Identifier | TokenKind::LParen)
}

fn insert_implicit_mul(tokens: &mut Vec<Token>) {
    let mut i = 0;
    while i + 1 < tokens.len() {
        if ends_value(tokens[i].kind) && starts_value(tokens[i + 1].kind) {
            let pos = tokens[i + 1].start;
            tokens.insert(i + 1, Token::implicit_mul(pos));
            i += 2;
        } else {
            i += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src).0.into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn simple_arithmetic() {
        let (toks, errs) = tokenize("2 + 3 * 4");
        assert!(errs.is_empty());
        assert_eq!(toks.len(), 5);
    }

    #[test]
    fn unicode_operators_normalize() {
        let (toks, errs) = tokenize("5 \u{2212} 2 \u{00D7} 3 \u{00F7} 4");
        assert!(errs.is_empty());
        assert_eq!(toks[1].operator(), Some(Op::Minus));
        assert_eq!(toks[3].operator(), Some(Op::Star));
        assert_eq!(toks[5].operator(), Some(Op::Slash));
    }

    #[test]
    fn juxtaposition_inserts_implicit_mul() {
        let k = kinds("2x");
        assert_eq!(k, vec![TokenKind::Number, TokenKind::ImplicitMul, TokenKind::Identifier]);
    }

    #[test]
    fn parenthesized_juxtaposition() {
        let k = kinds("(x+1)(x-1)");
        assert!(k.contains(&TokenKind::ImplicitMul));
    }

    #[test]
    fn superscript_becomes_caret_number() {
        let (toks, errs) = tokenize("x\u{00B2}");
        assert!(errs.is_empty());
        assert_eq!(toks.len(), 3);
        assert_eq!(toks[1].operator(), Some(Op::Caret));
        assert_eq!(toks[2].kind, TokenKind::Number);
        assert_eq!(&*toks[2].text, "2");
    }

    #[test]
    fn unrecognized_char_is_non_fatal() {
        let (toks, errs) = tokenize("2 @ 3");
        assert_eq!(errs.len(), 1);
        assert!(!toks.is_empty());
    }

    #[test]
    fn leading_dot_number() {
        let (toks, errs) = tokenize(".5 + 1");
        assert!(errs.is_empty());
        assert_eq!(&*toks[0].text, ".5");
    }

    #[test]
    fn sqrt_symbol_is_identifier() {
        let (toks, _) = tokenize("\u{221A}4");
        assert_eq!(toks[0].kind, TokenKind::Identifier);
        assert_eq!(&*toks[0].text, "sqrt");
    }
}
