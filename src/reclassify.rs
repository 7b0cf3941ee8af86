//! Keyword and pin recognition over raw tokenizer output.

use crate::ast::{Span, Token, TokenKind};

/// Promotes keyword words to keyword tokens and fuses pin markers with the
/// value they pin, recursing into groups.
///
/// - `^` followed directly by a word or quoted string becomes a `pin` holding it.
/// - `^` followed by anything else becomes an error-flagged `pin` with no value.
/// - `^` at the end becomes `incomplete:pin`.
/// - `AND`, `OR`, `NOT` and `NULL` (any case) become keyword tokens.
///
/// # Examples
///
/// ```
/// use artemis_ql::lexer::tokenize;
/// use artemis_ql::reclassify::reclassify;
/// use artemis_ql::TokenKind;
///
/// let tokens = reclassify(tokenize("a or b").unwrap().tokens);
/// assert_eq!(tokens[2].kind, TokenKind::Or);
/// ```
pub fn reclassify(tokens: Vec<Token>) -> Vec<Token> {
    let mut result = Vec::with_capacity(tokens.len());
    let mut tokens = tokens.into_iter().peekable();

    while let Some(token) = tokens.next() {
        let token = match token.kind {
            TokenKind::PinOp => {
                let pinnable = tokens.next_if(|next| {
                    matches!(next.kind, TokenKind::Word(_) | TokenKind::QuotedString(_))
                });
                match pinnable {
                    Some(value) => {
                        let span = Span::between(token.span.start, value.span.end);
                        Token {
                            kind: TokenKind::Pin(Some(Box::new(value))),
                            span,
                            ..token
                        }
                    }
                    None if tokens.peek().is_some() => Token {
                        kind: TokenKind::Pin(None),
                        ..token
                    }
                    .with_error(),
                    None => Token {
                        kind: TokenKind::IncompletePin,
                        ..token
                    },
                }
            }
            TokenKind::Word(ref word) => match keyword(word) {
                Some(kind) => Token { kind, ..token },
                None => token,
            },
            TokenKind::Group(children) => Token {
                kind: TokenKind::Group(reclassify(children)),
                ..token
            },
            TokenKind::IncompleteGroup(children) => Token {
                kind: TokenKind::IncompleteGroup(reclassify(children)),
                ..token
            },
            _ => token,
        };
        result.push(token);
    }

    result
}

fn keyword(word: &str) -> Option<TokenKind> {
    [
        ("AND", TokenKind::And),
        ("OR", TokenKind::Or),
        ("NOT", TokenKind::Not),
        ("NULL", TokenKind::Null),
    ]
    .into_iter()
    .find(|(name, _)| word.eq_ignore_ascii_case(name))
    .map(|(_, kind)| kind)
}
