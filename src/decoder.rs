//! Folds reclassified tokens into the final token forest.
//!
//! Every function takes the token slice plus a cursor and hands back the
//! cursor it stopped at, so each one can be exercised on its own. The only
//! state is the immutable depth limit.

use crate::ast::{Span, Token, TokenKind};
use crate::error::{ParseError, Result};
use crate::lexer::DEFAULT_MAX_DEPTH;

/// Result of decoding from some position: what was decoded and where the
/// next unit starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step<T> {
    pub next: usize,
    pub value: T,
}

impl<T> Step<T> {
    fn new(next: usize, value: T) -> Self {
        Step { next, value }
    }
}

/// Decodes `tokens` with the default depth limit.
///
/// # Examples
///
/// ```
/// use artemis_ql::decoder::decode_tokens;
/// use artemis_ql::lexer::tokenize;
/// use artemis_ql::reclassify::reclassify;
///
/// let tokens = reclassify(tokenize("key:value").unwrap().tokens);
/// let forest = decode_tokens(&tokens).unwrap();
/// assert_eq!(forest.len(), 1);
/// assert_eq!(forest[0].kind_name(), "pair");
/// ```
pub fn decode_tokens(tokens: &[Token]) -> Result<Vec<Token>> {
    Decoder::default().decode_tokens(tokens)
}

fn is_partial_fragment(token: &Token) -> bool {
    matches!(
        token.kind,
        TokenKind::Word(_)
            | TokenKind::QuotedString(_)
            | TokenKind::IncompleteQuotedString(_)
            | TokenKind::Wildcard
            | TokenKind::AnyChar
    )
}

#[derive(Debug, Clone, Copy)]
pub struct Decoder {
    max_depth: usize,
}

impl Default for Decoder {
    fn default() -> Self {
        Decoder::new(DEFAULT_MAX_DEPTH)
    }
}

impl Decoder {
    /// `max_depth` bounds group nesting and chained pairs (`a:b:c:...`).
    pub fn new(max_depth: usize) -> Self {
        Decoder { max_depth }
    }

    /// Decodes a whole token sequence, skipping whitespace between units.
    pub fn decode_tokens(&self, tokens: &[Token]) -> Result<Vec<Token>> {
        self.decode_sequence(tokens, 0).map(|step| step.value)
    }

    /// Decodes the next logical unit starting at `i`.
    pub fn decode_one(&self, tokens: &[Token], i: usize) -> Result<Step<Option<Token>>> {
        self.decode_unit(tokens, i, 0)
    }

    /// Decodes the value starting at `i`, fusing adjacent pattern fragments
    /// into a `partial`.
    pub fn decode_value(&self, tokens: &[Token], i: usize) -> Result<Step<Option<Token>>> {
        self.decode_value_at(tokens, i, 0)
    }

    /// Decodes comma separated values starting at `i`.
    pub fn decode_value_list(&self, tokens: &[Token], i: usize) -> Result<Step<Vec<Token>>> {
        self.decode_list_at(tokens, i, 0)
    }

    fn descend(&self, depth: usize, token: &Token) -> Result<usize> {
        if depth >= self.max_depth {
            let offset = token.index.unwrap_or_default();
            tracing::warn!(offset, max_depth = self.max_depth, "decode nesting too deep");
            return Err(ParseError::DepthExceeded {
                offset,
                max_depth: self.max_depth,
            });
        }
        Ok(depth + 1)
    }

    fn decode_sequence(&self, tokens: &[Token], depth: usize) -> Result<Step<Vec<Token>>> {
        let mut result = Vec::new();
        let mut i = 0;

        while let Some(token) = tokens.get(i) {
            if token.is_space() {
                i += 1;
                continue;
            }

            let step = self.decode_unit(tokens, i, depth)?;
            match step.value {
                Some(decoded) => {
                    result.push(decoded);
                    i = step.next;
                }
                None => {
                    tracing::trace!(kind = token.kind_name(), "decoder made no progress");
                    return Err(ParseError::NoProgress {
                        kind: token.kind_name(),
                        offset: token.index.unwrap_or_default(),
                    });
                }
            }
        }

        Ok(Step::new(i, result))
    }

    fn decode_unit(&self, tokens: &[Token], i: usize, depth: usize) -> Result<Step<Option<Token>>> {
        let Some(subject) = tokens.get(i) else {
            return Ok(Step::new(i, None));
        };
        let next = tokens.get(i + 1);

        match &subject.kind {
            TokenKind::And | TokenKind::Or | TokenKind::Not => {
                Ok(Step::new(i + 1, Some(subject.clone())))
            }
            TokenKind::Group(_) | TokenKind::IncompleteGroup(_) => {
                let group = self.decode_group(subject, depth)?;
                Ok(Step::new(i + 1, Some(group)))
            }
            TokenKind::CmpOp(op) => {
                let value = self.decode_value_at(tokens, i + 1, depth)?;
                let end = value.value.as_ref().and_then(|v| v.span.end);
                let cmp = Token {
                    kind: TokenKind::Cmp {
                        op: *op,
                        value: value.value.map(Box::new),
                    },
                    index: subject.index,
                    span: Span::between(subject.span.start, end),
                    is_error: false,
                };
                Ok(Step::new(value.next, Some(cmp)))
            }
            TokenKind::RangeOp => {
                if let Some(bound) = next
                    && !bound.is_space()
                {
                    let value = self.decode_value_at(tokens, i + 1, depth)?;
                    let end = value.value.as_ref().and_then(|v| v.span.end);
                    let range = Token {
                        kind: TokenKind::Range {
                            start: Box::new(Token::INFINITY),
                            end: value.value.map(Box::new),
                        },
                        index: subject.index,
                        span: Span::between(subject.span.start, end),
                        is_error: false,
                    };
                    return Ok(Step::new(value.next, Some(range)));
                }

                let range = Token {
                    kind: TokenKind::Range {
                        start: Box::new(Token::INFINITY),
                        end: Some(Box::new(Token::INFINITY)),
                    },
                    ..subject.clone()
                };
                Ok(Step::new(i + 1, Some(range)))
            }
            TokenKind::PairOp => self.decode_pair(subject, None, tokens, i + 1, depth),
            TokenKind::Word(_) | TokenKind::QuotedString(_)
                if next.is_some_and(|t| matches!(t.kind, TokenKind::PairOp)) =>
            {
                let op = &tokens[i + 1];
                self.decode_pair(op, Some(subject), tokens, i + 2, depth)
            }
            TokenKind::ContinuationOp => {
                let list = self.decode_list_at(tokens, i, depth)?;
                let token = Token {
                    kind: TokenKind::List(list.value),
                    index: subject.index,
                    span: consumed_span(tokens, i, list.next),
                    is_error: false,
                };
                Ok(Step::new(list.next, Some(token)))
            }
            _ => self.decode_other(tokens, i, depth),
        }
    }

    fn decode_group(&self, group: &Token, depth: usize) -> Result<Token> {
        let depth = self.descend(depth, group)?;
        let kind = match &group.kind {
            TokenKind::Group(children) => {
                TokenKind::Group(self.decode_sequence(children, depth)?.value)
            }
            TokenKind::IncompleteGroup(children) => {
                TokenKind::IncompleteGroup(self.decode_sequence(children, depth)?.value)
            }
            _ => return Ok(group.clone()),
        };

        Ok(Token {
            kind,
            index: group.index,
            span: group.span,
            is_error: group.is_error,
        })
    }

    /// Builds a pair from `key` (if any) and the unit decoded at `i`, the
    /// position right after the `:` operator `op`.
    fn decode_pair(
        &self,
        op: &Token,
        key: Option<&Token>,
        tokens: &[Token],
        i: usize,
        depth: usize,
    ) -> Result<Step<Option<Token>>> {
        let depth = self.descend(depth, op)?;
        let value = self.decode_unit(tokens, i, depth)?;

        let first = key.unwrap_or(op);
        let span = Span::between(
            first.span.start,
            value.value.as_ref().and_then(|v| v.span.end),
        );

        let kind = match (key, value.value) {
            (Some(key), Some(value)) => TokenKind::Pair {
                key: Box::new(key.clone()),
                value: Box::new(value),
            },
            (key, value) => TokenKind::IncompletePair {
                key: key.cloned().map(Box::new),
                value: value.map(Box::new),
            },
        };

        let pair = Token {
            kind,
            index: first.index,
            span,
            is_error: false,
        };
        Ok(Step::new(value.next, Some(pair)))
    }

    /// Decodes a value, then wraps it into a range or list when the token
    /// right after it asks for one.
    fn decode_other(&self, tokens: &[Token], i: usize, depth: usize) -> Result<Step<Option<Token>>> {
        let step = self.decode_value_at(tokens, i, depth)?;
        let Some(value) = step.value else {
            return Ok(Step::new(step.next, None));
        };

        match tokens.get(step.next).map(|t| &t.kind) {
            Some(TokenKind::RangeOp) => {
                let op = &tokens[step.next];
                let mut next = step.next + 1;

                let end = match tokens.get(next) {
                    Some(bound) if !bound.is_space() => {
                        let bound = self.decode_value_at(tokens, next, depth)?;
                        next = bound.next;
                        bound.value
                    }
                    _ => Some(Token::INFINITY),
                };

                let span_end = match &end {
                    Some(bound) if bound.is_infinity() => op.span.end,
                    Some(bound) => bound.span.end,
                    None => None,
                };

                let range = Token {
                    index: value.index,
                    span: Span::between(value.span.start, span_end),
                    kind: TokenKind::Range {
                        start: Box::new(value),
                        end: end.map(Box::new),
                    },
                    is_error: false,
                };
                Ok(Step::new(next, Some(range)))
            }
            Some(TokenKind::ContinuationOp) => {
                let list = self.decode_list_at(tokens, i, depth)?;
                let token = Token {
                    kind: TokenKind::List(list.value),
                    index: value.index,
                    span: consumed_span(tokens, i, list.next),
                    is_error: false,
                };
                Ok(Step::new(list.next, Some(token)))
            }
            _ => Ok(Step::new(step.next, Some(value))),
        }
    }

    fn decode_value_at(
        &self,
        tokens: &[Token],
        i: usize,
        depth: usize,
    ) -> Result<Step<Option<Token>>> {
        let Some(first) = tokens.get(i) else {
            return Ok(Step::new(i, None));
        };

        if is_partial_fragment(first) {
            let run = tokens[i..]
                .iter()
                .take_while(|t| is_partial_fragment(t))
                .count();
            let fragments = &tokens[i..i + run];
            let last = &fragments[run - 1];

            let value = if run == 1 {
                first.clone()
            } else {
                Token {
                    kind: TokenKind::Partial(fragments.to_vec()),
                    index: first.index,
                    span: Span::between(first.span.start, last.span.end),
                    is_error: false,
                }
            };
            return Ok(Step::new(i + run, Some(value)));
        }

        match &first.kind {
            TokenKind::Null
            | TokenKind::Range { .. }
            | TokenKind::Cmp { .. }
            | TokenKind::Pin(_)
            | TokenKind::IncompletePin => Ok(Step::new(i + 1, Some(first.clone()))),
            TokenKind::Group(_) | TokenKind::IncompleteGroup(_) => {
                Ok(Step::new(i + 1, Some(self.decode_group(first, depth)?)))
            }
            _ => Ok(Step::new(i, None)),
        }
    }

    fn decode_list_at(&self, tokens: &[Token], i: usize, depth: usize) -> Result<Step<Vec<Token>>> {
        let mut items = Vec::new();
        let mut next = i;

        while next < tokens.len() {
            let step = self.decode_value_at(tokens, next, depth)?;
            next = step.next;
            items.extend(step.value);

            match tokens.get(next) {
                None => break,
                Some(token) if token.is_space() => break,
                Some(token) if matches!(token.kind, TokenKind::ContinuationOp) => next += 1,
                Some(token) => {
                    tracing::trace!(kind = token.kind_name(), "list element followed by junk");
                    return Err(ParseError::UnterminatedList {
                        kind: token.kind_name(),
                        offset: token.index.unwrap_or_default(),
                    });
                }
            }
        }

        Ok(Step::new(next, items))
    }
}

/// Span from the first to the last raw token in `tokens[start..end]`.
fn consumed_span(tokens: &[Token], start: usize, end: usize) -> Span {
    match &tokens[start..end] {
        [first, .., last] => Span::between(first.span.start, last.span.end),
        [only] => only.span,
        [] => Span::NONE,
    }
}
