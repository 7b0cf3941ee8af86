use std::sync::LazyLock;

use regex::Regex;

use crate::ast::{CmpOp, Span, Token, TokenKind};
use crate::error::{ParseError, Result};

/// Default limit on group nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[@A-Za-z0-9_-]+").expect("word pattern is valid"));

/// Tab, vertical tab, space and the Unicode space separators.
pub const SPACE_CHARS: [char; 19] = [
    '\u{0009}', '\u{000B}', '\u{0020}', '\u{00A0}', '\u{1680}', '\u{2000}', '\u{2001}',
    '\u{2002}', '\u{2003}', '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}',
    '\u{2009}', '\u{200A}', '\u{202F}', '\u{205F}', '\u{3000}',
];

/// LF, FF, CR, NEL, line separator and paragraph separator.
pub const NEWLINE_CHARS: [char; 6] = [
    '\u{000A}', '\u{000C}', '\u{000D}', '\u{0085}', '\u{2028}', '\u{2029}',
];

pub fn is_space_like_char(ch: char) -> bool {
    SPACE_CHARS.contains(&ch)
}

pub fn is_newline_like_char(ch: char) -> bool {
    NEWLINE_CHARS.contains(&ch)
}

fn is_blank(ch: char) -> bool {
    is_space_like_char(ch) || is_newline_like_char(ch)
}

/// A run of whitespace found by [`split_spaces`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpaceRun<'a> {
    pub start: usize,
    pub end: usize,
    pub value: &'a str,
}

/// Reads the run of space and newline characters starting at `start`.
///
/// The run is empty when `start` does not point at whitespace.
pub fn split_spaces(input: &str, start: usize) -> SpaceRun<'_> {
    let len = input[start..]
        .char_indices()
        .find(|&(_, ch)| !is_blank(ch))
        .map_or(input.len() - start, |(offset, _)| offset);

    SpaceRun {
        start,
        end: start + len,
        value: &input[start..start + len],
    }
}

/// A quoted string read by [`parse_quoted_string`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotedString {
    pub start: usize,
    /// Offset just past the closing quote, or the end of input.
    pub end: usize,
    pub value: String,
    pub closed: bool,
}

enum Escape {
    Char(char),
    /// `\u` not followed by a usable code; the `u` stands for itself
    Literal(char),
    /// `\u{` without its closing brace
    Unterminated,
}

/// Reads a double-quoted string whose opening quote sits at `start`.
///
/// Running out of input before the closing quote is not an error: the
/// returned string is marked as not closed and holds whatever was read.
pub fn parse_quoted_string(input: &str, start: usize) -> QuotedString {
    debug_assert!(
        input[start..].starts_with('"'),
        "quoted string must start at a quotation mark"
    );

    let body_start = start + 1;
    let mut chars = input[body_start..].char_indices();
    let mut value = String::new();

    while let Some((offset, ch)) = chars.next() {
        match ch {
            '"' => {
                return QuotedString {
                    start,
                    end: body_start + offset + 1,
                    value,
                    closed: true,
                };
            }
            '\\' => match chars.next() {
                Some((_, 'u')) => match read_unicode_escape(&mut chars) {
                    Escape::Char(ch) | Escape::Literal(ch) => value.push(ch),
                    Escape::Unterminated => break,
                },
                Some((_, escaped)) => value.push(unescape(escaped)),
                None => break,
            },
            _ => value.push(ch),
        }
    }

    QuotedString {
        start,
        end: input.len(),
        value,
        closed: false,
    }
}

fn unescape(ch: char) -> char {
    match ch {
        '0' => '\0',
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        'n' => '\n',
        'r' => '\r',
        's' => ' ',
        't' => '\t',
        'v' => '\u{000B}',
        // `\\`, `\"` and anything unknown stand for themselves
        other => other,
    }
}

/// Reads what follows `\u`: either `{HEX...}` or exactly four hex digits.
fn read_unicode_escape(chars: &mut std::str::CharIndices<'_>) -> Escape {
    let mut lookahead = chars.clone();

    if let Some((_, '{')) = lookahead.next() {
        let mut hex = String::new();
        for (_, ch) in lookahead.by_ref() {
            if ch == '}' {
                *chars = lookahead;
                return Escape::Char(code_point(&hex));
            }
            hex.push(ch);
        }
        *chars = lookahead;
        return Escape::Unterminated;
    }

    let mut lookahead = chars.clone();
    let hex: String = lookahead.by_ref().take(4).map(|(_, ch)| ch).collect();
    if hex.len() == 4 && hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        *chars = lookahead;
        Escape::Char(code_point(&hex))
    } else {
        Escape::Literal('u')
    }
}

fn code_point(hex: &str) -> char {
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Output of a tokenizer run: the tokens plus the `[start, end)` range of
/// input they were read from.
///
/// `end` stops short of the input length when scanning hit an unmatched `)`,
/// a lone `.`, or a character that starts no token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokenized {
    pub start: usize,
    pub end: usize,
    pub tokens: Vec<Token>,
}

/// Tokenizes `input` from the beginning with the default depth limit.
///
/// # Examples
///
/// ```
/// use artemis_ql::lexer::tokenize;
/// use artemis_ql::TokenKind;
///
/// let tokenized = tokenize("key:value").unwrap();
/// assert_eq!(tokenized.end, 9);
/// assert_eq!(tokenized.tokens[1].kind, TokenKind::PairOp);
/// ```
pub fn tokenize(input: &str) -> Result<Tokenized> {
    Lexer::new(input).tokenize()
}

pub struct Lexer<'a> {
    input: &'a str,
    max_depth: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limits how deeply groups may nest before tokenizing fails.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn tokenize(&self) -> Result<Tokenized> {
        self.tokenize_from(0)
    }

    /// Tokenizes starting at byte offset `start`, which must be a character
    /// boundary.
    pub fn tokenize_from(&self, start: usize) -> Result<Tokenized> {
        self.scan(start, 0)
    }

    fn char_at(&self, position: usize) -> Option<char> {
        self.input.get(position..)?.chars().next()
    }

    fn scan(&self, start: usize, depth: usize) -> Result<Tokenized> {
        let mut tokens = Vec::new();
        let mut position = start;

        while let Some(ch) = self.char_at(position) {
            let next = self.char_at(position + ch.len_utf8());

            let (kind, width) = match ch {
                c if is_blank(c) => {
                    let run = split_spaces(self.input, position);
                    tokens.push(Token::at(
                        TokenKind::Space(run.value.to_string()),
                        run.start,
                        run.end,
                    ));
                    position = run.end;
                    continue;
                }
                '"' => {
                    let quoted = parse_quoted_string(self.input, position);
                    let kind = if quoted.closed {
                        TokenKind::QuotedString(quoted.value)
                    } else {
                        TokenKind::IncompleteQuotedString(quoted.value)
                    };
                    tokens.push(Token::at(kind, quoted.start, quoted.end));
                    position = quoted.end;
                    continue;
                }
                '(' => {
                    position = self.scan_group(position, depth, &mut tokens)?;
                    continue;
                }
                ')' => break,
                '^' => (TokenKind::PinOp, 1),
                // two character operators must be tried before their prefixes
                '>' if next == Some('=') => (TokenKind::CmpOp(CmpOp::Gte), 2),
                '<' if next == Some('=') => (TokenKind::CmpOp(CmpOp::Lte), 2),
                '!' if next == Some('~') => (TokenKind::CmpOp(CmpOp::Nfuzz), 2),
                '>' => (TokenKind::CmpOp(CmpOp::Gt), 1),
                '<' => (TokenKind::CmpOp(CmpOp::Lt), 1),
                '!' => (TokenKind::CmpOp(CmpOp::Neq), 1),
                '=' => (TokenKind::CmpOp(CmpOp::Eq), 1),
                '~' => (TokenKind::CmpOp(CmpOp::Fuzz), 1),
                '*' => (TokenKind::Wildcard, 1),
                '?' => (TokenKind::AnyChar, 1),
                ':' => (TokenKind::PairOp, 1),
                '.' if next == Some('.') => (TokenKind::RangeOp, 2),
                ',' => (TokenKind::ContinuationOp, 1),
                _ => match WORD.find(&self.input[position..]) {
                    Some(word) => (TokenKind::Word(word.as_str().to_string()), word.end()),
                    None => break,
                },
            };

            tokens.push(Token::at(kind, position, position + width));
            position += width;
        }

        Ok(Tokenized {
            start,
            end: position,
            tokens,
        })
    }

    /// Scans the group opened at `open`, pushes it and returns where scanning
    /// continues.
    fn scan_group(&self, open: usize, depth: usize, tokens: &mut Vec<Token>) -> Result<usize> {
        if depth >= self.max_depth {
            tracing::warn!(offset = open, max_depth = self.max_depth, "group nesting too deep");
            return Err(ParseError::DepthExceeded {
                offset: open,
                max_depth: self.max_depth,
            });
        }

        let inner = self.scan(open + 1, depth + 1)?;

        if self.char_at(inner.end) == Some(')') {
            let end = inner.end + 1;
            tokens.push(Token::at(TokenKind::Group(inner.tokens), open, end));
            Ok(end)
        } else {
            tokens.push(Token::new(
                TokenKind::IncompleteGroup(inner.tokens),
                open,
                Span::open(open),
            ));
            // Skip the character the inner scan could not read; at the end of
            // input there is nothing to skip.
            Ok(self
                .char_at(inner.end)
                .map_or(inner.end, |ch| inner.end + ch.len_utf8()))
        }
    }
}
