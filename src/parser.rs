use crate::{
    ast::Token,
    decoder::Decoder,
    error::Result,
    lexer::{DEFAULT_MAX_DEPTH, Lexer},
    reclassify::reclassify,
};

/// Settings shared by every stage of a parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Deepest allowed nesting of groups and chained pairs. Anything deeper
    /// fails with [`crate::ParseError::DepthExceeded`].
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Everything a parse produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed {
    /// Raw tokenizer output, before reclassification.
    pub tokens: Vec<Token>,
    /// The decoded token forest.
    pub decoded: Vec<Token>,
    pub consumed_start: usize,
    /// Where tokenizing stopped. Less than `input_len` when an unmatched `)`
    /// or an untokenizable character cut the input short.
    pub consumed_end: usize,
    pub input_len: usize,
}

impl Parsed {
    pub fn is_fully_consumed(&self) -> bool {
        self.consumed_end >= self.input_len
    }

    /// Every incomplete or error-flagged token in the forest, depth first.
    pub fn problems(&self) -> Vec<&Token> {
        let mut problems = Vec::new();
        for token in &self.decoded {
            token.walk(&mut |t| {
                if t.is_incomplete() || t.is_error {
                    problems.push(t);
                }
            });
        }
        problems
    }

    /// True when the whole input was read and nothing in the forest asks the
    /// user for a correction.
    pub fn is_complete(&self) -> bool {
        self.is_fully_consumed() && self.problems().is_empty()
    }
}

/// Runs tokenizer, reclassifier and decoder over a query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser { options }
    }

    /// Parses `input` into a token forest.
    ///
    /// # Examples
    ///
    /// ```
    /// use artemis_ql::{Parser, TokenKind};
    ///
    /// let parsed = Parser::default().parse("(x OR y) NOT z").unwrap();
    /// assert_eq!(parsed.decoded.len(), 3);
    /// assert_eq!(parsed.decoded[1].kind, TokenKind::Not);
    /// assert!(parsed.is_complete());
    /// ```
    pub fn parse(&self, input: &str) -> Result<Parsed> {
        let tokenized = Lexer::new(input)
            .with_max_depth(self.options.max_depth)
            .tokenize()?;
        tracing::debug!(
            input_len = input.len(),
            tokens = tokenized.tokens.len(),
            consumed_end = tokenized.end,
            "tokenized query"
        );

        let reclassified = reclassify(tokenized.tokens.clone());
        let decoded = Decoder::new(self.options.max_depth).decode_tokens(&reclassified)?;
        tracing::debug!(decoded = decoded.len(), "decoded query");

        Ok(Parsed {
            tokens: tokenized.tokens,
            decoded,
            consumed_start: tokenized.start,
            consumed_end: tokenized.end,
            input_len: input.len(),
        })
    }
}

/// Parses `input` with default options.
pub fn parse(input: &str) -> Result<Parsed> {
    Parser::default().parse(input)
}
