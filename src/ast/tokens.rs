use crate::ast::CmpOp;

/// Half-open `[start, end)` byte range covered by a token.
///
/// A bound is `None` when there is no real position for it: the synthetic
/// infinity token has neither, and a composite whose closing child is missing
/// (an `incomplete:pair` with no value, an unclosed group) has no end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: Option<usize>,
    pub end: Option<usize>,
}

impl Span {
    pub const NONE: Span = Span {
        start: None,
        end: None,
    };

    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: Some(start),
            end: Some(end),
        }
    }

    /// A span whose end is unknown.
    pub fn open(start: usize) -> Self {
        Span {
            start: Some(start),
            end: None,
        }
    }

    pub fn between(start: Option<usize>, end: Option<usize>) -> Self {
        Span { start, end }
    }
}

/// Every kind of token the tokenizer, reclassifier and decoder can produce,
/// with the payload that kind carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Tokenizer output
    /// Run of whitespace and newline characters
    Space(String),

    /// Bare word made of `[@A-Za-z0-9_-]`
    ///
    /// # Examples
    /// ```text
    /// status
    /// @me
    /// hyphe-nated
    /// ```
    Word(String),

    /// Double-quoted string, escapes already resolved
    ///
    /// # Examples
    /// ```text
    /// "My Quoted String"
    /// "tab\tseparated"
    /// ```
    QuotedString(String),

    /// Quoted string that reached end of input before its closing quote
    IncompleteQuotedString(String),

    /// Pin marker (`^`)
    PinOp,

    /// Comparison operator (`>=`, `<=`, `!~`, `>`, `<`, `!`, `=`, `~`)
    CmpOp(CmpOp),

    /// Pair separator (`:`)
    PairOp,

    /// Range operator (`..`)
    RangeOp,

    /// List separator (`,`)
    ContinuationOp,

    /// Wildcard (`*`)
    Wildcard,

    /// Single character wildcard (`?`)
    AnyChar,

    /// Parenthesised sub-query
    ///
    /// The tokenizer fills it with raw tokens; after decoding it holds the
    /// decoded forest of its contents.
    Group(Vec<Token>),

    /// Group without its closing parenthesis
    IncompleteGroup(Vec<Token>),

    // Reclassifier output
    /// `AND`, any case
    And,

    /// `OR`, any case
    Or,

    /// `NOT`, any case
    Not,

    /// `NULL`, any case
    Null,

    /// Pinned value
    ///
    /// Holds `None` only when the token is error-flagged: the marker was
    /// followed by something that cannot be pinned.
    ///
    /// # Examples
    /// ```text
    /// ^exact
    /// ^"pinned value"
    /// ```
    Pin(Option<Box<Token>>),

    /// Pin marker at the very end of input
    IncompletePin,

    // Decoder output
    /// Comparison; `value` is `None` when nothing followed the operator
    ///
    /// # Examples
    /// ```text
    /// >=5
    /// !~draft
    /// ```
    Cmp {
        op: CmpOp,
        value: Option<Box<Token>>,
    },

    /// Range between two bounds; an omitted bound is [`Token::INFINITY`]
    ///
    /// `end` is `None` only when something other than a value followed the
    /// operator (e.g. `10..,`).
    ///
    /// # Examples
    /// ```text
    /// 10..20
    /// 10..
    /// ..20
    /// ```
    Range {
        start: Box<Token>,
        end: Option<Box<Token>>,
    },

    /// Key/value pair
    ///
    /// # Examples
    /// ```text
    /// key:value
    /// age:>=18
    /// tags:a,b,c
    /// ```
    Pair { key: Box<Token>, value: Box<Token> },

    /// Pair missing its key (`:value`), its value (`key:`), or both (`:`)
    IncompletePair {
        key: Option<Box<Token>>,
        value: Option<Box<Token>>,
    },

    /// Comma separated values
    ///
    /// # Examples
    /// ```text
    /// a,b,c
    /// ,b
    /// ```
    List(Vec<Token>),

    /// Pattern fragments written back to back
    ///
    /// # Examples
    /// ```text
    /// abc*def?
    /// prefix"quoted part"
    /// ```
    Partial(Vec<Token>),

    /// Omitted range bound
    Infinity,
}

impl TokenKind {
    /// Wire name of the kind, as used by the JSON rendering.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Space(_) => "space",
            TokenKind::Word(_) => "word",
            TokenKind::QuotedString(_) => "quoted_string",
            TokenKind::IncompleteQuotedString(_) => "incomplete:quoted_string",
            TokenKind::PinOp => "pin_op",
            TokenKind::CmpOp(_) => "cmp_op",
            TokenKind::PairOp => "pair_op",
            TokenKind::RangeOp => "range_op",
            TokenKind::ContinuationOp => "continuation_op",
            TokenKind::Wildcard => "wildcard",
            TokenKind::AnyChar => "any_char",
            TokenKind::Group(_) => "group",
            TokenKind::IncompleteGroup(_) => "incomplete:group",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Not => "not",
            TokenKind::Null => "null",
            TokenKind::Pin(_) => "pin",
            TokenKind::IncompletePin => "incomplete:pin",
            TokenKind::Cmp { .. } => "cmp",
            TokenKind::Range { .. } => "range",
            TokenKind::Pair { .. } => "pair",
            TokenKind::IncompletePair { .. } => "incomplete:pair",
            TokenKind::List(_) => "list",
            TokenKind::Partial(_) => "partial",
            TokenKind::Infinity => "infinity",
        }
    }

    pub fn is_incomplete(&self) -> bool {
        matches!(
            self,
            TokenKind::IncompleteQuotedString(_)
                | TokenKind::IncompleteGroup(_)
                | TokenKind::IncompletePin
                | TokenKind::IncompletePair { .. }
        )
    }
}

/// A token: its kind and payload plus where it came from in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the token's first character; `None` for [`Token::INFINITY`].
    pub index: Option<usize>,
    pub span: Span,
    pub is_error: bool,
}

impl Token {
    /// Stand-in for a range bound that was not written.
    pub const INFINITY: Token = Token {
        kind: TokenKind::Infinity,
        index: None,
        span: Span::NONE,
        is_error: false,
    };

    pub fn new(kind: TokenKind, index: usize, span: Span) -> Self {
        Token {
            kind,
            index: Some(index),
            span,
            is_error: false,
        }
    }

    /// A token covering `[start, end)`.
    pub fn at(kind: TokenKind, start: usize, end: usize) -> Self {
        Token::new(kind, start, Span::new(start, end))
    }

    pub fn with_error(mut self) -> Self {
        self.is_error = true;
        self
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_incomplete(&self) -> bool {
        self.kind.is_incomplete()
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self.kind, TokenKind::Infinity)
    }

    pub fn is_space(&self) -> bool {
        matches!(self.kind, TokenKind::Space(_))
    }

    /// Text payload of words, quoted strings and whitespace.
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Space(s)
            | TokenKind::Word(s)
            | TokenKind::QuotedString(s)
            | TokenKind::IncompleteQuotedString(s) => Some(s),
            _ => None,
        }
    }

    /// Direct children, in source order.
    pub fn children(&self) -> Vec<&Token> {
        match &self.kind {
            TokenKind::Group(tokens)
            | TokenKind::IncompleteGroup(tokens)
            | TokenKind::List(tokens)
            | TokenKind::Partial(tokens) => tokens.iter().collect(),
            TokenKind::Pin(child) => child.as_deref().into_iter().collect(),
            TokenKind::Cmp { value, .. } => value.as_deref().into_iter().collect(),
            TokenKind::Range { start, end } => std::iter::once(start.as_ref())
                .chain(end.as_deref())
                .collect(),
            TokenKind::Pair { key, value } => vec![key.as_ref(), value.as_ref()],
            TokenKind::IncompletePair { key, value } => {
                key.as_deref().into_iter().chain(value.as_deref()).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Visits this token and all of its descendants, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Token)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }
}
