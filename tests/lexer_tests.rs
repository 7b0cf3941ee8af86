// tests/lexer_tests.rs

use artemis_ql::ast::{CmpOp, OPERATORS, Span, Token, TokenKind};
use artemis_ql::lexer::{Lexer, tokenize};

fn word(s: &str, start: usize) -> Token {
    Token::at(TokenKind::Word(s.to_string()), start, start + s.len())
}

fn space(s: &str, start: usize) -> Token {
    Token::at(TokenKind::Space(s.to_string()), start, start + s.len())
}

fn single(kind: TokenKind, start: usize) -> Token {
    Token::at(kind, start, start + 1)
}

// ============================================================================
// Empty input and whitespace
// ============================================================================

#[test]
fn test_empty_string() {
    let tokenized = tokenize("").unwrap();
    assert_eq!(tokenized.start, 0);
    assert_eq!(tokenized.end, 0);
    assert!(tokenized.tokens.is_empty());
}

#[test]
fn test_spaced_string() {
    let tokenized = tokenize("\t ").unwrap();
    assert_eq!(tokenized.end, 2);
    assert_eq!(tokenized.tokens, vec![space("\t ", 0)]);
}

#[test]
fn test_mixed_space_and_newline_run() {
    let input = "a \u{2028}\r\n\u{3000}b";
    let tokenized = tokenize(input).unwrap();
    assert_eq!(tokenized.tokens.len(), 3);
    assert_eq!(tokenized.tokens[1].text(), Some(" \u{2028}\r\n\u{3000}"));
    assert_eq!(tokenized.tokens[2].index, Some(input.len() - 1));
    assert_eq!(tokenized.end, input.len());
}

// ============================================================================
// Words
// ============================================================================

#[test]
fn test_single_word() {
    let tokenized = tokenize("WORD").unwrap();
    assert_eq!(tokenized.end, 4);
    assert_eq!(tokenized.tokens, vec![word("WORD", 0)]);
}

#[test]
fn test_words_with_special_characters() {
    let tokenized = tokenize("WORD @special _underscore hyphe-nated").unwrap();
    assert_eq!(tokenized.end, 37);
    assert_eq!(
        tokenized.tokens,
        vec![
            word("WORD", 0),
            space(" ", 4),
            word("@special", 5),
            space(" ", 13),
            word("_underscore", 14),
            space(" ", 25),
            word("hyphe-nated", 26),
        ]
    );
}

#[test]
fn test_untokenizable_character_stops_scan() {
    let tokenized = tokenize("abc #def").unwrap();
    assert_eq!(tokenized.end, 4);
    assert_eq!(tokenized.tokens, vec![word("abc", 0), space(" ", 3)]);

    let tokenized = tokenize("a.b").unwrap();
    assert_eq!(tokenized.end, 1);
    assert_eq!(tokenized.tokens, vec![word("a", 0)]);
}

// ============================================================================
// Quoted strings
// ============================================================================

#[test]
fn test_empty_quoted_string() {
    let tokenized = tokenize("\"\"").unwrap();
    assert_eq!(tokenized.end, 2);
    assert_eq!(
        tokenized.tokens,
        vec![Token::at(TokenKind::QuotedString(String::new()), 0, 2)]
    );
}

#[test]
fn test_quoted_string() {
    let tokenized = tokenize("\"My Quoted String\"").unwrap();
    assert_eq!(tokenized.end, 18);
    assert_eq!(
        tokenized.tokens,
        vec![Token::at(
            TokenKind::QuotedString("My Quoted String".into()),
            0,
            18
        )]
    );
}

#[test]
fn test_quoted_string_escapes() {
    let test_cases = vec![
        (r#""a\\b""#, "a\\b"),
        (r#""say \"hi\"""#, "say \"hi\""),
        (r#""\0\b\f""#, "\0\u{8}\u{c}"),
        (r#""\n\r\t\v""#, "\n\r\t\u{b}"),
        (r#""a\sb""#, "a b"),
        (r#""Aé""#, "Aé"),
        (r#""\u{41}\u{1F600}""#, "A\u{1F600}"),
        (r#""\q""#, "q"),
    ];

    for (input, expected) in test_cases {
        let tokenized = tokenize(input).unwrap();
        assert_eq!(tokenized.end, input.len(), "Failed for input: {}", input);
        assert_eq!(
            tokenized.tokens[0].kind,
            TokenKind::QuotedString(expected.to_string()),
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_unterminated_quoted_string() {
    let tokenized = tokenize("\"open ended").unwrap();
    assert_eq!(tokenized.end, 11);
    assert_eq!(
        tokenized.tokens,
        vec![Token::at(
            TokenKind::IncompleteQuotedString("open ended".into()),
            0,
            11
        )]
    );

    // a trailing backslash escapes nothing
    let tokenized = tokenize(r#""abc\"#).unwrap();
    assert_eq!(
        tokenized.tokens[0].kind,
        TokenKind::IncompleteQuotedString("abc".into())
    );
}

#[test]
fn test_escaped_quote_does_not_close() {
    let tokenized = tokenize(r#""a\" b"#).unwrap();
    assert_eq!(
        tokenized.tokens[0].kind,
        TokenKind::IncompleteQuotedString("a\" b".into())
    );
}

// ============================================================================
// Pairs
// ============================================================================

#[test]
fn test_key_value_pair() {
    let tokenized = tokenize("key:value").unwrap();
    assert_eq!(tokenized.end, 9);
    assert_eq!(
        tokenized.tokens,
        vec![
            word("key", 0),
            single(TokenKind::PairOp, 3),
            word("value", 4)
        ]
    );
}

#[test]
fn test_incomplete_key_value_pair() {
    let tokenized = tokenize("key:").unwrap();
    assert_eq!(tokenized.end, 4);
    assert_eq!(
        tokenized.tokens,
        vec![word("key", 0), single(TokenKind::PairOp, 3)]
    );

    let tokenized = tokenize("key:    ").unwrap();
    assert_eq!(tokenized.end, 8);
    assert_eq!(
        tokenized.tokens,
        vec![
            word("key", 0),
            single(TokenKind::PairOp, 3),
            space("    ", 4)
        ]
    );

    let tokenized = tokenize(":value").unwrap();
    assert_eq!(tokenized.end, 6);
    assert_eq!(
        tokenized.tokens,
        vec![single(TokenKind::PairOp, 0), word("value", 1)]
    );
}

#[test]
fn test_mixed_pairs() {
    let tokenized = tokenize("key:value key2: ").unwrap();
    assert_eq!(tokenized.end, 16);
    assert_eq!(
        tokenized.tokens,
        vec![
            word("key", 0),
            single(TokenKind::PairOp, 3),
            word("value", 4),
            space(" ", 9),
            word("key2", 10),
            single(TokenKind::PairOp, 14),
            space(" ", 15),
        ]
    );
}

// ============================================================================
// Operators
// ============================================================================

#[test]
fn test_comparison_operators() {
    for (name, symbol) in OPERATORS {
        let op = CmpOp::from_name(name).unwrap();
        let input = format!("{}value", symbol);
        let tokenized = tokenize(&input).unwrap();

        assert_eq!(tokenized.end, symbol.len() + 5, "Failed for input: {}", input);
        assert_eq!(
            tokenized.tokens,
            vec![
                Token::at(TokenKind::CmpOp(op), 0, symbol.len()),
                word("value", symbol.len()),
            ],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_comparison_operators_in_pair() {
    for (name, symbol) in OPERATORS {
        let op = CmpOp::from_name(name).unwrap();
        let input = format!("key:{}value", symbol);
        let tokenized = tokenize(&input).unwrap();

        assert_eq!(tokenized.end, symbol.len() + 9, "Failed for input: {}", input);
        assert_eq!(
            tokenized.tokens,
            vec![
                word("key", 0),
                single(TokenKind::PairOp, 3),
                Token::at(TokenKind::CmpOp(op), 4, 4 + symbol.len()),
                word("value", 4 + symbol.len()),
            ],
            "Failed for input: {}",
            input
        );
    }
}

#[test]
fn test_two_char_vs_single_char() {
    let tokenized = tokenize("> =").unwrap();
    let kinds: Vec<_> = tokenized.tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::CmpOp(CmpOp::Gt),
            TokenKind::Space(" ".into()),
            TokenKind::CmpOp(CmpOp::Eq),
        ]
    );

    let tokenized = tokenize("!~~").unwrap();
    let kinds: Vec<_> = tokenized.tokens.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::CmpOp(CmpOp::Nfuzz), TokenKind::CmpOp(CmpOp::Fuzz)]
    );
}

#[test]
fn test_range_operator() {
    let tokenized = tokenize("10..20").unwrap();
    assert_eq!(
        tokenized.tokens,
        vec![
            word("10", 0),
            Token::at(TokenKind::RangeOp, 2, 4),
            word("20", 4)
        ]
    );
}

#[test]
fn test_punctuation() {
    let tokenized = tokenize("^*?:,").unwrap();
    assert_eq!(
        tokenized.tokens,
        vec![
            single(TokenKind::PinOp, 0),
            single(TokenKind::Wildcard, 1),
            single(TokenKind::AnyChar, 2),
            single(TokenKind::PairOp, 3),
            single(TokenKind::ContinuationOp, 4),
        ]
    );
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_empty_list() {
    let tokenized = tokenize(",").unwrap();
    assert_eq!(tokenized.end, 1);
    assert_eq!(tokenized.tokens, vec![single(TokenKind::ContinuationOp, 0)]);
}

#[test]
fn test_single_element_list() {
    let tokenized = tokenize(",b").unwrap();
    assert_eq!(tokenized.end, 2);
    assert_eq!(
        tokenized.tokens,
        vec![single(TokenKind::ContinuationOp, 0), word("b", 1)]
    );
}

#[test]
fn test_two_element_list() {
    let tokenized = tokenize("a,b").unwrap();
    assert_eq!(tokenized.end, 3);
    assert_eq!(
        tokenized.tokens,
        vec![
            word("a", 0),
            single(TokenKind::ContinuationOp, 1),
            word("b", 2)
        ]
    );
}

// ============================================================================
// Groups
// ============================================================================

#[test]
fn test_empty_group() {
    let tokenized = tokenize("()").unwrap();
    assert_eq!(tokenized.end, 2);
    assert_eq!(
        tokenized.tokens,
        vec![Token::at(TokenKind::Group(vec![]), 0, 2)]
    );
}

#[test]
fn test_multiple_empty_groups() {
    let tokenized = tokenize("()()()").unwrap();
    assert_eq!(tokenized.end, 6);
    assert_eq!(
        tokenized.tokens,
        vec![
            Token::at(TokenKind::Group(vec![]), 0, 2),
            Token::at(TokenKind::Group(vec![]), 2, 4),
            Token::at(TokenKind::Group(vec![]), 4, 6),
        ]
    );
}

#[test]
fn test_nested_group() {
    let tokenized = tokenize("(a (b))").unwrap();
    assert_eq!(tokenized.end, 7);
    assert_eq!(
        tokenized.tokens,
        vec![Token::at(
            TokenKind::Group(vec![
                word("a", 1),
                space(" ", 2),
                Token::at(TokenKind::Group(vec![word("b", 4)]), 3, 6),
            ]),
            0,
            7
        )]
    );
}

#[test]
fn test_incomplete_group() {
    let tokenized = tokenize("(").unwrap();
    assert_eq!(tokenized.end, 1);
    assert_eq!(
        tokenized.tokens,
        vec![Token::new(TokenKind::IncompleteGroup(vec![]), 0, Span::open(0))]
    );
}

#[test]
fn test_incomplete_group_skips_unreadable_character() {
    // the lone `.` ends the group; scanning goes on after it until the `)`
    let tokenized = tokenize("(a.b) c").unwrap();
    assert_eq!(tokenized.end, 4);
    assert_eq!(
        tokenized.tokens,
        vec![
            Token::new(TokenKind::IncompleteGroup(vec![word("a", 1)]), 0, Span::open(0)),
            word("b", 3),
        ]
    );

    let tokenized = tokenize("(a$b").unwrap();
    assert_eq!(tokenized.end, 4);
    assert_eq!(
        tokenized.tokens,
        vec![
            Token::new(TokenKind::IncompleteGroup(vec![word("a", 1)]), 0, Span::open(0)),
            word("b", 3),
        ]
    );

    let tokenized = tokenize("(é x").unwrap();
    assert_eq!(tokenized.end, 5);
    assert_eq!(tokenized.tokens.len(), 3);
    assert_eq!(tokenized.tokens[2], word("x", 4));
}

#[test]
fn test_prematurely_closed_group() {
    let tokenized = tokenize(")").unwrap();
    assert_eq!(tokenized.end, 0);
    assert!(tokenized.tokens.is_empty());

    let tokenized = tokenize("a)b").unwrap();
    assert_eq!(tokenized.end, 1);
    assert_eq!(tokenized.tokens, vec![word("a", 0)]);
}

#[test]
fn test_tokenize_from_offset() {
    let tokenized = Lexer::new("skip me").tokenize_from(5).unwrap();
    assert_eq!(tokenized.start, 5);
    assert_eq!(tokenized.end, 7);
    assert_eq!(tokenized.tokens, vec![word("me", 5)]);
}

#[test]
fn test_deep_nesting_fails_closed() {
    let input = "(".repeat(10_000);
    assert!(tokenize(&input).is_err());

    let input = "(".repeat(40);
    assert!(Lexer::new(&input).with_max_depth(40).tokenize().is_ok());
    assert!(Lexer::new(&input).with_max_depth(39).tokenize().is_err());
}
