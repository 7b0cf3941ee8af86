//! JSON rendering of token forests.
//!
//! Tokens are rendered in the shape the JavaScript consumers of Artemis QL
//! already read:
//!
//! ```text
//! {"type": "pair", "index": 0, "pos": [0, 9], "value": {"key": {...}, "value": {...}}}
//! ```
//!
//! - `type` is the kind name (`word`, `incomplete:pair`, ...)
//! - missing offsets are rendered as `-1`
//! - `isError` is only present on error-flagged tokens
//!
//! # Examples
//!
//! ```
//! use artemis_ql::{output::to_json, parse};
//!
//! let parsed = parse("WORD").unwrap();
//! assert_eq!(
//!     to_json(&parsed.decoded),
//!     r#"[{"index":0,"pos":[0,4],"type":"word","value":"WORD"}]"#
//! );
//! ```

use serde_json::{Map, Value, json};

use crate::ast::{Token, TokenKind};

fn offset(offset: Option<usize>) -> Value {
    match offset {
        Some(offset) => json!(offset),
        None => json!(-1),
    }
}

fn boxed(token: &Option<Box<Token>>) -> Value {
    token.as_deref().map_or(Value::Null, token_to_json)
}

fn payload(kind: &TokenKind) -> Value {
    match kind {
        TokenKind::Space(s)
        | TokenKind::Word(s)
        | TokenKind::QuotedString(s)
        | TokenKind::IncompleteQuotedString(s) => json!(s),
        TokenKind::CmpOp(op) => json!(op.name()),
        TokenKind::PinOp
        | TokenKind::PairOp
        | TokenKind::RangeOp
        | TokenKind::ContinuationOp
        | TokenKind::Wildcard
        | TokenKind::AnyChar
        | TokenKind::And
        | TokenKind::Or
        | TokenKind::Not => json!(true),
        TokenKind::Null | TokenKind::Infinity => Value::Null,
        TokenKind::Group(tokens)
        | TokenKind::IncompleteGroup(tokens)
        | TokenKind::List(tokens)
        | TokenKind::Partial(tokens) => forest_to_json(tokens),
        TokenKind::Pin(child) => {
            Value::Array(child.as_deref().map(token_to_json).into_iter().collect())
        }
        TokenKind::IncompletePin => json!([]),
        TokenKind::Cmp { op, value } => json!({ "op": op.name(), "value": boxed(value) }),
        TokenKind::Range { start, end } => json!({ "s": token_to_json(start), "e": boxed(end) }),
        TokenKind::Pair { key, value } => {
            json!({ "key": token_to_json(key), "value": token_to_json(value) })
        }
        TokenKind::IncompletePair { key, value } => {
            json!({ "key": boxed(key), "value": boxed(value) })
        }
    }
}

pub fn token_to_json(token: &Token) -> Value {
    let mut object = Map::new();
    object.insert("type".to_string(), json!(token.kind_name()));
    object.insert("index".to_string(), offset(token.index));
    object.insert(
        "pos".to_string(),
        json!([offset(token.span.start), offset(token.span.end)]),
    );
    object.insert("value".to_string(), payload(&token.kind));
    if token.is_error {
        object.insert("isError".to_string(), json!(true));
    }
    Value::Object(object)
}

pub fn forest_to_json(tokens: &[Token]) -> Value {
    Value::Array(tokens.iter().map(token_to_json).collect())
}

/// Compact JSON for a token forest.
pub fn to_json(tokens: &[Token]) -> String {
    forest_to_json(tokens).to_string()
}

/// JSON for a token forest, indented by two spaces.
pub fn to_json_pretty(tokens: &[Token]) -> String {
    // serializing a `Value` cannot fail
    serde_json::to_string_pretty(&forest_to_json(tokens)).unwrap_or_default()
}
