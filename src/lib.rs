pub mod ast;
pub mod cli;
pub mod decoder;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod reclassify;

/// Grammar revision of the Artemis QL client tokenizer this crate follows.
pub const VERSION: &str = "2025.07.22";

pub use ast::{CmpOp, OPERATORS, Span, Token, TokenKind};
pub use decoder::{Decoder, decode_tokens};
pub use error::ParseError;
pub use lexer::{Lexer, Tokenized, tokenize};
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseOptions, Parsed, Parser, parse};
pub use reclassify::reclassify;
