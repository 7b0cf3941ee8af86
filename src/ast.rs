//! # Artemis QL - Tokens
//!
//! Every stage of the pipeline speaks in [`Token`]s: the tokenizer produces
//! primitive ones, the reclassifier promotes keywords and pins, and the
//! decoder folds them into composites (comparisons, ranges, pairs, lists,
//! partials). A single closed [`TokenKind`] enum covers all of them.
//!
//! - **[tokens]** - [`Token`], [`TokenKind`] and [`Span`]
//! - **[operators]** - comparison operators
//!
//! ## Query shapes
//!
//! ```text
//! status:active                  pair
//! age:>=18                       pair holding a comparison
//! 10..20   10..   ..20           ranges, omitted bounds are infinity
//! tags:a,b,c                     pair holding a list
//! (x OR y) NOT z                 group, keywords
//! ^"pinned value"                pin
//! abc*def?                       partial
//! ```
//!
//! ## Offsets
//!
//! `index` and `span` are byte offsets into the original input. Composite
//! tokens span from their first consumed child to their last one.
pub mod operators;
pub mod tokens;

pub use operators::{CmpOp, OPERATORS};
pub use tokens::{Span, Token, TokenKind};
