use thiserror::Error;

/// Failures that cannot be expressed as an incomplete token in the forest.
///
/// Unterminated strings, unclosed groups, dangling pins and the like are not
/// errors; they come back as `incomplete:*` tokens. These variants mean the
/// query should be rejected outright.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A list element was followed by something other than a comma, whitespace
    /// or the end of input (e.g. `a,b:c`, `a,>5`).
    #[error("list must be terminated by space or end of input (got {kind} at offset {offset})")]
    UnterminatedList { kind: &'static str, offset: usize },

    /// The decoder could not make progress while tokens were left.
    #[error("nothing to decode, but tokens are left (next token: {kind} at offset {offset})")]
    NoProgress { kind: &'static str, offset: usize },

    /// Groups or chained pairs nest deeper than the configured limit.
    #[error("nesting at offset {offset} exceeds the maximum depth of {max_depth}")]
    DepthExceeded { offset: usize, max_depth: usize },
}

impl ParseError {
    /// Byte offset of the token that caused the failure.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnterminatedList { offset, .. }
            | ParseError::NoProgress { offset, .. }
            | ParseError::DepthExceeded { offset, .. } => *offset,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
