//! Parse and check queries for the command line

use crate::{ParseOptions, Parser, Token, output::forest_to_json};

use super::CliError;

/// Which pipeline output `parse` prints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stage {
    /// Raw tokenizer output
    Tokens,
    /// Decoded token forest
    #[default]
    Decoded,
}

/// Options for the parse and check commands
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// The query to parse
    pub query: Option<String>,
    /// Which output to render
    pub stage: Stage,
    /// Indent the JSON printed by `parse`
    pub pretty: bool,
    pub parse: ParseOptions,
}

/// A token that needs the user's attention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    pub kind: &'static str,
    pub offset: Option<usize>,
    pub is_error: bool,
}

impl CheckReport {
    fn from_token(token: &Token) -> Self {
        CheckReport {
            kind: token.kind_name(),
            offset: token.index,
            is_error: token.is_error,
        }
    }
}

impl std::fmt::Display for CheckReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = if self.is_error { "malformed" } else { "incomplete" };
        match self.offset {
            Some(offset) => write!(f, "{} {} at offset {}", what, self.kind, offset),
            None => write!(f, "{} {}", what, self.kind),
        }
    }
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Query parsed with nothing left over and nothing incomplete
    Complete,
    /// Query parsed, but the user has more to type or fix
    Incomplete {
        problems: Vec<CheckReport>,
        /// Unread input, when tokenizing stopped early
        remainder: Option<String>,
    },
}

fn query(options: &QueryOptions) -> Result<&str, CliError> {
    options.query.as_deref().ok_or(CliError::NoInput)
}

/// Parse a query and render the chosen stage as JSON
pub fn execute_parse(options: &QueryOptions) -> Result<String, CliError> {
    let parsed = Parser::new(options.parse).parse(query(options)?)?;

    let tokens = match options.stage {
        Stage::Tokens => &parsed.tokens,
        Stage::Decoded => &parsed.decoded,
    };
    let value = forest_to_json(tokens);

    let json = if options.pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}

/// Check whether a query is complete
pub fn execute_check(options: &QueryOptions) -> Result<CheckResult, CliError> {
    let query = query(options)?;
    let parsed = Parser::new(options.parse).parse(query)?;

    if parsed.is_complete() {
        return Ok(CheckResult::Complete);
    }

    let problems = parsed
        .problems()
        .into_iter()
        .map(CheckReport::from_token)
        .collect();
    let remainder = (!parsed.is_fully_consumed()).then(|| query[parsed.consumed_end..].to_string());

    Ok(CheckResult::Incomplete {
        problems,
        remainder,
    })
}
