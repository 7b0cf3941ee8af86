use artemis_ql::cli::{self, CheckResult, CliError, QueryOptions, Stage};
use artemis_ql::{ParseOptions, lexer::DEFAULT_MAX_DEPTH};
use clap::{Parser as ClapParser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "artemis")]
#[command(about = "Artemis QL - tokenize and decode search queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the decoded token forest of a query as JSON
    Parse {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Print the raw tokenizer output instead of the decoded forest
        #[arg(long)]
        tokens: bool,

        /// Deepest allowed nesting of groups and chained pairs
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },

    /// Report whether a query is complete
    Check {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Deepest allowed nesting of groups and chained pairs
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse {
            query,
            pretty,
            tokens,
            max_depth,
        } => run_parse(query, pretty, tokens, max_depth),
        Commands::Check { query, max_depth } => run_check(query, max_depth),
    };

    match result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn read_query(query: Option<String>) -> Result<Option<String>, CliError> {
    match query {
        Some(q) => Ok(Some(q)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer.trim_end_matches(['\r', '\n']).to_string()))
        }
        None => Ok(None),
    }
}

fn run_parse(
    query: Option<String>,
    pretty: bool,
    tokens: bool,
    max_depth: usize,
) -> Result<bool, CliError> {
    let options = QueryOptions {
        query: read_query(query)?,
        stage: if tokens { Stage::Tokens } else { Stage::Decoded },
        pretty,
        parse: ParseOptions { max_depth },
    };

    println!("{}", cli::execute_parse(&options)?);
    Ok(true)
}

fn run_check(query: Option<String>, max_depth: usize) -> Result<bool, CliError> {
    let options = QueryOptions {
        query: read_query(query)?,
        parse: ParseOptions { max_depth },
        ..QueryOptions::default()
    };

    match cli::execute_check(&options)? {
        CheckResult::Complete => {
            println!("Query is complete");
            Ok(true)
        }
        CheckResult::Incomplete {
            problems,
            remainder,
        } => {
            for problem in &problems {
                println!("{}", problem);
            }
            if let Some(rest) = remainder {
                println!("unread input: {:?}", rest);
            }
            Ok(false)
        }
    }
}
