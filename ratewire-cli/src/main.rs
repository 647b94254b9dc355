// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! ratewire CLI - inspect LLM API rate-limit headers from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Decode reset header values
//! ratewire parse 6m45s99ms 1h30m15s1ms
//!
//! # Reject values with trailing garbage
//! ratewire --strict parse "20s (approx)"
//!
//! # Inspect a saved response
//! curl -s -D headers.txt -o /dev/null https://api.openai.com/v1/models -H "Authorization: Bearer $KEY"
//! ratewire headers headers.txt
//!
//! # JSON output from stdin
//! curl -s -D - -o /dev/null ... | ratewire --format json --pretty headers
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use ratewire_core::{CoreError, FormatError, ParseMode};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{headers, parse};

// ============================================================================
// CLI Definition
// ============================================================================

/// ratewire CLI - rate-limit header inspection.
#[derive(Parser)]
#[command(name = "ratewire")]
#[command(about = "Decode LLM API rate-limit headers")]
#[command(long_about = r#"
ratewire decodes the rate-limit headers returned by OpenAI-style APIs.

Reset headers (x-ratelimit-reset-requests, x-ratelimit-reset-tokens) use a
compact duration format such as 6m45s99ms: optional hour, minute, second and
millisecond segments, in that order.

Examples:
  ratewire parse 6m45s99ms         # Decode one value
  ratewire headers dump.txt        # Inspect a curl -D header dump
  ratewire -f json headers -       # Read headers from stdin, JSON output
"#)]
#[command(version)]
#[command(author = "ratewire contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Reject timestamps with trailing content instead of ignoring it.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

impl Cli {
    /// Returns the parse mode selected by `--strict`.
    pub fn parse_mode(&self) -> ParseMode {
        if self.strict {
            ParseMode::Strict
        } else {
            ParseMode::Lenient
        }
    }
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Parse compact duration strings.
    #[command(visible_alias = "p")]
    Parse(parse::ParseArgs),

    /// Extract rate-limit metadata from an HTTP response header dump.
    #[command(visible_alias = "h")]
    Headers(headers::HeadersArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// General error.
    Error = 1,
    /// Parse error.
    ParseError = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    fn for_error(err: &anyhow::Error) -> Self {
        if err.downcast_ref::<FormatError>().is_some() || err.downcast_ref::<CoreError>().is_some() {
            Self::ParseError
        } else {
            Self::Error
        }
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("ratewire=debug,ratewire_core=debug,info")
    } else {
        EnvFilter::new("ratewire=warn,ratewire_core=warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Parse(args) => parse::run(args, &cli),
        Commands::Headers(args) => headers::run(args, &cli),
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(ExitCode::for_error(&e) as i32);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_strict_flag_selects_mode() {
        let cli = Cli::try_parse_from(["ratewire", "--strict", "parse", "1s"]).unwrap();
        assert_eq!(cli.parse_mode(), ParseMode::Strict);

        let cli = Cli::try_parse_from(["ratewire", "p", "1s", "--format", "json"]).unwrap();
        assert_eq!(cli.parse_mode(), ParseMode::Lenient);
        assert_eq!(cli.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_requires_timestamp() {
        assert!(Cli::try_parse_from(["ratewire", "parse"]).is_err());
    }

    #[test]
    fn test_exit_code_for_parse_errors() {
        let err = anyhow::Error::new(FormatError::Overflow {
            input: "1h".to_string(),
        });
        assert!(matches!(ExitCode::for_error(&err), ExitCode::ParseError));

        let err = anyhow::anyhow!("disk on fire");
        assert!(matches!(ExitCode::for_error(&err), ExitCode::Error));
    }
}
