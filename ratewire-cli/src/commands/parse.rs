//! Parse command - decode compact duration strings.

use std::time::Duration;

use anyhow::Result;
use ratewire_core::{CompactDuration, FormatError, ParseMode};
use tracing::{debug, warn};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the parse command.
#[derive(clap::Args, Debug, Default)]
pub struct ParseArgs {
    /// Timestamps to parse, e.g. `6m45s99ms` or `1h30m`.
    #[arg(required = true)]
    pub timestamps: Vec<String>,
}

/// A successfully parsed timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTimestamp {
    /// Segment breakdown as written.
    pub segments: CompactDuration,
    /// Combined interval.
    pub duration: Duration,
}

/// The result of parsing one command-line argument.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The argument exactly as given.
    pub input: String,
    /// Parsed value or the parse failure.
    pub result: Result<ParsedTimestamp, FormatError>,
}

impl ParseOutcome {
    /// Parses `input` in the given mode.
    pub fn evaluate(input: &str, mode: ParseMode) -> Self {
        let result = CompactDuration::parse_with(input, mode).and_then(|segments| {
            let duration = segments.try_to_duration().ok_or_else(|| FormatError::Overflow {
                input: input.to_string(),
            })?;
            Ok(ParsedTimestamp { segments, duration })
        });

        Self {
            input: input.to_string(),
            result,
        }
    }
}

/// Runs the parse command.
pub fn run(args: &ParseArgs, cli: &Cli) -> Result<()> {
    let mode = cli.parse_mode();
    debug!(count = args.timestamps.len(), ?mode, "Parsing timestamps");

    let outcomes: Vec<ParseOutcome> = args
        .timestamps
        .iter()
        .map(|input| ParseOutcome::evaluate(input, mode))
        .collect();

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            for outcome in &outcomes {
                println!("{}", formatter.format_parse_outcome(outcome));
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_parse_outcomes(&outcomes)?);
        }
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        warn!(failed, "Some timestamps could not be parsed");
        std::process::exit(ExitCode::ParseError as i32);
    }

    Ok(())
}
