//! Headers command - inspect rate-limit headers from a response dump.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use ratewire_core::headers::parse_header_dump;
use ratewire_core::{ParseMode, ResponseMeta};
use tracing::{debug, info};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the headers command.
#[derive(clap::Args, Debug, Default)]
pub struct HeadersArgs {
    /// Header dump as written by `curl -D`. Reads stdin when omitted or `-`.
    pub file: Option<PathBuf>,
}

/// Runs the headers command.
pub fn run(args: &HeadersArgs, cli: &Cli) -> Result<()> {
    let text = read_input(args.file.as_ref())?;
    let meta = extract(&text, cli.strict)?;

    if !meta.has_data() {
        info!("No recognized response headers in input");
    }

    let now = Utc::now();
    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_meta(&meta, now));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_meta(&meta, now)?);
        }
    }

    Ok(())
}

/// Builds response metadata from a raw header dump.
///
/// In strict mode the first malformed value is an error; otherwise malformed
/// values are skipped.
pub fn extract(text: &str, strict: bool) -> Result<ResponseMeta> {
    let headers = parse_header_dump(text);
    debug!(count = headers.len(), strict, "Read header dump");

    if strict {
        Ok(ResponseMeta::try_from_headers(headers, ParseMode::Strict)?)
    } else {
        Ok(ResponseMeta::from_headers(headers))
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read header dump {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read header dump from stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratewire_core::CoreError;
    use std::io::Write;

    const DUMP: &str = "HTTP/1.1 200 OK\n\
                        x-ratelimit-remaining-requests: 59\n\
                        x-ratelimit-reset-requests: 1s (soon)\n";

    #[test]
    fn test_extract_lenient() {
        let meta = extract(DUMP, false).unwrap();
        assert_eq!(meta.rate_limit.remaining_requests, Some(59));
        assert_eq!(
            meta.rate_limit.reset_requests.map(|w| w.raw),
            Some("1s (soon)".to_string())
        );
    }

    #[test]
    fn test_extract_strict_fails() {
        let err = extract(DUMP, true).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::Format { .. })
        ));
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DUMP.as_bytes()).unwrap();

        let path = file.path().to_path_buf();
        let text = read_input(Some(&path)).unwrap();
        assert_eq!(text, DUMP);
    }

    #[test]
    fn test_read_input_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = read_input(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("missing.txt"));
    }
}
