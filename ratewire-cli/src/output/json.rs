//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use ratewire_core::{CompactDuration, ResponseMeta};
use serde::{Serialize, Serializer};

use crate::commands::parse::ParseOutcome;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one parsed timestamp.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimestampOutput {
    pub input: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<CompactDuration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// JSON output for the headers command.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadersOutput<'a> {
    #[serde(flatten)]
    pub meta: &'a ResponseMeta,
    pub limited: bool,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_datetime_opt")]
    pub requests_reset_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_datetime_opt")]
    pub tokens_reset_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Serialization helpers
// ============================================================================

fn serialize_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&dt.to_rfc3339()),
        None => s.serialize_none(),
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats parse results as an array, one entry per input.
    pub fn format_parse_outcomes(&self, outcomes: &[ParseOutcome]) -> Result<String> {
        let outputs: Vec<TimestampOutput> = outcomes.iter().map(Self::outcome_to_output).collect();
        self.format(&outputs)
    }

    fn outcome_to_output(outcome: &ParseOutcome) -> TimestampOutput {
        match &outcome.result {
            Ok(parsed) => TimestampOutput {
                input: outcome.input.clone(),
                segments: Some(parsed.segments),
                total_ms: Some(u64::try_from(parsed.duration.as_millis()).unwrap_or(u64::MAX)),
                error: None,
            },
            Err(e) => TimestampOutput {
                input: outcome.input.clone(),
                segments: None,
                total_ms: None,
                error: Some(e.to_string()),
            },
        }
    }

    /// Formats response metadata with absolute reset instants relative to `now`.
    pub fn format_meta(&self, meta: &ResponseMeta, now: DateTime<Utc>) -> Result<String> {
        let output = HeadersOutput {
            meta,
            limited: meta.rate_limit.is_limited(),
            requests_reset_at: meta.rate_limit.requests_reset_at(now),
            tokens_reset_at: meta.rate_limit.tokens_reset_at(now),
        };
        self.format(&output)
    }
}
