//! Rate-limit types.
//!
//! This module contains the quota counters and reset windows reported by
//! rate-limit response headers:
//! - [`RateLimitInfo`] - Request and token counters with their reset windows
//! - [`ResetWindow`] - A reset header in raw and parsed form

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::duration::{parse_compact_duration_with, ParseMode};
use crate::error::FormatError;

// ============================================================================
// Reset Window
// ============================================================================

/// Time until a quota refills, as sent by the server and as parsed.
///
/// Callers that only log the header can use [`ResetWindow::raw`]; callers
/// that schedule retries use [`ResetWindow::duration`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetWindow {
    /// The header value exactly as received.
    pub raw: String,
    /// Parsed interval until reset.
    #[serde(rename = "durationMs", with = "duration_ms")]
    pub duration: Duration,
}

impl ResetWindow {
    /// Parses a reset header value.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if `raw` is not a valid compact duration in
    /// the given mode.
    pub fn parse(raw: &str, mode: ParseMode) -> Result<Self, FormatError> {
        let duration = parse_compact_duration_with(raw, mode)?;
        Ok(Self {
            raw: raw.to_string(),
            duration,
        })
    }

    /// Returns the instant the quota resets, counting from `now`.
    pub fn resets_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let delta = chrono::Duration::from_std(self.duration).ok()?;
        now.checked_add_signed(delta)
    }

    /// Returns the reset interval in whole milliseconds, saturating.
    pub fn as_millis(&self) -> u64 {
        u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        serializer.serialize_u64(millis)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

// ============================================================================
// Rate Limit Info
// ============================================================================

/// Quota counters and reset windows from one response.
///
/// Every field is optional: providers omit headers freely, and malformed
/// values may have been dropped during lenient extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    pub limit_requests: Option<u64>,
    /// Maximum tokens allowed in the current window.
    pub limit_tokens: Option<u64>,
    /// Requests left before the limit is hit.
    pub remaining_requests: Option<u64>,
    /// Tokens left before the limit is hit.
    pub remaining_tokens: Option<u64>,
    /// When the request quota refills.
    pub reset_requests: Option<ResetWindow>,
    /// When the token quota refills.
    pub reset_tokens: Option<ResetWindow>,
}

impl RateLimitInfo {
    /// Returns true if any counter or reset window is present.
    pub fn has_data(&self) -> bool {
        self.limit_requests.is_some()
            || self.limit_tokens.is_some()
            || self.remaining_requests.is_some()
            || self.remaining_tokens.is_some()
            || self.reset_requests.is_some()
            || self.reset_tokens.is_some()
    }

    /// Returns true if the server reported zero requests remaining.
    pub fn requests_exhausted(&self) -> bool {
        self.remaining_requests == Some(0)
    }

    /// Returns true if the server reported zero tokens remaining.
    pub fn tokens_exhausted(&self) -> bool {
        self.remaining_tokens == Some(0)
    }

    /// Returns true if either quota is exhausted.
    pub fn is_limited(&self) -> bool {
        self.requests_exhausted() || self.tokens_exhausted()
    }

    /// Returns the percentage of the request quota used, if both counters are known.
    pub fn requests_used_percent(&self) -> Option<f64> {
        used_percent(self.limit_requests?, self.remaining_requests?)
    }

    /// Returns the percentage of the token quota used, if both counters are known.
    pub fn tokens_used_percent(&self) -> Option<f64> {
        used_percent(self.limit_tokens?, self.remaining_tokens?)
    }

    /// Returns whichever reset window elapses first.
    pub fn next_reset(&self) -> Option<&ResetWindow> {
        match (&self.reset_requests, &self.reset_tokens) {
            (Some(r), Some(t)) => Some(if t.duration < r.duration { t } else { r }),
            (Some(r), None) => Some(r),
            (None, Some(t)) => Some(t),
            (None, None) => None,
        }
    }

    /// Returns when the request quota resets, counting from `now`.
    pub fn requests_reset_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.reset_requests.as_ref().and_then(|w| w.resets_at(now))
    }

    /// Returns when the token quota resets, counting from `now`.
    pub fn tokens_reset_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.reset_tokens.as_ref().and_then(|w| w.resets_at(now))
    }
}

#[allow(clippy::cast_precision_loss)]
fn used_percent(limit: u64, remaining: u64) -> Option<f64> {
    if limit == 0 {
        return None;
    }
    let used = limit.saturating_sub(remaining);
    Some((used as f64 / limit as f64 * 100.0).clamp(0.0, 100.0))
}
