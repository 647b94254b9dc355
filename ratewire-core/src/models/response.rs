//! Response metadata.
//!
//! [`ResponseMeta`] is the client-context record a response carries next to
//! its payload. It is built once from the response headers and not mutated
//! afterwards.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::rate_limit::{RateLimitInfo, ResetWindow};
use crate::duration::ParseMode;
use crate::error::CoreError;
use crate::headers;

/// Metadata extracted from an API response's headers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    /// Organization the request was billed to.
    pub organization: Option<String>,
    /// Server-assigned request identifier.
    pub request_id: Option<String>,
    /// API version that served the request.
    pub api_version: Option<String>,
    /// Server-side processing time in milliseconds.
    pub processing_ms: Option<u64>,
    /// Rate-limit counters and reset windows.
    #[serde(default)]
    pub rate_limit: RateLimitInfo,
}

impl ResponseMeta {
    /// Builds metadata from `(name, value)` header pairs, tolerating bad values.
    ///
    /// Header names match case-insensitively and unknown headers are
    /// ignored. A malformed counter or reset value is logged and skipped, so
    /// one broken header never loses the rest of the metadata. When a header
    /// repeats, the last well-formed occurrence wins.
    pub fn from_headers<I, K, V>(headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut meta = Self::default();
        for (name, value) in headers {
            if let Err(e) = meta.apply(name.as_ref(), value.as_ref(), ParseMode::Lenient) {
                warn!(error = %e, "Ignoring malformed response header");
            }
        }
        meta
    }

    /// Builds metadata from `(name, value)` header pairs, failing on the
    /// first malformed value.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidHeader`] for a non-numeric counter and
    /// [`CoreError::Format`] for a reset value that does not parse in `mode`.
    pub fn try_from_headers<I, K, V>(headers: I, mode: ParseMode) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut meta = Self::default();
        for (name, value) in headers {
            meta.apply(name.as_ref(), value.as_ref(), mode)?;
        }
        Ok(meta)
    }

    fn apply(&mut self, name: &str, value: &str, mode: ParseMode) -> Result<(), CoreError> {
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim();

        match name.as_str() {
            headers::ORGANIZATION => self.organization = non_empty(value),
            headers::REQUEST_ID => self.request_id = non_empty(value),
            headers::VERSION => self.api_version = non_empty(value),
            headers::PROCESSING_MS => self.processing_ms = Some(counter(&name, value)?),
            headers::LIMIT_REQUESTS => self.rate_limit.limit_requests = Some(counter(&name, value)?),
            headers::LIMIT_TOKENS => self.rate_limit.limit_tokens = Some(counter(&name, value)?),
            headers::REMAINING_REQUESTS => {
                self.rate_limit.remaining_requests = Some(counter(&name, value)?);
            }
            headers::REMAINING_TOKENS => {
                self.rate_limit.remaining_tokens = Some(counter(&name, value)?);
            }
            headers::RESET_REQUESTS => {
                self.rate_limit.reset_requests = Some(reset(&name, value, mode)?);
            }
            headers::RESET_TOKENS => {
                self.rate_limit.reset_tokens = Some(reset(&name, value, mode)?);
            }
            _ => return Ok(()),
        }

        debug!(header = %name, value, "Read response header");
        Ok(())
    }

    /// Returns the server processing time, if reported.
    pub fn processing_time(&self) -> Option<Duration> {
        self.processing_ms.map(Duration::from_millis)
    }

    /// Returns true if any field was populated.
    pub fn has_data(&self) -> bool {
        self.organization.is_some()
            || self.request_id.is_some()
            || self.api_version.is_some()
            || self.processing_ms.is_some()
            || self.rate_limit.has_data()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

fn counter(name: &str, value: &str) -> Result<u64, CoreError> {
    value.parse().map_err(|e: std::num::ParseIntError| CoreError::InvalidHeader {
        name: name.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn reset(name: &str, value: &str, mode: ParseMode) -> Result<ResetWindow, CoreError> {
    ResetWindow::parse(value, mode).map_err(|source| CoreError::Format {
        name: name.to_string(),
        source,
    })
}
