//! Core error types for `ratewire`.

use std::num::ParseIntError;

use thiserror::Error;

/// Error returned when a compact duration string cannot be parsed.
///
/// Every variant carries the offending input verbatim so callers can report
/// exactly what the server sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// A segment's digit run does not fit in a `u64`.
    #[error("Malformed timestamp {input:?}: segment out of range: {source}")]
    OutOfRange {
        /// The raw timestamp.
        input: String,
        /// The underlying integer parse failure.
        source: ParseIntError,
    },

    /// The segments parsed, but their sum does not fit in a duration.
    #[error("Malformed timestamp {input:?}: duration overflow")]
    Overflow {
        /// The raw timestamp.
        input: String,
    },

    /// Strict mode only: content remained after the last recognized segment.
    #[error("Malformed timestamp {input:?}: unexpected trailing input {remainder:?}")]
    TrailingInput {
        /// The raw timestamp.
        input: String,
        /// The unmatched tail.
        remainder: String,
    },
}

impl FormatError {
    /// Returns the original, unmodified input that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::OutOfRange { input, .. }
            | Self::Overflow { input }
            | Self::TrailingInput { input, .. } => input,
        }
    }
}

/// Core error type for `ratewire` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A response header carried a value that could not be interpreted.
    #[error("Invalid header {name}: {value:?} ({reason})")]
    InvalidHeader {
        /// Header name, lowercased.
        name: String,
        /// Raw header value.
        value: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A reset header carried a malformed compact duration.
    #[error("Invalid reset header {name}: {source}")]
    Format {
        /// Header name, lowercased.
        name: String,
        /// The parse failure.
        #[source]
        source: FormatError,
    },
}
