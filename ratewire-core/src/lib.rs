// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `ratewire` Core
//!
//! Parsing and modelling of LLM API rate-limit response headers.
//!
//! The centre of the crate is the compact duration parser, which turns reset
//! header values such as `6m45s99ms` into a [`std::time::Duration`]. Around
//! it sit the response metadata types that carry those durations together
//! with the other client-context headers.
//!
//! ## Key Types
//!
//! ### Parsing
//! - [`parse_compact_duration`] - Parse a compact duration string
//! - [`CompactDuration`] - Segment breakdown (hours, minutes, seconds, millis)
//! - [`ParseMode`] - Lenient or strict handling of trailing input
//! - [`FormatError`] - Parse failure carrying the offending input
//!
//! ### Response Metadata
//! - [`ResponseMeta`] - Organization, request id, processing time, rate limits
//! - [`RateLimitInfo`] - Request/token counters and reset windows
//! - [`ResetWindow`] - A reset header in raw and parsed form
//! - [`headers`] - Header names and raw header dump parsing

pub mod duration;
pub mod error;
pub mod headers;
pub mod models;

// Re-export error types
pub use error::{CoreError, FormatError};

// Re-export the parser
pub use duration::{parse_compact_duration, parse_compact_duration_with, CompactDuration, ParseMode};

// Re-export all model types
pub use models::{RateLimitInfo, ResetWindow, ResponseMeta};
