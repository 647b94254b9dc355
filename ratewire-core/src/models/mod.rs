//! Domain models for ratewire.
//!
//! ## Submodules
//!
//! - [`rate_limit`] - Quota counters and reset windows (`RateLimitInfo`, `ResetWindow`)
//! - [`response`] - Per-response client context (`ResponseMeta`)

mod rate_limit;
mod response;

// Re-export everything at the models level
pub use rate_limit::{RateLimitInfo, ResetWindow};
pub use response::ResponseMeta;
#[cfg(test)]
mod serde_tests;
