//! CLI command implementations.

pub mod headers;
pub mod parse;
