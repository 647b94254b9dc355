//! Response header names and raw header dump parsing.

/// Organization the request was billed to.
pub const ORGANIZATION: &str = "openai-organization";
/// Server-assigned request identifier.
pub const REQUEST_ID: &str = "x-request-id";
/// Server-side processing time in milliseconds.
pub const PROCESSING_MS: &str = "openai-processing-ms";
/// API version that served the request.
pub const VERSION: &str = "openai-version";
/// Request quota for the current window.
pub const LIMIT_REQUESTS: &str = "x-ratelimit-limit-requests";
/// Token quota for the current window.
pub const LIMIT_TOKENS: &str = "x-ratelimit-limit-tokens";
/// Requests left in the current window.
pub const REMAINING_REQUESTS: &str = "x-ratelimit-remaining-requests";
/// Tokens left in the current window.
pub const REMAINING_TOKENS: &str = "x-ratelimit-remaining-tokens";
/// Time until the request quota resets, as a compact duration.
pub const RESET_REQUESTS: &str = "x-ratelimit-reset-requests";
/// Time until the token quota resets, as a compact duration.
pub const RESET_TOKENS: &str = "x-ratelimit-reset-tokens";

/// Every header [`crate::ResponseMeta`] reads.
pub const ALL: [&str; 10] = [
    ORGANIZATION,
    REQUEST_ID,
    PROCESSING_MS,
    VERSION,
    LIMIT_REQUESTS,
    LIMIT_TOKENS,
    REMAINING_REQUESTS,
    REMAINING_TOKENS,
    RESET_REQUESTS,
    RESET_TOKENS,
];

/// Splits a raw HTTP response header dump (as written by `curl -D`) into
/// `(name, value)` pairs.
///
/// Status lines, blank lines and lines without a colon are skipped. Names are
/// lowercased, names and values are trimmed. When the dump holds several
/// responses (redirects, `100 Continue`), only the headers of the last one
/// are returned.
pub fn parse_header_dump(text: &str) -> Vec<(String, String)> {
    let mut headers = Vec::new();

    for line in text.lines() {
        let line = line.trim_end_matches('\r');
        if line.starts_with("HTTP/") {
            headers.clear();
            continue;
        }
        let Some((name, value)) = line.split_once(':') else {
            continue;
        };
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        headers.push((name.to_ascii_lowercase(), value.trim().to_string()));
    }

    headers
}
