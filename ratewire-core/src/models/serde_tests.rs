//! Serde serialization/deserialization tests for model types.
//!
//! These tests pin the JSON shape the CLI and downstream consumers rely on.

use std::time::Duration;

use serde_json::json;

use crate::{CompactDuration, ParseMode, RateLimitInfo, ResetWindow, ResponseMeta};

// ============================================================================
// ResetWindow Serde Tests
// ============================================================================

#[test]
fn test_reset_window_serializes_millis() {
    let window = ResetWindow::parse("6m45s99ms", ParseMode::Lenient).unwrap();
    let value = serde_json::to_value(&window).unwrap();
    assert_eq!(value, json!({ "raw": "6m45s99ms", "durationMs": 405_099 }));
}

#[test]
fn test_reset_window_roundtrip() {
    let window = ResetWindow::parse("1h30m15s1ms", ParseMode::Strict).unwrap();
    let json = serde_json::to_string(&window).unwrap();
    let deserialized: ResetWindow = serde_json::from_str(&json).unwrap();
    assert_eq!(deserialized, window);
}

#[test]
fn test_reset_window_rejects_negative_millis() {
    let result: Result<ResetWindow, _> =
        serde_json::from_str(r#"{"raw": "1s", "durationMs": -1}"#);
    assert!(result.is_err());
}

// ============================================================================
// RateLimitInfo / ResponseMeta Serde Tests
// ============================================================================

#[test]
fn test_rate_limit_info_camel_case() {
    let info = RateLimitInfo {
        limit_requests: Some(5000),
        remaining_requests: Some(4999),
        ..RateLimitInfo::default()
    };
    let value = serde_json::to_value(&info).unwrap();
    assert_eq!(value["limitRequests"], 5000);
    assert_eq!(value["remainingRequests"], 4999);
    assert!(value["resetTokens"].is_null());
}

#[test]
fn test_response_meta_roundtrip() {
    let meta = ResponseMeta::from_headers([
        ("openai-organization", "acme-research"),
        ("x-request-id", "req_1"),
        ("openai-processing-ms", "87"),
        ("x-ratelimit-reset-requests", "500ms"),
        ("x-ratelimit-reset-tokens", "10m"),
    ]);

    let json = serde_json::to_string(&meta).unwrap();
    let deserialized: ResponseMeta = serde_json::from_str(&json).unwrap();

    assert_eq!(deserialized, meta);
    assert_eq!(
        deserialized.rate_limit.reset_tokens.map(|w| w.duration),
        Some(Duration::from_secs(600))
    );
}

#[test]
fn test_response_meta_missing_rate_limit_defaults() {
    let meta: ResponseMeta = serde_json::from_str(r#"{"requestId": "req_2"}"#).unwrap();
    assert_eq!(meta.request_id.as_deref(), Some("req_2"));
    assert!(!meta.rate_limit.has_data());
}

// ============================================================================
// CompactDuration / ParseMode Serde Tests
// ============================================================================

#[test]
fn test_compact_duration_fields() {
    let parsed = CompactDuration::parse("2h5s").unwrap();
    let value = serde_json::to_value(parsed).unwrap();
    assert_eq!(value, json!({ "hours": 2, "minutes": 0, "seconds": 5, "millis": 0 }));
}

#[test]
fn test_parse_mode_lowercase() {
    let test_cases = vec![
        (r#""lenient""#, ParseMode::Lenient),
        (r#""strict""#, ParseMode::Strict),
    ];

    for (json, expected) in test_cases {
        let result: ParseMode = serde_json::from_str(json).unwrap();
        assert_eq!(result, expected, "Failed for {json}");
        assert_eq!(serde_json::to_string(&expected).unwrap(), json);
    }
}

#[test]
fn test_parse_mode_invalid() {
    let result: Result<ParseMode, _> = serde_json::from_str(r#""pedantic""#);
    assert!(result.is_err());
}
