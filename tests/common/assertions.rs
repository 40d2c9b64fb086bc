//! Response assertions
//!
//! Error bodies are either `{"msg": ...}` or `{"errors": [{"field", "msg"}]}`.

use axum::http::StatusCode;
use axum_test::TestResponse;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

/// Assert a `{"msg": ...}` error body with the given status
pub fn assert_msg(response: &TestResponse, status: StatusCode, msg: &str) {
    assert_eq!(response.status_code(), status, "body: {}", response.text());
    assert_eq!(response.json::<Value>(), json!({ "msg": msg }));
}

/// Assert a 400 validation body and return the offending field names in order
pub fn validation_fields(response: &TestResponse) -> Vec<String> {
    assert_eq!(
        response.status_code(),
        StatusCode::BAD_REQUEST,
        "body: {}",
        response.text()
    );
    response.json::<Value>()["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .filter_map(|e| e["field"].as_str().map(str::to_string))
        .collect()
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}
