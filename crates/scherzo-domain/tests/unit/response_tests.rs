//! Response Tests

use scherzo_domain::value_objects::Response;
use serde_json::{Value, json};

#[test]
fn test_text_response() {
    let response = Response::text("Hello");

    assert_eq!(response.status, 200);
    assert_eq!(response.body, "Hello");
    assert_eq!(
        response.header("content-type"),
        Some("text/plain; charset=utf-8")
    );
    assert!(response.is_success());
}

#[test]
fn test_not_found_names_path() {
    let response = Response::not_found(Some("/missing"));
    assert_eq!(response.status, 404);
    assert_eq!(response.body, "Not Found \"/missing\"");

    assert_eq!(Response::not_found(None).body, "Not Found");
    assert!(!Response::not_found(None).is_success());
}

#[test]
fn test_json_response_is_pretty() {
    let response = Response::json(&json!({ "a": 1 }), 201).unwrap();

    assert_eq!(response.status, 201);
    assert_eq!(response.body, "{\n  \"a\": 1\n}");
    assert_eq!(response.header("Content-Type"), Some("application/json"));
}

#[test]
fn test_error_lifts_message() {
    let response = Response::error(json!({ "message": "Bad input", "field": "name" }), 422).unwrap();
    let body: Value = serde_json::from_str(&response.body).unwrap();

    assert_eq!(response.status, 422);
    assert_eq!(body["error"], "Bad input");
    assert_eq!(body["errors"], json!({ "field": "name" }));
}

#[test]
fn test_error_without_message_uses_generic_text() {
    let response = Response::error(json!({}), 500).unwrap();
    let body: Value = serde_json::from_str(&response.body).unwrap();

    assert_eq!(body["error"], "Error");
    assert_eq!(body["errors"], json!({}));
}

#[test]
fn test_error_with_string_body() {
    let response = Response::error(json!("plain failure"), 503).unwrap();

    assert_eq!(response.status, 503);
    assert_eq!(response.body, "plain failure");
}

#[test]
fn test_error_with_array_body() {
    let response = Response::error(json!(["a", "b"]), 400).unwrap();
    let body: Value = serde_json::from_str(&response.body).unwrap();

    assert_eq!(body["error"], "Error");
    assert_eq!(body["errors"], json!(["a", "b"]));
}
