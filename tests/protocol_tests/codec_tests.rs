//! Codec Tests
//!
//! Tests for command encoding and response decoding.

use serde_json::{json, Value};
use tinykv::protocol::{decode_response, encode_command, Command, CommandType, EndKeyEncoding, Response};
use tinykv::KvError;

fn encode(command: &Command) -> Value {
    let bytes = encode_command(command, EndKeyEncoding::Raw).unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Command Encoding Tests
// =============================================================================

#[test]
fn test_encode_put() {
    let encoded = encode(&Command::put("default", "name", "Alice"));
    assert_eq!(
        encoded,
        json!({
            "type": "Put",
            "cf": "default",
            "key": [110, 97, 109, 101],
            "value": [65, 108, 105, 99, 101]
        })
    );
}

#[test]
fn test_encode_get() {
    let encoded = encode(&Command::get("users", "k1"));
    assert_eq!(encoded, json!({"type": "Get", "cf": "users", "key": [107, 49]}));
}

#[test]
fn test_encode_delete() {
    let encoded = encode(&Command::delete("default", "age"));
    assert_eq!(encoded, json!({"type": "Delete", "cf": "default", "key": [97, 103, 101]}));
}

#[test]
fn test_encode_scan_with_end_key() {
    let encoded = encode(&Command::scan("default", "k1", Some(b"k4".to_vec()), 10));
    assert_eq!(
        encoded,
        json!({
            "type": "Scan",
            "cf": "default",
            "start_key": [107, 49],
            "end_key": [107, 52],
            "limit": 10
        })
    );
}

#[test]
fn test_encode_scan_without_end_key_omits_field() {
    let encoded = encode(&Command::scan("default", "k1", None, 5));
    let obj = encoded.as_object().unwrap();
    assert!(!obj.contains_key("end_key"));
    assert_eq!(obj["limit"], json!(5));
}

#[test]
fn test_encode_scan_base64_wrapped_end_key() {
    let command = Command::scan("default", "key1", Some(b"key4".to_vec()), 10);
    let bytes = encode_command(&command, EndKeyEncoding::Base64Wrapped).unwrap();
    let encoded: Value = serde_json::from_slice(&bytes).unwrap();

    // "a2V5NA==" is base64("key4")
    let expected: Vec<Value> = b"a2V5NA==".iter().map(|&b| json!(b)).collect();
    assert_eq!(encoded["end_key"], Value::Array(expected));
    // start_key is never wrapped
    assert_eq!(encoded["start_key"], json!([107, 101, 121, 49]));
}

#[test]
fn test_encode_fieldless_commands() {
    assert_eq!(encode(&Command::info()), json!({"type": "Info"}));
    assert_eq!(encode(&Command::flush()), json!({"type": "Flush"}));
    assert_eq!(encode(&Command::compact()), json!({"type": "Compact"}));
}

#[test]
fn test_encode_omits_unset_optional_fields() {
    let command = Command::Scan {
        cf: None,
        start_key: None,
        end_key: None,
        limit: None,
    };
    assert_eq!(encode(&command), json!({"type": "Scan"}));

    let command = Command::Get {
        cf: None,
        key: b"k".to_vec(),
    };
    assert_eq!(encode(&command), json!({"type": "Get", "key": [107]}));
}

#[test]
fn test_encode_empty_key_is_sent() {
    let encoded = encode(&Command::get("default", ""));
    assert_eq!(encoded["key"], json!([]));
}

// =============================================================================
// Wire Format Verification Tests
// =============================================================================

#[test]
fn test_wire_format_has_no_framing() {
    let bytes = encode_command(&Command::info(), EndKeyEncoding::Raw).unwrap();
    assert_eq!(bytes, br#"{"type":"Info"}"#);
}

#[test]
fn test_wire_format_get() {
    let bytes = encode_command(&Command::get("cf", "ab"), EndKeyEncoding::Raw).unwrap();
    assert_eq!(bytes, br#"{"type":"Get","cf":"cf","key":[97,98]}"#);
}

// =============================================================================
// Response Decoding Tests
// =============================================================================

#[test]
fn test_decode_value_response() {
    let response = decode_response(br#"{"Value":[118,49]}"#).unwrap();
    assert_eq!(response, Response::Value(json!([118, 49])));
}

#[test]
fn test_decode_null_value_is_ack() {
    let response = decode_response(br#"{"Value":null}"#).unwrap();
    assert_eq!(response, Response::Ack);
}

#[test]
fn test_decode_bare_ok() {
    assert_eq!(decode_response(br#""Ok""#).unwrap(), Response::Ack);
}

#[test]
fn test_decode_empty_object() {
    assert_eq!(decode_response(b"{}").unwrap(), Response::Ack);
}

#[test]
fn test_decode_lowercase_error() {
    let response = decode_response(br#"{"error":"boom"}"#).unwrap();
    assert_eq!(response, Response::Error("boom".to_string()));
}

#[test]
fn test_decode_capitalized_error() {
    let response = decode_response(br#"{"Error":"boom"}"#).unwrap();
    assert_eq!(response.error(), Some("boom"));
}

#[test]
fn test_decode_error_takes_precedence() {
    let response = decode_response(br#"{"Value":[1],"error":"boom"}"#).unwrap();
    assert_eq!(response, Response::Error("boom".to_string()));
}

#[test]
fn test_decode_empty_error_ignored() {
    let response = decode_response(br#"{"Value":[1],"error":""}"#).unwrap();
    assert_eq!(response, Response::Value(json!([1])));
}

#[test]
fn test_decode_error_wins_over_malformed_info() {
    let response = decode_response(br#"{"error":"boom","Info":"x"}"#).unwrap();
    assert_eq!(response, Response::Error("boom".to_string()));

    let err = response.into_info().unwrap_err();
    match err {
        KvError::Operation { op, message } => {
            assert_eq!(op, CommandType::Info);
            assert_eq!(message, "boom");
        }
        other => panic!("Expected Operation error, got {:?}", other),
    }
}

#[test]
fn test_decode_both_error_keys() {
    let response = decode_response(br#"{"error":"boom","Error":"boom"}"#).unwrap();
    assert_eq!(response, Response::Error("boom".to_string()));

    // An empty lowercase key falls through to the capitalized one
    let response = decode_response(br#"{"error":"","Error":"disk full"}"#).unwrap();
    assert_eq!(response.error(), Some("disk full"));
}

#[test]
fn test_decode_non_string_error() {
    let err = decode_response(br#"{"error":5}"#).unwrap_err();
    assert!(matches!(err, KvError::Decode(_)));
}

#[test]
fn test_decode_info_response() {
    let response =
        decode_response(br#"{"Info":{"total_keys":3,"column_families":["default"]}}"#).unwrap();
    match response {
        Response::Info(map) => assert_eq!(map["total_keys"], json!(3)),
        other => panic!("Expected Info, got {:?}", other),
    }
}

#[test]
fn test_decode_ignores_unknown_fields() {
    let response = decode_response(br#"{"Values":[],"extra":1}"#).unwrap();
    assert_eq!(response, Response::Values(json!([])));
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_decode_malformed_json() {
    let err = decode_response(br#"{"Value":[1,2"#).unwrap_err();
    assert!(matches!(err, KvError::Decode(_)));
}

#[test]
fn test_decode_trailing_data() {
    // Two messages in one read cannot be told apart
    let err = decode_response(br#""Ok""Ok""#).unwrap_err();
    assert!(matches!(err, KvError::Decode(_)));
}

#[test]
fn test_decode_unexpected_string() {
    let err = decode_response(br#""Nope""#).unwrap_err();
    assert!(err.to_string().contains("unexpected response"));
}

#[test]
fn test_decode_non_object_info() {
    let err = decode_response(br#"{"Info":[1,2]}"#).unwrap_err();
    assert!(matches!(err, KvError::Decode(_)));
}

#[test]
fn test_command_type_names() {
    assert_eq!(Command::put("a", "b", "c").command_type(), CommandType::Put);
    assert_eq!(CommandType::Scan.to_string(), "Scan");
    assert_eq!(
        Command::scan("default", "k1", None, 3).to_string(),
        "Scan(cf: default, start_key: k1, end_key: None, limit: 3)"
    );
}
