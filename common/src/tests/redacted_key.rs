use crate::RedactedApiKey;

/// **VALUE**: Verifies that the API key never appears in Debug or Display output.
///
/// **WHY THIS MATTERS**: Query parameters (which embed the key) are logged on every
/// emission. A leaking Debug impl would write the Marvel key into the log file.
///
/// **BUG THIS CATCHES**: Would catch a `#[derive(Debug)]` sneaking back onto the wrapper.
#[test]
fn given_api_key_when_formatted_then_value_is_redacted() {
    // GIVEN: A key
    let key = RedactedApiKey::new("0123456789abcdef");

    // WHEN: Formatting it both ways
    let debug = format!("{key:?}");
    let display = format!("{key}");

    // THEN: The raw value is in neither
    assert!(!debug.contains("0123456789abcdef"));
    assert!(!display.contains("0123456789abcdef"));
    assert!(debug.contains("REDACTED"));
}

#[test]
fn given_api_key_when_serialized_then_returns_error() {
    let key = RedactedApiKey::new("secret");

    let result = serde_json::to_string(&key);

    assert!(result.is_err(), "Serializing a redacted key must fail");
}

/// **VALUE**: Verifies structural equality on keys.
///
/// **WHY THIS MATTERS**: Parameter deduplication compares whole `QueryParams` values,
/// key included. Rotating the key must count as a new parameter set.
#[test]
fn given_keys_when_compared_then_equal_only_for_same_value() {
    assert_eq!(RedactedApiKey::new("a"), RedactedApiKey::new("a"));
    assert_ne!(RedactedApiKey::new("a"), RedactedApiKey::new("b"));
}

#[test]
fn given_blank_key_when_checked_then_is_empty() {
    assert!(RedactedApiKey::new("   ").is_empty());
    assert!(!RedactedApiKey::new("k").is_empty());
    assert_eq!(RedactedApiKey::new("abc").len(), 3);
}
