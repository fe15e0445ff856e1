use crate::base::error::CookieError;
use std::collections::HashSet;

fn all_errors() -> Vec<CookieError> {
    vec![
        CookieError::arity(2, 1),
        CookieError::type_mismatch(2, "Function", "String"),
        CookieError::validation("expires", "Date"),
        CookieError::decode("id", "bad escape"),
        CookieError::unavailable("no document"),
    ]
}

#[test]
fn test_codes_are_unique() {
    let codes: HashSet<i32> = all_errors().iter().map(|e| e.as_i32()).collect();
    assert_eq!(codes.len(), 5);
}

#[test]
fn test_codes_in_reserved_range() {
    // -1000 and below; higher negative codes belong to network errors.
    for err in all_errors() {
        assert!(err.as_i32() <= -1000);
    }
}

#[test]
fn test_kind_names() {
    let kinds: Vec<&str> = all_errors().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            "ArityError",
            "TypeError",
            "ValidationError",
            "DecodeError",
            "UnavailableError"
        ]
    );
}

#[test]
fn test_display_messages() {
    assert_eq!(
        CookieError::arity(2, 1).to_string(),
        "Too few parameters: expected 2, got 1"
    );
    assert_eq!(
        CookieError::type_mismatch(2, "Function", "Number").to_string(),
        "Parameter 2 should be Function type, got Number"
    );
    assert_eq!(
        CookieError::validation("secure", "Boolean").to_string(),
        "Invalid secure: expected Boolean"
    );
    assert_eq!(
        CookieError::decode("id", "truncated").to_string(),
        "Cannot unescape value of cookie \"id\": truncated"
    );
}
