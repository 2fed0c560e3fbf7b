//! Tolerant JSON extraction from service output.
//!
//! The Text Analysis Service is instructed to answer with bare JSON but may
//! still wrap the object in explanatory prose. Extraction scans from the
//! first `{` tracking string/escape state and brace depth, and parses the
//! first balanced object span. Braces inside JSON string values do not
//! terminate the span.

use thiserror::Error;

/// Why no JSON object could be recovered from a response.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpanError {
    #[error("no JSON object found in response")]
    NoObject,

    #[error("unterminated JSON object in response")]
    Unterminated,

    #[error("invalid JSON object: {0}")]
    Invalid(String),
}

/// Extract and parse the first balanced `{...}` span in `raw`.
pub fn extract_json_object(raw: &str) -> Result<serde_json::Value, SpanError> {
    let start = raw.find('{').ok_or(SpanError::NoObject)?;
    let bytes = raw.as_bytes();

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut end = None;

    for (i, &byte) in bytes.iter().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    end = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }

    let end = end.ok_or(SpanError::Unterminated)?;
    serde_json::from_str(&raw[start..=end]).map_err(|e| SpanError::Invalid(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_bare_object() {
        let value = extract_json_object(r#"{"a":1}"#).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_wrapper_prose_is_stripped() {
        let raw = "Here is the result:\n{\"a\":1}\nThanks!";
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value, json!({"a": 1}));
    }

    #[test]
    fn test_no_braces_is_no_object() {
        assert_eq!(
            extract_json_object("nothing structured here"),
            Err(SpanError::NoObject)
        );
    }

    #[test]
    fn test_unterminated_object() {
        assert_eq!(
            extract_json_object(r#"prefix {"a": 1"#),
            Err(SpanError::Unterminated)
        );
    }

    #[test]
    fn test_nested_objects() {
        let raw = r#"result: {"outer": {"inner": 2}} done"#;
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value, json!({"outer": {"inner": 2}}));
    }

    #[test]
    fn test_braces_inside_string_values() {
        // A naive first-{ / last-} slice fails on this input.
        let raw = r#"{"note": "literal } and { inside"} trailing } noise"#;
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value, json!({"note": "literal } and { inside"}));
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let raw = r#"{"note": "he said \"hi\" {"} rest"#;
        let value = extract_json_object(raw).unwrap();
        assert_eq!(value, json!({"note": "he said \"hi\" {"}));
    }

    #[test]
    fn test_malformed_span_is_invalid() {
        let err = extract_json_object(r#"{"a": }"#).unwrap_err();
        assert!(matches!(err, SpanError::Invalid(_)));
    }

    proptest! {
        /// Any JSON object survives arbitrary prose wrapping.
        #[test]
        fn prop_prose_wrapping_is_tolerated(
            key in "[a-z]{1,8}",
            val in "[a-zA-Z0-9 {}]{0,20}",
            prefix in "[^{}]{0,30}",
            suffix in ".{0,30}",
        ) {
            let object = json!({ key: val });
            let raw = format!("{prefix}{object}{suffix}");
            let parsed = extract_json_object(&raw).unwrap();
            prop_assert_eq!(parsed, object);
        }
    }
}
