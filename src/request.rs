use serde_json::Value;

use crate::error::RequestError;

/// Reads the message count `n` from a JSON request body.
///
/// A missing body, a missing key and `null` all mean `default`. Anything else
/// must be a non-negative integer, either as a JSON number or a numeric string.
pub fn count_from_body(body: &[u8], default: u32) -> Result<u32, RequestError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(default);
    }
    let json: Value = serde_json::from_slice(body)
        .map_err(|e| RequestError::InvalidParameter(format!("body is not valid JSON: {e}")))?;
    let object = json.as_object().ok_or_else(|| {
        RequestError::InvalidParameter("body must be a JSON object".to_string())
    })?;
    match object.get("n") {
        None | Some(Value::Null) => Ok(default),
        Some(value) => parse_count(value),
    }
}

fn parse_count(value: &Value) -> Result<u32, RequestError> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| {
        RequestError::InvalidParameter(format!("`n` must be a non-negative integer, got {value}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_count_uses_default() {
        assert_eq!(count_from_body(b"", 10), Ok(10));
        assert_eq!(count_from_body(b"  \n", 10), Ok(10));
        assert_eq!(count_from_body(br#"{}"#, 1), Ok(1));
        assert_eq!(count_from_body(br#"{"n": null}"#, 10), Ok(10));
    }

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        assert_eq!(count_from_body(br#"{"n": 0}"#, 10), Ok(0));
        assert_eq!(count_from_body(br#"{"n": 25}"#, 10), Ok(25));
        assert_eq!(count_from_body(br#"{"n": "7"}"#, 10), Ok(7));
    }

    #[test]
    fn rejects_invalid_counts() {
        let bodies: [&[u8]; 8] = [
            br#"{"n": -1}"#,
            br#"{"n": "-3"}"#,
            br#"{"n": "ten"}"#,
            br#"{"n": 2.5}"#,
            br#"{"n": true}"#,
            br#"{"n": [1]}"#,
            br#"[1, 2]"#,
            b"n=5",
        ];
        for body in bodies {
            assert!(
                matches!(
                    count_from_body(body, 10),
                    Err(RequestError::InvalidParameter(_))
                ),
                "accepted {}",
                String::from_utf8_lossy(body)
            );
        }
    }
}
