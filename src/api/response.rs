//! Response normalization.
//!
//! All three endpoints answer with a JSON object holding one string: the
//! payload under a mode-specific key on success, or `error` on failure. This
//! module reduces any settlement to a single [`RequestOutcome`] the same way for
//! every mode.

use crate::domain::{Mode, RequestOutcome};
use serde_json::{Map, Value};

/// Maps a settled request to an outcome.
///
/// Success requires a 2xx status and the mode's payload field as a string.
/// Everything else is a failure whose message is the body's non-empty `error`
/// string, or the generic fallback when there is none. A transport failure has
/// no JSON body and always falls back.
///
/// # Example
///
/// ```
/// use finassist::api::normalize_response;
/// use finassist::domain::{Mode, RequestOutcome};
///
/// let outcome = normalize_response(Mode::Stock, 200, br#"{"info": "AAPL: $150"}"#);
/// assert_eq!(outcome, RequestOutcome::Success("AAPL: $150".to_string()));
///
/// let outcome = normalize_response(Mode::News, 500, br#"{"error": "rate limited"}"#);
/// assert_eq!(outcome, RequestOutcome::Failure("rate limited".to_string()));
/// ```
#[must_use]
pub fn normalize_response(mode: Mode, status: u16, body: &[u8]) -> RequestOutcome {
    let object = parse_object(body);

    if is_success_status(status) {
        if let Some(payload) = object
            .as_ref()
            .and_then(|o| o.get(mode.payload_field()))
            .and_then(Value::as_str)
        {
            tracing::debug!(
                mode = %mode,
                status = status,
                payload_len = payload.len(),
                "request succeeded"
            );
            return RequestOutcome::Success(payload.to_string());
        }
        tracing::debug!(
            mode = %mode,
            status = status,
            field = mode.payload_field(),
            "success status without payload field"
        );
    }

    let outcome = failure_from(object.as_ref());
    tracing::debug!(mode = %mode, status = status, outcome = ?outcome, "request failed");
    outcome
}

/// Failure outcome for a request that never produced a response body.
#[must_use]
pub fn transport_failure() -> RequestOutcome {
    RequestOutcome::generic_failure()
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

fn parse_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn failure_from(object: Option<&Map<String, Value>>) -> RequestOutcome {
    object
        .and_then(|o| o.get("error"))
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map_or_else(RequestOutcome::generic_failure, |message| {
            RequestOutcome::Failure(message.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GENERIC_FAILURE_MESSAGE;

    fn generic() -> RequestOutcome {
        RequestOutcome::Failure(GENERIC_FAILURE_MESSAGE.to_string())
    }

    #[test]
    fn payload_field_is_keyed_by_mode() {
        let body = br#"{"info": "i", "news": "n", "summary": "s"}"#;
        assert_eq!(normalize_response(Mode::Stock, 200, body), RequestOutcome::Success("i".into()));
        assert_eq!(normalize_response(Mode::News, 200, body), RequestOutcome::Success("n".into()));
        assert_eq!(
            normalize_response(Mode::Document, 201, body),
            RequestOutcome::Success("s".into())
        );
    }

    #[test]
    fn payload_whitespace_is_preserved() {
        let body = br#"{"info": "\nCompany: Apple Inc.\n  Current Price: $150\n"}"#;
        assert_eq!(
            normalize_response(Mode::Stock, 200, body),
            RequestOutcome::Success("\nCompany: Apple Inc.\n  Current Price: $150\n".into())
        );
    }

    #[test]
    fn wrong_payload_field_falls_back() {
        assert_eq!(normalize_response(Mode::News, 200, br#"{"info": "x"}"#), generic());
        assert_eq!(normalize_response(Mode::Stock, 200, br#"{"info": 42}"#), generic());
    }

    #[test]
    fn error_field_is_used_for_any_mode() {
        for mode in Mode::ALL {
            assert_eq!(
                normalize_response(mode, 400, br#"{"error": "File type not allowed"}"#),
                RequestOutcome::Failure("File type not allowed".into())
            );
        }
    }

    #[test]
    fn error_field_on_success_status_is_still_a_failure() {
        assert_eq!(
            normalize_response(Mode::Document, 200, br#"{"error": "No selected file"}"#),
            RequestOutcome::Failure("No selected file".into())
        );
    }

    #[test]
    fn missing_empty_or_non_string_error_falls_back() {
        assert_eq!(normalize_response(Mode::Stock, 500, b"{}"), generic());
        assert_eq!(normalize_response(Mode::Stock, 500, br#"{"error": ""}"#), generic());
        assert_eq!(normalize_response(Mode::Stock, 500, br#"{"error": {"code": 1}}"#), generic());
        assert_eq!(normalize_response(Mode::Stock, 502, b"<html>Bad Gateway</html>"), generic());
    }

    #[test]
    fn transport_failure_without_body_falls_back() {
        assert_eq!(normalize_response(Mode::Document, 400, b""), generic());
        assert_eq!(
            normalize_response(Mode::Document, 400, b"error sending request: connection refused"),
            generic()
        );
        assert_eq!(transport_failure(), generic());
    }
}
