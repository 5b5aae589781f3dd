//! Mapping HTTP failures onto the error taxonomy

use cms_core::{ExError, ExErrorKind};

/// Longest raw body kept in an error message
const MAX_BODY_SNIPPET: usize = 400;

/// Error kind for a non-success HTTP status
pub fn kind_for_status(status: u16) -> ExErrorKind {
    match status {
        400 | 422 => ExErrorKind::InvalidInput,
        401 => ExErrorKind::Unauthorised,
        403 => ExErrorKind::Forbidden,
        404 => ExErrorKind::NotFound,
        409 => ExErrorKind::Conflict,
        408 | 504 => ExErrorKind::Timeout,
        _ => ExErrorKind::ExternalService,
    }
}

/// Structured error for a non-success response
///
/// The server's `message` field (or `error.message`) becomes the error
/// message; otherwise a trimmed snippet of the raw body is kept.
pub fn map_status(status: u16, body: &str) -> ExError {
    ExError::new(kind_for_status(status))
        .with_status(status)
        .with_message(extract_message(status, body))
}

fn extract_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let message = value
            .get("message")
            .and_then(|m| m.as_str())
            .or_else(|| {
                value
                    .get("error")
                    .and_then(|e| e.get("message"))
                    .and_then(|m| m.as_str())
            });
        if let Some(message) = message {
            return message.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return format!("HTTP {status}");
    }
    match trimmed.char_indices().nth(MAX_BODY_SNIPPET) {
        Some((cut, _)) => format!("HTTP {status}: {}...", &trimmed[..cut]),
        None => format!("HTTP {status}: {trimmed}"),
    }
}

/// Structured error for a request that never produced a response
pub fn map_transport(err: &reqwest::Error) -> ExError {
    let kind = if err.is_timeout() {
        ExErrorKind::Timeout
    } else {
        ExErrorKind::ExternalService
    };
    ExError::new(kind).with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            (400, ExErrorKind::InvalidInput),
            (422, ExErrorKind::InvalidInput),
            (401, ExErrorKind::Unauthorised),
            (403, ExErrorKind::Forbidden),
            (404, ExErrorKind::NotFound),
            (409, ExErrorKind::Conflict),
            (408, ExErrorKind::Timeout),
            (504, ExErrorKind::Timeout),
            (500, ExErrorKind::ExternalService),
            (502, ExErrorKind::ExternalService),
        ];
        for (status, kind) in cases {
            assert_eq!(kind_for_status(status), kind, "status {status}");
        }
    }

    #[test]
    fn test_server_message_is_kept() {
        let err = map_status(422, r#"{"message": "Name is required"}"#);
        assert_eq!(err.kind(), ExErrorKind::InvalidInput);
        assert_eq!(err.status(), Some(422));
        assert_eq!(err.message(), "Name is required");
    }

    #[test]
    fn test_nested_error_message_is_kept() {
        let err = map_status(500, r#"{"error": {"message": "db down"}}"#);
        assert_eq!(err.message(), "db down");
    }

    #[test]
    fn test_raw_body_is_truncated() {
        let body = "x".repeat(1000);
        let err = map_status(502, &body);
        assert!(err.message().starts_with("HTTP 502: xxx"));
        assert!(err.message().ends_with("..."));
        assert!(err.message().len() < 450);
    }

    #[test]
    fn test_empty_body_names_status() {
        assert_eq!(map_status(404, "").message(), "HTTP 404");
    }
}
