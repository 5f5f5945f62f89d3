use serde::Deserialize;

use crate::domain::DomainError;

/// Classify a reqwest transport error.
pub(crate) fn transport_error(context: &str, err: reqwest::Error) -> DomainError {
    if err.is_timeout() {
        DomainError::timeout(format!("{context}: {err}"))
    } else if err.is_decode() {
        DomainError::malformed(format!("{context}: {err}"))
    } else {
        DomainError::network(format!("{context}: {err}"))
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Both Gemini and Anthropic wrap failures as `{"error": {"message": ...}}`;
/// fall back to the raw body otherwise.
pub(crate) fn service_error(status: reqwest::StatusCode, body: &str) -> DomainError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    DomainError::service(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn service_error_extracts_nested_message() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid", "status": "INVALID_ARGUMENT"}}"#;
        let err = service_error(reqwest::StatusCode::BAD_REQUEST, body);
        match err {
            DomainError::Service { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn service_error_keeps_plain_body() {
        let err = service_error(reqwest::StatusCode::BAD_GATEWAY, "  upstream down \n");
        assert_eq!(err.to_string(), "Service returned 502: upstream down");
    }
}
