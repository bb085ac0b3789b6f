use thiserror::Error;

/// Message surfaced when a failed response carries no `error` field
pub const REQUEST_FAILED: &str = "Request failed";

/// Message surfaced when a transport failure has no message of its own
pub const NETWORK_ERROR: &str = "Network error";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Authentication required")]
    Unauthorized,

    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("{0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Maximum length for error response bodies in log messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: Option<serde_json::Value>,
}

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    pub fn truncate_body(body: &str) -> String {
        match body.char_indices().nth(MAX_ERROR_BODY_LENGTH) {
            None => body.to_string(),
            Some((cut, _)) => format!(
                "{}... (truncated, {} total bytes)",
                &body[..cut],
                body.len()
            ),
        }
    }

    /// Transport failure, falling back to a generic message when the
    /// underlying error has none.
    pub fn network(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            ApiError::Network(NETWORK_ERROR.to_string())
        } else {
            ApiError::Network(message)
        }
    }

    /// Classify a non-success response from its status and body.
    ///
    /// The server reports failures as `{"error": "..."}`; anything else
    /// (including a body that is not JSON) becomes "Request failed".
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| match b.error {
                Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
                _ => None,
            })
            .unwrap_or_else(|| REQUEST_FAILED.to_string());
        ApiError::RequestFailed { status, message }
    }

    /// Status code reported alongside this error; `0` means no server
    /// response was classified.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::Unauthorized => 401,
            ApiError::RequestFailed { status, .. } => *status,
            ApiError::Network(_) | ApiError::InvalidResponse(_) | ApiError::InvalidRequest(_) => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_uses_server_error_message() {
        let err = ApiError::from_status(500, r#"{"error":"boom"}"#);
        assert_eq!(
            err,
            ApiError::RequestFailed {
                status: 500,
                message: "boom".to_string()
            }
        );
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_from_status_falls_back_to_generic_message() {
        for body in ["", "{}", r#"{"error":42}"#, r#"{"error":""}"#, "<html>oops</html>", "[1,2]"] {
            let err = ApiError::from_status(502, body);
            assert_eq!(err.to_string(), REQUEST_FAILED, "body: {}", body);
            assert_eq!(err.status(), 502);
        }
    }

    #[test]
    fn test_network_error_message_fallback() {
        assert_eq!(ApiError::network("timeout").to_string(), "timeout");
        assert_eq!(ApiError::network("").to_string(), NETWORK_ERROR);
        assert_eq!(ApiError::network("  ").status(), 0);
    }

    #[test]
    fn test_unauthorized_status_and_message() {
        assert_eq!(ApiError::Unauthorized.status(), 401);
        assert_eq!(ApiError::Unauthorized.to_string(), "Authentication required");
    }

    #[test]
    fn test_truncate_body() {
        let short = "x".repeat(10);
        assert_eq!(ApiError::truncate_body(&short), short);

        let long = "é".repeat(600);
        let truncated = ApiError::truncate_body(&long);
        assert!(truncated.starts_with(&"é".repeat(500)));
        assert!(truncated.ends_with("(truncated, 1200 total bytes)"));
    }
}
